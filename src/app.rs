//! Application state and event handling
//!
//! This is the root shell of fplcompanion, managing:
//! - Host appearance and the resolved theme
//! - The route stack and the lifetime of the home screen
//! - Event handling (keyboard input)

use crate::animation::Scheduler;
use crate::config::Config;
use crate::data::DashboardData;
use crate::screen::{self, HomeScreen};
use crate::types::{AppearanceMode, Route, Tab};
use crate::ui::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long a flash message stays on screen
const FLASH_DURATION: Duration = Duration::from_secs(3);

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub theme: Theme,
    pub scheduler: Scheduler,

    // Appearance inputs
    host_appearance: Option<AppearanceMode>,
    override_appearance: Option<AppearanceMode>,

    // Navigation
    routes: Vec<Route>,
    home: Option<HomeScreen>,
    data: Box<dyn DashboardData>,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the home screen mounted
    pub fn new(
        config: Config,
        host_appearance: Option<AppearanceMode>,
        cli_appearance: Option<AppearanceMode>,
        data: Box<dyn DashboardData>,
        now: Instant,
    ) -> Self {
        let override_appearance = cli_appearance.or(config.appearance.forced());
        let theme = Theme::resolve(override_appearance.or(host_appearance));
        let scheduler = Scheduler::new();
        let home = HomeScreen::mount(data.as_ref(), &scheduler, now, config.animations.enabled);

        info!(theme = theme.name, "Application started");

        Self {
            should_quit: false,
            config,
            theme,
            scheduler,
            host_appearance,
            override_appearance,
            routes: vec![Route::Home],
            home: Some(home),
            data,
            flash_message: None,
        }
    }

    // === APPEARANCE ===

    /// Appearance actually in effect (None = unknown, rendered as light)
    pub fn appearance(&self) -> Option<AppearanceMode> {
        self.override_appearance.or(self.host_appearance)
    }

    fn apply_appearance(&mut self) {
        let theme = Theme::resolve(self.appearance());
        if theme != self.theme {
            debug!(from = self.theme.name, to = theme.name, "Theme changed");
        }
        self.theme = theme;
    }

    /// Host notified a color scheme change
    pub fn set_host_appearance(&mut self, mode: Option<AppearanceMode>) {
        self.host_appearance = mode;
        self.apply_appearance();
    }

    /// Flip between light and dark, overriding the host
    pub fn toggle_appearance(&mut self) {
        let next = self
            .appearance()
            .unwrap_or(AppearanceMode::Light)
            .toggled();
        self.override_appearance = Some(next);
        self.apply_appearance();
    }

    // === NAVIGATION ===

    pub fn current_route(&self) -> &Route {
        self.routes.last().unwrap_or(&Route::Home)
    }

    /// The mounted home screen, if home is on top
    pub fn home(&self) -> Option<&HomeScreen> {
        self.home.as_ref()
    }

    /// Push a route. Leaving home unmounts it.
    pub fn navigate(&mut self, route: Route, now: Instant) {
        if route == *self.current_route() {
            return;
        }
        info!(route = route.path(), "Navigating");

        if route == Route::Home {
            self.routes.truncate(1);
            self.mount_home(now);
            return;
        }

        if let Some(home) = self.home.take() {
            home.unmount();
            debug!(active_tasks = self.scheduler.active(), "Released home screen tasks");
        }
        self.show_flash(&format!("Opened {}", route.path()), now);
        self.routes.push(route);
    }

    /// Pop the current route. Returning home remounts a fresh screen.
    pub fn back(&mut self, now: Instant) {
        if self.routes.len() <= 1 {
            return;
        }
        self.routes.pop();
        debug!(route = self.current_route().path(), "Navigated back");
        if *self.current_route() == Route::Home {
            self.mount_home(now);
        }
    }

    fn mount_home(&mut self, now: Instant) {
        if self.home.is_none() {
            self.home = Some(HomeScreen::mount(
                self.data.as_ref(),
                &self.scheduler,
                now,
                self.config.animations.enabled,
            ));
        }
    }

    // === EVENTS ===

    /// Advance animations and expire stale messages
    pub fn tick(&mut self, now: Instant) {
        self.scheduler.tick(now);
        if let Some((_, shown)) = &self.flash_message {
            if now.saturating_duration_since(*shown) >= FLASH_DURATION {
                self.flash_message = None;
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Global keys
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('m') => {
                self.toggle_appearance();
                return;
            }
            _ => {}
        }

        if *self.current_route() == Route::Home {
            self.handle_home_key(key, now);
        } else {
            self.handle_route_key(key, now);
        }
    }

    /// Keys on the dashboard
    fn handle_home_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(home) = self.home.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Char('1') => {
                home.select_tab(Tab::Transfers);
            }
            KeyCode::Char('2') => {
                home.select_tab(Tab::Captain);
            }
            KeyCode::Char('3') => {
                home.select_tab(Tab::Differentials);
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                let next = home.active_tab().next();
                home.select_tab(next);
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                let prev = home.active_tab().prev();
                home.select_tab(prev);
            }
            KeyCode::Char(c) => {
                if let Some(link) = screen::links().into_iter().find(|l| l.key == c) {
                    self.navigate(link.route(), now);
                }
            }
            _ => {}
        }
    }

    /// Keys on a destination route
    fn handle_route_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.back(now),
            KeyCode::Char('H') => self.navigate(Route::Home, now),
            _ => {}
        }
    }

    fn show_flash(&mut self, message: &str, now: Instant) {
        self.flash_message = Some((message.to_string(), now));
    }
}
