//! Home dashboard screen
//!
//! Owns the per-visit state of one dashboard instance (selected tab,
//! entrance animation, pulse task) and composes the fixed list of
//! sections the renderer draws.

use crate::animation::{Entrance, EntrancePhase, Pulse, PulseAnimation, PulsePhase, Scheduler};
use crate::data::DashboardData;
use crate::types::{Gameweek, Route, SuggestionItem, Tab, TeamSummary, TrendIndicator};
use std::time::Instant;
use tracing::{debug, info};

/// A tappable link to another route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub href: &'static str,
    pub key: char,
}

impl Link {
    pub fn new(label: &'static str, href: &'static str, key: char) -> Self {
        Self { label, href, key }
    }

    pub fn route(&self) -> Route {
        Route::from_path(self.href)
    }
}

/// Suggestion plus its derived trend indicator
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionView {
    pub item: SuggestionItem,
    pub indicator: TrendIndicator,
}

/// One block of the dashboard, in display order
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Header {
        subtitle: &'static str,
        title: String,
        deadline: String,
    },
    Assistant {
        message: String,
        action: Link,
    },
    TabSelector {
        tabs: Vec<Tab>,
        active: Tab,
    },
    Content {
        tab: Tab,
        items: Vec<SuggestionView>,
    },
    TeamSummary {
        team: TeamSummary,
        action: Link,
    },
    QuickActions(Vec<Link>),
}

/// Animated values for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub entrance: EntrancePhase,
    pub opacity: f64,
    pub offset: f64,
    pub pulse: PulsePhase,
    pub pulse_scale: f64,
}

/// Link to the AI coach chat
pub fn assistant_link() -> Link {
    Link::new("CHAT WITH AI COACH", "/ai-assistant", 'a')
}

/// Link to the full team view
pub fn team_link() -> Link {
    Link::new("VIEW TEAM DETAILS", "/team", 'v')
}

/// Quick action grid entries
pub fn quick_actions() -> Vec<Link> {
    vec![
        Link::new("Transfers", "/transfers", 't'),
        Link::new("Fixtures", "/fixtures", 'f'),
        Link::new("Stats", "/stats", 's'),
        Link::new("News", "/news", 'n'),
    ]
}

/// Every link reachable from the dashboard
pub fn links() -> Vec<Link> {
    let mut all = vec![assistant_link(), team_link()];
    all.extend(quick_actions());
    all
}

/// A mounted dashboard. Dropping it (see [`HomeScreen::unmount`]) cancels
/// the pulse task.
pub struct HomeScreen {
    active_tab: Tab,
    entrance: Entrance,
    pulse: PulseAnimation,
    gameweek: Gameweek,
    team: TeamSummary,
    suggestions: Vec<SuggestionItem>,
    assistant_message: String,
}

impl HomeScreen {
    /// Mount a new screen: default tab, entrance started, pulse registered
    pub fn mount(
        data: &dyn DashboardData,
        scheduler: &Scheduler,
        now: Instant,
        animate: bool,
    ) -> Self {
        let (mut entrance, pulse) = if animate {
            (Entrance::default(), Pulse::default())
        } else {
            (Entrance::instant(), Pulse { peak: 1.0, ..Pulse::default() })
        };
        entrance.start(now);

        let screen = Self {
            active_tab: Tab::default(),
            entrance,
            pulse: PulseAnimation::start(scheduler, now, pulse),
            gameweek: data.gameweek(),
            team: data.team(),
            suggestions: data.suggestions(),
            assistant_message: data.assistant_message(),
        };
        info!(
            gameweek = screen.gameweek.number,
            suggestions = screen.suggestions.len(),
            animate,
            "Home screen mounted"
        );
        screen
    }

    /// Tear the screen down, releasing its scheduled pulse
    pub fn unmount(self) {
        info!(pulsing = self.is_pulsing(), "Home screen unmounted");
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Select a tab. Returns false when it was already active.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.active_tab == tab {
            return false;
        }
        debug!(from = self.active_tab.label(), to = tab.label(), "Tab selected");
        self.active_tab = tab;
        true
    }

    pub fn entrance_phase(&self, now: Instant) -> EntrancePhase {
        self.entrance.phase(now)
    }

    pub fn opacity(&self, now: Instant) -> f64 {
        self.entrance.opacity(now)
    }

    pub fn offset(&self, now: Instant) -> f64 {
        self.entrance.offset(now)
    }

    pub fn pulse_scale(&self) -> f64 {
        self.pulse.scale()
    }

    pub fn pulse_phase(&self) -> PulsePhase {
        self.pulse.phase()
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse.is_running()
    }

    #[cfg(test)]
    pub fn pulse_watch(&self) -> crate::animation::PulseWatch {
        self.pulse.watch()
    }

    pub fn visual(&self, now: Instant) -> Visual {
        Visual {
            entrance: self.entrance_phase(now),
            opacity: self.opacity(now),
            offset: self.offset(now),
            pulse: self.pulse_phase(),
            pulse_scale: self.pulse_scale(),
        }
    }

    /// Items shown under a tab. Only transfers has content so far.
    fn tab_items(&self, tab: Tab) -> Vec<SuggestionView> {
        match tab {
            Tab::Transfers => self
                .suggestions
                .iter()
                .map(|item| SuggestionView {
                    indicator: item.trend.indicator(),
                    item: item.clone(),
                })
                .collect(),
            Tab::Captain | Tab::Differentials => Vec::new(),
        }
    }

    /// Compose the dashboard sections in their fixed order
    pub fn compose(&self) -> Vec<Section> {
        vec![
            Section::Header {
                subtitle: "FPL COMPANION",
                title: format!("Gameweek {}", self.gameweek.number),
                deadline: format!(
                    "Deadline: {} ({})",
                    self.gameweek.formatted_deadline(),
                    self.gameweek.countdown()
                ),
            },
            Section::Assistant {
                message: self.assistant_message.clone(),
                action: assistant_link(),
            },
            Section::TabSelector {
                tabs: Tab::all().to_vec(),
                active: self.active_tab,
            },
            Section::Content {
                tab: self.active_tab,
                items: self.tab_items(self.active_tab),
            },
            Section::TeamSummary {
                team: self.team.clone(),
                action: team_link(),
            },
            Section::QuickActions(quick_actions()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StaticData;
    use std::time::Duration;

    fn kind(section: &Section) -> &'static str {
        match section {
            Section::Header { .. } => "header",
            Section::Assistant { .. } => "assistant",
            Section::TabSelector { .. } => "tabs",
            Section::Content { .. } => "content",
            Section::TeamSummary { .. } => "team",
            Section::QuickActions(_) => "quick-actions",
        }
    }

    fn mount(scheduler: &Scheduler, now: Instant) -> HomeScreen {
        HomeScreen::mount(&StaticData, scheduler, now, true)
    }

    #[test]
    fn test_initial_tab_is_transfers() {
        let scheduler = Scheduler::new();
        let screen = mount(&scheduler, Instant::now());
        assert_eq!(screen.active_tab(), Tab::Transfers);
    }

    #[test]
    fn test_select_tab_is_idempotent() {
        let scheduler = Scheduler::new();
        let mut screen = mount(&scheduler, Instant::now());

        assert!(screen.select_tab(Tab::Captain));
        assert_eq!(screen.active_tab(), Tab::Captain);
        assert!(!screen.select_tab(Tab::Captain));
        assert_eq!(screen.active_tab(), Tab::Captain);
    }

    #[test]
    fn test_select_tab_round_trip() {
        let scheduler = Scheduler::new();
        let mut screen = mount(&scheduler, Instant::now());
        let original = screen.active_tab();

        for tab in Tab::all() {
            screen.select_tab(*tab);
            assert_eq!(screen.active_tab(), *tab);
        }
        screen.select_tab(original);
        assert_eq!(screen.active_tab(), original);
    }

    #[test]
    fn test_section_order_is_fixed() {
        let scheduler = Scheduler::new();
        let mut screen = mount(&scheduler, Instant::now());
        let expected = ["header", "assistant", "tabs", "content", "team", "quick-actions"];

        for tab in Tab::all() {
            screen.select_tab(*tab);
            let kinds: Vec<&str> = screen.compose().iter().map(kind).collect();
            assert_eq!(kinds, expected);
        }
    }

    #[test]
    fn test_only_transfers_has_items() {
        let scheduler = Scheduler::new();
        let mut screen = mount(&scheduler, Instant::now());

        let content_len = |screen: &HomeScreen| {
            screen
                .compose()
                .into_iter()
                .find_map(|s| match s {
                    Section::Content { items, .. } => Some(items.len()),
                    _ => None,
                })
                .unwrap_or_default()
        };

        assert_eq!(content_len(&screen), 3);
        screen.select_tab(Tab::Captain);
        assert_eq!(content_len(&screen), 0);
        screen.select_tab(Tab::Differentials);
        assert_eq!(content_len(&screen), 0);
    }

    #[test]
    fn test_suggestions_carry_indicators() {
        let scheduler = Scheduler::new();
        let screen = mount(&scheduler, Instant::now());
        let sections = screen.compose();
        let Section::Content { items, .. } = &sections[3] else {
            panic!("expected content section");
        };

        let confidences: Vec<u8> = items.iter().map(|v| v.item.confidence).collect();
        assert_eq!(confidences, vec![85, 78, 92]);
        let indicators: Vec<TrendIndicator> = items.iter().map(|v| v.indicator).collect();
        assert_eq!(
            indicators,
            vec![
                TrendIndicator::Positive,
                TrendIndicator::Positive,
                TrendIndicator::Neutral
            ]
        );
    }

    #[test]
    fn test_header_text() {
        let scheduler = Scheduler::new();
        let screen = mount(&scheduler, Instant::now());
        assert_eq!(
            screen.compose()[0],
            Section::Header {
                subtitle: "FPL COMPANION",
                title: "Gameweek 28".to_string(),
                deadline: "Deadline: 10 Feb 11:30 (2d)".to_string(),
            }
        );
    }

    struct ClosedGameweek;

    impl DashboardData for ClosedGameweek {
        fn gameweek(&self) -> Gameweek {
            Gameweek {
                is_active: false,
                days_left: 0,
                ..StaticData.gameweek()
            }
        }
        fn team(&self) -> TeamSummary {
            StaticData.team()
        }
        fn suggestions(&self) -> Vec<SuggestionItem> {
            StaticData.suggestions()
        }
        fn assistant_message(&self) -> String {
            StaticData.assistant_message()
        }
    }

    #[test]
    fn test_header_for_closed_gameweek() {
        let scheduler = Scheduler::new();
        let screen = HomeScreen::mount(&ClosedGameweek, &scheduler, Instant::now(), true);
        let Section::Header { deadline, .. } = &screen.compose()[0] else {
            panic!("header must come first");
        };
        assert_eq!(deadline, "Deadline: 10 Feb 11:30 (closed)");
    }

    #[test]
    fn test_quick_actions() {
        let labels: Vec<&str> = quick_actions().iter().map(|l| l.label).collect();
        assert_eq!(labels, vec!["Transfers", "Fixtures", "Stats", "News"]);
        let mut keys: Vec<char> = links().iter().map(|l| l.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), links().len());
        // Every link resolves to a known destination
        assert!(links()
            .iter()
            .all(|l| !matches!(l.route(), Route::NotFound(_) | Route::Home)));
    }

    #[test]
    fn test_entrance_does_not_restart_on_recompose() {
        let scheduler = Scheduler::new();
        let t0 = Instant::now();
        let mut screen = mount(&scheduler, t0);
        let later = t0 + Duration::from_millis(900);

        screen.compose();
        screen.select_tab(Tab::Captain);
        screen.compose();
        assert_eq!(screen.entrance_phase(later), EntrancePhase::Settled);
        assert_eq!(screen.opacity(later), 1.0);
        assert_eq!(screen.offset(later), 0.0);
    }

    #[test]
    fn test_unmount_cancels_pulse() {
        let scheduler = Scheduler::new();
        let t0 = Instant::now();
        let screen = mount(&scheduler, t0);
        assert!(screen.is_pulsing());
        assert_eq!(screen.pulse_phase(), PulsePhase::Idle);

        let mut seen = Vec::new();
        for step in 0..40 {
            scheduler.tick(t0 + Duration::from_millis(step * 100));
            seen.push(screen.pulse_scale());
        }
        assert!(seen.iter().all(|s| (1.0..=1.05 + 1e-9).contains(s)));
        assert!(seen.iter().any(|s| *s > 1.04));
        assert!(seen.iter().skip(1).any(|s| *s < 1.01));

        let watch = screen.pulse_watch();
        let last = watch.get();
        screen.unmount();
        assert_eq!(scheduler.active(), 0);

        for step in 40..60 {
            scheduler.tick(t0 + Duration::from_millis(step * 100));
            assert_eq!(watch.get(), last);
        }
    }

    #[test]
    fn test_mount_without_animation() {
        let scheduler = Scheduler::new();
        let t0 = Instant::now();
        let screen = HomeScreen::mount(&StaticData, &scheduler, t0, false);
        assert_eq!(screen.entrance_phase(t0), EntrancePhase::Settled);
        scheduler.tick(t0 + Duration::from_millis(500));
        assert_eq!(screen.pulse_scale(), 1.0);
    }
}
