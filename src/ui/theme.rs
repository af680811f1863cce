//! Theme definitions for fplcompanion
//!
//! Two fixed variants keyed by appearance mode: "FPL" (light) and
//! "FPL Dark". Each theme defines colors for all UI elements.

use crate::types::{AppearanceMode, TrendIndicator};
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub mode: AppearanceMode,

    // Navigation theme colors
    pub primary: Color,
    pub background: Color,
    pub card: Color,
    pub text: Color,
    pub border: Color,
    pub notification: Color,

    // Shell
    pub header_bg: Color,
    pub header_tint: Color,
    pub content_bg: Color,

    // Dashboard surfaces
    pub container: Color,
    pub surface: Color,
    pub text_body: Color,
    pub text_secondary: Color,

    // Trend indicators
    pub positive: Color,
    pub negative: Color,
    pub neutral: Color,
}

impl Theme {
    /// Resolve the theme for a host appearance. Unknown falls back to light.
    pub fn resolve(mode: Option<AppearanceMode>) -> Self {
        match mode {
            Some(AppearanceMode::Dark) => Self::fpl_dark(),
            Some(AppearanceMode::Light) | None => Self::fpl(),
        }
    }

    /// FPL light theme (default)
    pub fn fpl() -> Self {
        Self {
            name: "FPL",
            mode: AppearanceMode::Light,

            primary: Color::Rgb(55, 0, 60),          // #37003C FPL purple
            background: Color::Rgb(255, 255, 255),   // #FFFFFF
            card: Color::Rgb(245, 245, 245),         // #F5F5F5
            text: Color::Rgb(55, 0, 60),             // #37003C
            border: Color::Rgb(224, 224, 224),       // #E0E0E0
            notification: Color::Rgb(255, 64, 129),  // #FF4081

            header_bg: Color::Rgb(55, 0, 60),        // #37003C
            header_tint: Color::Rgb(255, 255, 255),  // #FFFFFF
            content_bg: Color::Rgb(245, 245, 245),   // #F5F5F5

            container: Color::Rgb(249, 249, 249),    // #F9F9F9
            surface: Color::Rgb(255, 255, 255),      // #FFFFFF
            text_body: Color::Rgb(51, 51, 51),       // #333333
            text_secondary: Color::Rgb(102, 102, 102), // #666666

            positive: Color::Rgb(76, 175, 80),       // #4CAF50
            negative: Color::Rgb(244, 67, 54),       // #F44336
            neutral: Color::Rgb(255, 193, 7),        // #FFC107
        }
    }

    /// FPL dark theme
    pub fn fpl_dark() -> Self {
        Self {
            name: "FPL Dark",
            mode: AppearanceMode::Dark,

            primary: Color::Rgb(0, 255, 135),        // #00FF87 FPL green
            background: Color::Rgb(26, 0, 54),       // #1A0036
            card: Color::Rgb(55, 0, 60),             // #37003C
            text: Color::Rgb(255, 255, 255),         // #FFFFFF
            border: Color::Rgb(74, 20, 140),         // #4A148C
            notification: Color::Rgb(255, 64, 129),  // #FF4081

            header_bg: Color::Rgb(26, 0, 54),        // #1A0036
            header_tint: Color::Rgb(0, 255, 135),    // #00FF87
            content_bg: Color::Rgb(26, 0, 54),       // #1A0036

            container: Color::Rgb(18, 18, 18),       // #121212
            surface: Color::Rgb(30, 30, 30),         // #1E1E1E
            text_body: Color::Rgb(255, 255, 255),    // #FFFFFF
            text_secondary: Color::Rgb(170, 170, 170), // #AAAAAA

            positive: Color::Rgb(76, 175, 80),
            negative: Color::Rgb(244, 67, 54),
            neutral: Color::Rgb(255, 193, 7),
        }
    }

    // Style helpers for common UI patterns

    /// Screen background
    pub fn block_style(&self) -> Style {
        Style::default().bg(self.container)
    }

    /// Default body text
    pub fn body(&self) -> Style {
        Style::default().fg(self.text_body).bg(self.surface)
    }

    /// Secondary (dimmed) text
    pub fn secondary(&self) -> Style {
        Style::default().fg(self.text_secondary).bg(self.surface)
    }

    /// Destination screens outside the dashboard
    pub fn route_title(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.content_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn route_body(&self) -> Style {
        Style::default().fg(self.text).bg(self.content_bg)
    }

    pub fn card_border(&self) -> Style {
        Style::default().fg(self.border).bg(self.surface)
    }

    /// Header band
    pub fn header(&self) -> Style {
        Style::default().fg(self.header_tint).bg(self.header_bg)
    }

    /// Header title (heading typography)
    pub fn header_title(&self) -> Style {
        self.header().add_modifier(Modifier::BOLD)
    }

    /// Small caps subtitle over the header title
    pub fn header_subtitle(&self) -> Style {
        self.header().add_modifier(Modifier::BOLD | Modifier::DIM)
    }

    /// Section heading inside cards
    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .bg(self.surface)
            .add_modifier(Modifier::BOLD)
    }

    /// Quoted assistant message
    pub fn quote(&self) -> Style {
        self.body().add_modifier(Modifier::ITALIC)
    }

    /// Primary call-to-action button
    pub fn button(&self) -> Style {
        let fg = match self.mode {
            AppearanceMode::Light => Color::Rgb(255, 255, 255),
            AppearanceMode::Dark => Color::Rgb(26, 0, 54),
        };
        Style::default()
            .fg(fg)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Tab style (inactive)
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.text_secondary).bg(self.card)
    }

    /// Tab style (active)
    pub fn tab_active(&self) -> Style {
        self.button()
    }

    /// Confidence badge and progress bar
    pub fn badge(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .bg(self.surface)
            .add_modifier(Modifier::BOLD)
    }

    /// Player going out
    pub fn player_out(&self) -> Style {
        Style::default()
            .fg(self.negative)
            .bg(self.surface)
            .add_modifier(Modifier::BOLD)
    }

    /// Player coming in
    pub fn player_in(&self) -> Style {
        Style::default()
            .fg(self.positive)
            .bg(self.surface)
            .add_modifier(Modifier::BOLD)
    }

    /// Trend indicator color
    pub fn trend(&self, indicator: TrendIndicator) -> Style {
        let fg = match indicator {
            TrendIndicator::Positive => self.positive,
            TrendIndicator::Negative => self.negative,
            TrendIndicator::Neutral => self.neutral,
        };
        Style::default().fg(fg).bg(self.surface)
    }

    /// Status bar hints
    pub fn status(&self) -> Style {
        Style::default().fg(self.text_secondary).bg(self.background)
    }

    /// Flash message
    pub fn flash(&self) -> Style {
        Style::default()
            .fg(self.notification)
            .bg(self.container)
            .add_modifier(Modifier::BOLD)
    }

    /// Copy of the theme with every foreground faded toward the background.
    ///
    /// `opacity` of 1.0 returns an identical theme, 0.0 makes all text
    /// indistinguishable from the surface it sits on.
    pub fn with_opacity(&self, opacity: f64) -> Self {
        if opacity >= 1.0 {
            return self.clone();
        }
        let fade = |c: Color, bg: Color| blend(c, bg, opacity);
        Self {
            primary: fade(self.primary, self.surface),
            text: fade(self.text, self.surface),
            text_body: fade(self.text_body, self.surface),
            text_secondary: fade(self.text_secondary, self.surface),
            header_tint: fade(self.header_tint, self.header_bg),
            notification: fade(self.notification, self.container),
            positive: fade(self.positive, self.surface),
            negative: fade(self.negative, self.surface),
            neutral: fade(self.neutral, self.surface),
            border: fade(self.border, self.surface),
            ..self.clone()
        }
    }
}

/// Linear blend between two colors. Non-RGB colors snap at the midpoint.
pub fn blend(fg: Color, bg: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * t).round() as u8;
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ if t >= 0.5 => fg,
        _ => bg,
    }
}
