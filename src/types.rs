//! Core data types for fplcompanion
//!
//! This module defines all shared data structures used throughout the application.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Light/dark display preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    Light,
    Dark,
}

impl AppearanceMode {
    pub fn toggled(&self) -> Self {
        match self {
            AppearanceMode::Light => AppearanceMode::Dark,
            AppearanceMode::Dark => AppearanceMode::Light,
        }
    }
}

/// Recommendation tabs on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Transfers,
    Captain,
    Differentials,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Transfers, Tab::Captain, Tab::Differentials]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Transfers => 0,
            Tab::Captain => 1,
            Tab::Differentials => 2,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Tab::Transfers,
            1 => Tab::Captain,
            2 => Tab::Differentials,
            _ => Tab::Transfers,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Transfers => "Transfers",
            Tab::Captain => "Captain",
            Tab::Differentials => "Differentials",
        }
    }

    pub fn next(&self) -> Self {
        Tab::from_index((self.index() + 1) % Tab::all().len())
    }

    pub fn prev(&self) -> Self {
        let len = Tab::all().len();
        Tab::from_index((self.index() + len - 1) % len)
    }
}

/// Form trend attached to a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Steady,
}

impl Trend {
    /// Parse a trend label. Anything that isn't "up" or "down" is steady.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("up") => Trend::Up,
            Some("down") => Trend::Down,
            _ => Trend::Steady,
        }
    }

    pub fn indicator(&self) -> TrendIndicator {
        match self {
            Trend::Up => TrendIndicator::Positive,
            Trend::Down => TrendIndicator::Negative,
            Trend::Steady => TrendIndicator::Neutral,
        }
    }
}

impl From<Option<String>> for Trend {
    fn from(label: Option<String>) -> Self {
        Trend::from_label(label.as_deref())
    }
}

/// Visual indicator drawn next to a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendIndicator {
    Positive,
    Negative,
    Neutral,
}

impl TrendIndicator {
    pub fn symbol(&self) -> &'static str {
        match self {
            TrendIndicator::Positive => "▲",
            TrendIndicator::Negative => "▼",
            TrendIndicator::Neutral => "▶",
        }
    }
}

/// A suggested transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub id: u32,
    pub player_in: String,
    pub player_out: String,
    pub reason: String,
    pub confidence: u8,
    #[serde(default)]
    pub trend: Trend,
}

impl SuggestionItem {
    /// Confidence clamped to a percentage
    pub fn confidence_percent(&self) -> u16 {
        u16::from(self.confidence.min(100))
    }
}

/// Current gameweek
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gameweek {
    pub number: u32,
    pub deadline: NaiveDateTime,
    /// Still open for transfers
    pub is_active: bool,
    pub days_left: u32,
}

impl Gameweek {
    /// Format the deadline for display
    pub fn formatted_deadline(&self) -> String {
        self.deadline.format("%-d %b %H:%M").to_string()
    }

    /// Time left before the deadline, or "closed" once it has passed
    pub fn countdown(&self) -> String {
        if self.is_active {
            format!("{}d", self.days_left)
        } else {
            "closed".to_string()
        }
    }
}

/// The manager's team at a glance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub name: String,
    pub points: u32,
    pub rank: u64,
    pub chip_used: Option<String>,
    pub value: f64,
}

impl TeamSummary {
    /// Rank with thousands separators, e.g. "#45,231"
    pub fn formatted_rank(&self) -> String {
        format!("#{}", format_thousands(self.rank))
    }

    /// Squad value in millions, e.g. "£102.8m"
    pub fn formatted_value(&self) -> String {
        format!("£{:.1}m", self.value)
    }
}

/// Navigation destinations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    AiAssistant,
    Team,
    Transfers,
    Fixtures,
    Stats,
    News,
    NotFound(String),
}

impl Route {
    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::AiAssistant => "/ai-assistant",
            Route::Team => "/team",
            Route::Transfers => "/transfers",
            Route::Fixtures => "/fixtures",
            Route::Stats => "/stats",
            Route::News => "/news",
            Route::NotFound(path) => path,
        }
    }

    /// Resolve a path to a route, unknown paths become `NotFound`
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Route::Home,
            "/ai-assistant" => Route::AiAssistant,
            "/team" => Route::Team,
            "/transfers" => Route::Transfers,
            "/fixtures" => Route::Fixtures,
            "/stats" => Route::Stats,
            "/news" => Route::News,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::AiAssistant => "AI Coach",
            Route::Team => "Team Details",
            Route::Transfers => "Transfers",
            Route::Fixtures => "Fixtures",
            Route::Stats => "Stats",
            Route::News => "News",
            Route::NotFound(_) => "Not Found",
        }
    }
}

// Helper functions

/// Format an integer with comma thousands separators
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
