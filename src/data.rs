//! Dashboard content
//!
//! Everything the home screen shows comes through [`DashboardData`], so a
//! live source can replace [`StaticData`] without touching the renderer.

use crate::types::{Gameweek, SuggestionItem, TeamSummary, Trend};
use chrono::NaiveDate;

/// Source of the content shown on the dashboard
pub trait DashboardData {
    fn gameweek(&self) -> Gameweek;
    fn team(&self) -> TeamSummary;
    fn suggestions(&self) -> Vec<SuggestionItem>;
    fn assistant_message(&self) -> String;
}

/// Built-in sample content
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticData;

impl DashboardData for StaticData {
    fn gameweek(&self) -> Gameweek {
        let deadline = NaiveDate::from_ymd_opt(2025, 2, 10)
            .and_then(|d| d.and_hms_opt(11, 30, 0))
            .unwrap_or_default();
        Gameweek {
            number: 28,
            deadline,
            is_active: true,
            days_left: 2,
        }
    }

    fn team(&self) -> TeamSummary {
        TeamSummary {
            name: "Klopptimists FC".to_string(),
            points: 1580,
            rank: 45231,
            chip_used: Some("Bench Boost".to_string()),
            value: 102.8,
        }
    }

    fn suggestions(&self) -> Vec<SuggestionItem> {
        vec![
            suggestion(1, "Watkins", "Nketiah", "Better fixtures & form", 85, Trend::Up),
            suggestion(2, "Palmer", "Sterling", "Higher xGI per 90", 78, Trend::Up),
            suggestion(3, "Gabriel", "Chilwell", "Less rotation risk", 92, Trend::Steady),
        ]
    }

    fn assistant_message(&self) -> String {
        "Your team is strong but consider swapping Nketiah for Watkins to \
         capitalize on Villa's upcoming fixtures."
            .to_string()
    }
}

fn suggestion(
    id: u32,
    player_in: &str,
    player_out: &str,
    reason: &str,
    confidence: u8,
    trend: Trend,
) -> SuggestionItem {
    SuggestionItem {
        id,
        player_in: player_in.to_string(),
        player_out: player_out.to_string(),
        reason: reason.to_string(),
        confidence,
        trend,
    }
}
