//! Reusable UI widgets
//!
//! Contains common UI components used across screens:
//! - Cards
//! - Progress bars
//! - Status bar and flash messages
//! - Layout helpers

use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render a bordered card and return its inner area
pub fn render_card(frame: &mut Frame, title: Option<&str>, theme: &Theme, area: Rect) -> Rect {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.card_border())
        .style(theme.body());

    if let Some(title) = title {
        block = block
            .title(format!(" {} ", title))
            .title_style(theme.heading());
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Text progress bar, e.g. "██████░░░░" for 60% at width 10
pub fn progress_bar(percent: u16, width: usize) -> String {
    let filled = (percent.min(100) as usize * width / 100).min(width);
    let empty = width - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Render a flash message (bottom of screen)
pub fn render_flash_message(frame: &mut Frame, message: &str, theme: &Theme, area: Rect) {
    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let flash = Paragraph::new(Line::from(vec![
        Span::styled("→ ", theme.flash()),
        Span::styled(message, theme.flash()),
    ]))
    .style(theme.status());

    frame.render_widget(Clear, flash_area);
    frame.render_widget(flash, flash_area);
}

/// Render status bar at bottom
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: &str,
    theme: &Theme,
    area: Rect,
) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Clear the line first
    frame.render_widget(Clear, status_area);

    // Left side
    let left_widget = Paragraph::new(left_content).style(theme.status());

    // Right side
    let right_len = right_content.chars().count() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: 1,
    };
    let right_widget = Paragraph::new(right_content).style(theme.status());

    frame.render_widget(left_widget, status_area);
    frame.render_widget(right_widget, right_area);
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}

/// Helper: Create horizontal layout with given percentages
pub fn horizontal_split(area: Rect, percentages: &[u16]) -> Vec<Rect> {
    let constraints: Vec<Constraint> = percentages
        .iter()
        .map(|p| Constraint::Percentage(*p))
        .collect();

    Layout::horizontal(constraints).split(area).to_vec()
}

/// Helper: Shrink an area from the left and right
pub fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let margin = margin.min(area.width / 2);
    Rect {
        x: area.x + margin,
        y: area.y,
        width: area.width - 2 * margin,
        height: area.height,
    }
}
