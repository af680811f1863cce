//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - The home dashboard, section by section
//! - Destination screens reached from links
//! - Status bar and flash messages

use crate::animation::{EntrancePhase, PULSE_PEAK};
use crate::app::App;
use crate::screen::{HomeScreen, Link, Section, SuggestionView, Visual};
use crate::types::{Route, Tab, TeamSummary};
use crate::ui::{theme::Theme, widgets};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Tabs, Wrap},
    Frame,
};
use std::time::Instant;
use tracing::trace;

/// Rows of content per suggestion, not counting the gap between items
const SUGGESTION_ROWS: u16 = 3;

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let theme = &app.theme;
    let area = frame.area();

    frame.render_widget(Block::default().style(theme.block_style()), area);

    // Main layout: content, status bar
    let layout = Layout::vertical([
        Constraint::Min(0),     // Content
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    match (app.current_route(), app.home()) {
        (Route::Home, Some(home)) => render_home(frame, home, theme, now, layout[0]),
        (route, _) => render_route(frame, route, theme, layout[0]),
    }

    render_status_bar(frame, app, layout[1]);

    if let Some((msg, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, theme, layout[1]);
    }
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.current_route() {
        Route::Home => {
            "[1-3] Tabs  [a] AI Coach  [v] Team  [t/f/s/n] Quick actions  [m] Theme  [q] Quit"
        }
        _ => "[Esc] Back  [H] Home  [m] Theme  [q] Quit",
    };

    widgets::render_status_bar(frame, hints, app.theme.name, &app.theme, area);
}

// === ANIMATION MAPPING ===

/// Rows the dashboard is pushed down during the slide-in
pub fn offset_rows(offset: f64) -> u16 {
    (offset.max(0.0) / 10.0).round() as u16
}

/// Columns trimmed from each side of the header; the header grows as the
/// pulse scale rises.
pub fn pulse_inset(scale: f64) -> u16 {
    let t = ((PULSE_PEAK - scale) / (PULSE_PEAK - 1.0)).clamp(0.0, 1.0);
    (t * 2.0).round() as u16
}

/// Rows a section needs
pub fn section_height(section: &Section) -> u16 {
    match section {
        Section::Header { .. } => 4,
        Section::Assistant { .. } => 6,
        Section::TabSelector { .. } => 1,
        Section::Content { items, .. } if items.is_empty() => 3,
        Section::Content { items, .. } => {
            let n = u16::try_from(items.len()).unwrap_or(u16::MAX);
            n.saturating_mul(SUGGESTION_ROWS)
                .saturating_add(n - 1)
                .saturating_add(2)
        }
        Section::TeamSummary { .. } => 5,
        Section::QuickActions(_) => 4,
    }
}

// === HOME DASHBOARD ===

fn render_home(frame: &mut Frame, home: &HomeScreen, theme: &Theme, now: Instant, area: Rect) {
    let visual = home.visual(now);
    trace!(entrance = ?visual.entrance, pulse = ?visual.pulse, "Drawing home");

    let theme = match visual.entrance {
        EntrancePhase::Settled => theme.clone(),
        _ => theme.with_opacity(visual.opacity),
    };

    // Slide the whole dashboard up from below
    let shift = offset_rows(visual.offset).min(area.height);
    let area = Rect {
        y: area.y + shift,
        height: area.height - shift,
        ..area
    };

    let sections = home.compose();
    let mut constraints: Vec<Constraint> = sections
        .iter()
        .map(|s| Constraint::Length(section_height(s)))
        .collect();
    constraints.push(Constraint::Min(0));
    let rects = Layout::vertical(constraints).split(area);

    for (section, rect) in sections.iter().zip(rects.iter()) {
        render_section(frame, section, &theme, &visual, *rect);
    }
}

fn render_section(frame: &mut Frame, section: &Section, theme: &Theme, visual: &Visual, area: Rect) {
    match section {
        Section::Header { subtitle, title, deadline } => {
            let area = widgets::inset_horizontal(area, pulse_inset(visual.pulse_scale));
            render_header(frame, subtitle, title, deadline, theme, area);
        }
        Section::Assistant { message, action } => {
            render_assistant(frame, message, action, theme, widgets::inset_horizontal(area, 1));
        }
        Section::TabSelector { tabs, active } => {
            render_tab_selector(frame, tabs, *active, theme, widgets::inset_horizontal(area, 1));
        }
        Section::Content { tab, items } => {
            render_content(frame, *tab, items, theme, widgets::inset_horizontal(area, 1));
        }
        Section::TeamSummary { team, action } => {
            render_team(frame, team, action, theme, widgets::inset_horizontal(area, 1));
        }
        Section::QuickActions(actions) => {
            render_quick_actions(frame, actions, theme, widgets::inset_horizontal(area, 1));
        }
    }
}

/// Gameweek header band
fn render_header(
    frame: &mut Frame,
    subtitle: &str,
    title: &str,
    deadline: &str,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .style(theme.header())
        .padding(Padding::new(2, 2, 0, 1));

    let lines = vec![
        Line::styled(subtitle, theme.header_subtitle()),
        Line::styled(title, theme.header_title()),
        Line::styled(format!("◷ {}", deadline), theme.header()),
    ];

    let header = Paragraph::new(lines).block(block);
    frame.render_widget(header, area);
}

/// AI assistant card with its call to action
fn render_assistant(frame: &mut Frame, message: &str, action: &Link, theme: &Theme, area: Rect) {
    let inner = widgets::render_card(frame, Some("AI ASSISTANT"), theme, area);

    let layout = Layout::vertical([
        Constraint::Min(1),     // Message
        Constraint::Length(1),  // Button
    ])
    .split(inner);

    let quote = Paragraph::new(Line::styled(format!("\"{}\"", message), theme.quote()))
        .wrap(Wrap { trim: true });
    frame.render_widget(quote, layout[0]);

    frame.render_widget(link_button(action, theme), layout[1]);
}

/// Transfers | Captain | Differentials
fn render_tab_selector(frame: &mut Frame, tabs: &[Tab], active: Tab, theme: &Theme, area: Rect) {
    let titles: Vec<Line> = tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if *tab == active {
                theme.tab_active()
            } else {
                theme.tab_inactive()
            };
            Line::styled(format!(" [{}] {} {} ", i + 1, tab_icon(*tab), tab.label()), style)
        })
        .collect();

    let widget = Tabs::new(titles)
        .select(active.index())
        .divider(" ")
        .style(theme.tab_inactive())
        .highlight_style(theme.tab_active());

    frame.render_widget(widget, area);
}

fn tab_icon(tab: Tab) -> &'static str {
    match tab {
        Tab::Transfers => "⇄",
        Tab::Captain => "©",
        Tab::Differentials => "↗",
    }
}

/// Items under the selected tab
fn render_content(frame: &mut Frame, tab: Tab, items: &[SuggestionView], theme: &Theme, area: Rect) {
    let inner = widgets::render_card(frame, Some(tab.label()), theme, area);

    if items.is_empty() {
        let empty = Paragraph::new(format!("No {} picks yet", tab.label().to_lowercase()))
            .style(theme.secondary())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let mut lines = Vec::new();
    for (i, view) in items.iter().enumerate() {
        if i > 0 {
            lines.push(Line::raw(""));
        }
        lines.extend(suggestion_lines(view, theme, inner.width));
    }

    frame.render_widget(Paragraph::new(lines).style(theme.body()), inner);
}

fn suggestion_lines(view: &SuggestionView, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let item = &view.item;
    let bar_width = (width as usize).saturating_sub(8).min(40);

    vec![
        Line::from(vec![
            Span::styled(format!(" {:>3}% ", item.confidence_percent()), theme.badge()),
            Span::styled(format!("{} ", view.indicator.symbol()), theme.trend(view.indicator)),
            Span::styled("  OUT ", theme.player_out()),
            Span::styled(item.player_out.clone(), theme.body()),
            Span::styled("  ⇄  ", theme.heading()),
            Span::styled("IN ", theme.player_in()),
            Span::styled(item.player_in.clone(), theme.body()),
        ]),
        Line::styled(format!("        {}", item.reason), theme.secondary()),
        Line::styled(
            format!("        {}", widgets::progress_bar(item.confidence_percent(), bar_width)),
            theme.badge(),
        ),
    ]
}

/// Team summary card
fn render_team(frame: &mut Frame, team: &TeamSummary, action: &Link, theme: &Theme, area: Rect) {
    let inner = widgets::render_card(frame, None, theme, area);

    let mut title = vec![Span::styled(team.name.clone(), theme.heading())];
    if let Some(chip) = &team.chip_used {
        title.push(Span::raw("  "));
        title.push(Span::styled(format!("[{}]", chip), theme.badge()));
    }

    let stat = |value: String, label: &'static str| {
        vec![
            Span::styled(value, theme.heading()),
            Span::styled(format!(" {}    ", label), theme.secondary()),
        ]
    };
    let mut stats = stat(team.points.to_string(), "POINTS");
    stats.extend(stat(team.formatted_rank(), "RANK"));
    stats.extend(stat(team.formatted_value(), "VALUE"));

    let lines = vec![Line::from(title), Line::from(stats)];

    let layout = Layout::vertical([
        Constraint::Length(2),  // Name and stats
        Constraint::Length(1),  // Button
    ])
    .split(inner);

    frame.render_widget(Paragraph::new(lines).style(theme.body()), layout[0]);
    frame.render_widget(link_button(action, theme), layout[1]);
}

/// Quick action grid
fn render_quick_actions(frame: &mut Frame, actions: &[Link], theme: &Theme, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(1),  // Title
        Constraint::Min(3),     // Grid
    ])
    .split(area);

    let title = Paragraph::new(Line::styled(" QUICK ACTIONS", theme.heading()))
        .style(theme.block_style());
    frame.render_widget(title, layout[0]);

    if actions.is_empty() {
        return;
    }

    let share = 100 / u16::try_from(actions.len()).unwrap_or(u16::MAX);
    let columns = widgets::horizontal_split(layout[1], &vec![share; actions.len()]);
    for (action, column) in actions.iter().zip(columns) {
        let inner = widgets::render_card(frame, None, theme, column);
        let label = Paragraph::new(Line::from(vec![
            Span::styled(action.label, theme.heading()),
            Span::styled(format!(" [{}]", action.key), theme.secondary()),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(label, inner);
    }
}

fn link_button<'a>(link: &Link, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(Line::from(vec![
        Span::styled(format!("  {} →  ", link.label), theme.button()),
        Span::styled(format!(" [{}]", link.key), theme.secondary()),
    ]))
    .alignment(Alignment::Center)
}

// === DESTINATIONS ===

/// Placeholder for routes outside the dashboard
fn render_route(frame: &mut Frame, route: &Route, theme: &Theme, area: Rect) {
    frame.render_widget(Block::default().style(theme.route_body()), area);

    let message = match route {
        Route::NotFound(_) => "This screen doesn't exist.",
        _ => "Nothing to show here yet.",
    };

    let block = Block::default()
        .title(format!(" {} ", route.title()))
        .title_style(theme.route_title())
        .borders(Borders::ALL)
        .border_style(theme.card_border().bg(theme.content_bg))
        .style(theme.route_body());

    let lines = vec![
        Line::raw(""),
        Line::styled(route.path().to_string(), theme.route_title()),
        Line::raw(""),
        Line::styled(message, theme.route_body()),
        Line::raw(""),
        Line::styled("[Esc] Back", theme.route_body()),
    ];

    let popup = widgets::centered_rect(48, 9, area);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(widget, popup);
}
