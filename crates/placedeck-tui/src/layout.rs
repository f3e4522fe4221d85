//! Main shell layout.
//!
//! Regions:
//! 1. Status Bar (top, 1 line)
//! 2. Transcript Pane (left) + Places Panel (right, only while open)
//! 3. Footer Hints (bottom, 1 line)
//!
//! The panel's open flag reflows the whole row: while the panel is closed
//! the transcript takes the full width, which is the terminal analog of a
//! page-level "panel open" layout class.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};

use crate::app::App;
use crate::panel::PanelPane;
use crate::transcript::TranscriptPane;
use crate::theme::Theme;

/// Minimum terminal width.
pub const MIN_WIDTH: u16 = 40;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 10;

/// Computed shell regions for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellAreas {
    pub status: Rect,
    pub transcript: Rect,
    /// Present only while the panel is open.
    pub panel: Option<Rect>,
    pub footer: Rect,
}

/// Split the terminal into shell regions.
#[must_use]
pub fn compute_areas(area: Rect, panel_open: bool, panel_percent: u16) -> ShellAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Main area (expands)
            Constraint::Length(1), // Footer hints
        ])
        .split(area);

    if panel_open {
        let percent = panel_percent.clamp(20, 80);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(100 - percent),
                Constraint::Percentage(percent),
            ])
            .split(rows[1]);
        ShellAreas {
            status: rows[0],
            transcript: columns[0],
            panel: Some(columns[1]),
            footer: rows[2],
        }
    } else {
        ShellAreas {
            status: rows[0],
            transcript: rows[1],
            panel: None,
            footer: rows[2],
        }
    }
}

/// Render the main shell layout.
pub fn render_shell(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, &app.theme);
        return;
    }

    let areas = compute_areas(
        area,
        app.panel.is_shown(),
        app.config.panel.width_percent,
    );

    // Hit regions must match this frame's geometry exactly.
    match areas.panel {
        Some(panel_area) => app.rebuild_hit_map(panel_area),
        None => app.hit_map.clear(),
    }

    let status_bar = StatusBar::new(app);
    frame.render_widget(status_bar, areas.status);

    let transcript = TranscriptPane::new(&app.transcript, &app.theme).scroll(app.transcript_scroll);
    frame.render_widget(transcript, areas.transcript);

    if let Some(panel_area) = areas.panel {
        if let Some(surface) = app.panel.surface() {
            let pane = PanelPane::new(surface.content(), &app.theme)
                .icons(app.icons)
                .selected(app.selected)
                .scroll(app.panel_scroll);
            frame.render_widget(pane, panel_area);
        }
    }

    let footer = FooterHints::new(&app.theme, app.panel.is_shown());
    frame.render_widget(footer, areas.footer);

    if app.show_help {
        render_help_overlay(frame, &app.theme);
    }
}

/// Render "terminal too small" warning.
fn render_too_small(frame: &mut Frame<'_>, theme: &Theme) {
    let warning = Paragraph::new(Line::from(Span::styled(
        format!("Terminal too small (min {MIN_WIDTH}x{MIN_HEIGHT})"),
        Style::default().fg(theme.warning),
    )));
    frame.render_widget(warning, frame.area());
}

/// Single-line status bar.
struct StatusBar<'a> {
    app: &'a App,
}

impl<'a> StatusBar<'a> {
    fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.app;
        let theme = &app.theme;

        let mut spans = vec![
            Span::styled(
                " placedeck ",
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("· {} ", app.panel.mode()), Style::default().fg(theme.subtext)),
        ];

        let count = app.results.len();
        if count > 0 {
            let noun = if count == 1 { "place" } else { "places" };
            spans.push(Span::styled(
                format!("· {count} {noun} "),
                Style::default().fg(theme.subtext),
            ));
        }
        if let Some(at) = app.updated_at {
            spans.push(Span::styled(
                format!("· updated {} ", at.format("%H:%M:%S")),
                Style::default().fg(theme.muted),
            ));
        }
        if let Some(notification) = &app.notification {
            spans.push(Span::styled(
                format!("· {notification} "),
                Style::default().fg(theme.warning),
            ));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.base))
            .render(area, buf);
    }
}

/// Footer with keybinding hints.
struct FooterHints<'a> {
    theme: &'a Theme,
    panel_shown: bool,
}

impl<'a> FooterHints<'a> {
    fn new(theme: &'a Theme, panel_shown: bool) -> Self {
        Self { theme, panel_shown }
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let mut hints: Vec<(&str, &str)> = vec![("p", "Panel")];
        if self.panel_shown {
            hints.push(("j/k", "Select"));
            hints.push(("Enter", "Open"));
            hints.push(("y", "Copy"));
        }
        hints.push(("?", "Help"));
        hints.push(("q", "Quit"));

        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints {
            spans.push(Span::styled("[", Style::default().fg(theme.muted)));
            spans.push(Span::styled(key, Style::default().fg(theme.primary)));
            spans.push(Span::styled("] ", Style::default().fg(theme.muted)));
            spans.push(Span::styled(label, Style::default().fg(theme.subtext)));
            spans.push(Span::raw("  "));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.base))
            .render(area, buf);
    }
}

/// Centered help overlay.
fn render_help_overlay(frame: &mut Frame<'_>, theme: &Theme) {
    let area = frame.area();
    let width = 36.min(area.width);
    let height = 10.min(area.height);
    let overlay = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(theme.primary))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.base));

    let lines = vec![
        Line::from(""),
        Line::from("  p       toggle the places panel"),
        Line::from("  j/k     select a card"),
        Line::from("  Enter   open the selected place"),
        Line::from("  y       copy the detail link"),
        Line::from("  ?       toggle this help"),
        Line::from("  q       quit"),
    ];
    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(theme.text))
        .block(block);
    frame.render_widget(paragraph, overlay);
}
