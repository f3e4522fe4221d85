//! Conversation transcript pane.
//!
//! Display-only history of the exchange with the agent. The newest message
//! sits at the bottom; scrolling moves a line offset back from the tail.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::Theme;

/// Who said it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Self::User => "you",
            Self::Agent => "agent",
        }
    }
}

/// One transcript entry.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            at: Local::now(),
        }
    }
}

/// The transcript pane.
pub struct TranscriptPane<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    /// Lines scrolled back from the bottom.
    scroll: usize,
}

impl<'a> TranscriptPane<'a> {
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            scroll: 0,
        }
    }

    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for message in self.messages {
            let role_style = match message.role {
                Role::User => Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
                Role::Agent => Style::default()
                    .fg(self.theme.success)
                    .add_modifier(Modifier::BOLD),
            };
            lines.push(Line::from(vec![
                Span::styled(message.role.label().to_string(), role_style),
                Span::styled(
                    format!("  {}", message.at.format("%H:%M:%S")),
                    Style::default().fg(self.theme.muted),
                ),
            ]));

            for wrapped in textwrap::wrap(&message.text, width.max(10)) {
                lines.push(Line::from(Span::styled(
                    wrapped.into_owned(),
                    Style::default().fg(self.theme.text),
                )));
            }
            lines.push(Line::from(""));
        }
        lines
    }
}

impl Widget for TranscriptPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Conversation ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.messages.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "Waiting for the agent…",
                Style::default().fg(self.theme.muted),
            )))
            .render(inner, buf);
            return;
        }

        // Bottom-anchored: show the tail, offset back by the scroll amount.
        let lines = self.build_lines(inner.width as usize);
        let visible = inner.height as usize;
        let end = lines.len().saturating_sub(self.scroll);
        let start = end.saturating_sub(visible);
        Paragraph::new(lines[start..end].to_vec()).render(inner, buf);
    }
}
