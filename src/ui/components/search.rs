use crossterm::event::KeyCode;
use tui::backend::Backend;
use tui::layout::Rect;
use tui::style::Style;
use tui::text::Span;
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::Frame;

use crate::theme::Theme;

use super::Component;

const PLACEHOLDER: &str = "Search stations here....";

pub struct Search {
    value: String,
    theme: Theme,
    focused: bool,
}

impl Search {
    pub fn new(theme: Theme) -> Self {
        Self {
            value: String::new(),
            theme,
            focused: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Edits the term. Returns true if it changed, so the owner knows a
    /// new search is due.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) => {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => self.value.pop().is_some(),
            _ => false,
        }
    }
}

impl Component for Search {
    fn draw<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let content = if self.value.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(self.theme.muted))
        } else {
            Span::styled(self.value.as_str(), Style::default().fg(self.theme.text))
        };

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(self.theme.border(self.focused))
                .title("Search"),
        );

        frame.render_widget(paragraph, area);

        if self.focused {
            let offset = Span::raw(self.value.as_str()).width() as u16;
            let max = area.width.saturating_sub(2);

            frame.set_cursor(area.x + 1 + offset.min(max), area.y + 1);
        }
    }
}
