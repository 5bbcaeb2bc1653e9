use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Rect};
use tui::style::Style;
use tui::text::{Span, Spans};
use tui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row};
use tui::Frame;

use crate::models::Station;
use crate::theme::Theme;

use super::{truncate, Component, Table};

pub struct Stations {
    table: Table<Station>,
    theme: Theme,

    focused: bool,
    loading: bool,
    playing_uuid: Option<String>,
}

impl Stations {
    pub fn new(theme: Theme) -> Self {
        Self {
            table: Table::new(),
            theme,
            focused: false,
            loading: false,
            playing_uuid: None,
        }
    }

    pub fn set_list(&mut self, list: Vec<Station>) {
        self.table.set_list(list);
    }

    pub fn list(&self) -> &[Station] {
        self.table.list()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_playing(&mut self, station: Option<&Station>) {
        self.playing_uuid = station.map(|s| s.uuid.clone());
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn handle_up(&mut self) {
        self.table.handle_up();
    }

    pub fn handle_down(&mut self) {
        self.table.handle_down();
    }

    pub fn get_selected(&self) -> Option<&Station> {
        self.table.get_selected()
    }

    fn title(&self) -> String {
        if self.loading && !self.table.list().is_empty() {
            "Stations (searching...)".to_string()
        } else {
            "Stations".to_string()
        }
    }

    fn build_rows(&self) -> Vec<Row> {
        self.table
            .list()
            .iter()
            .map(|s| {
                let playing = self.playing_uuid.as_deref() == Some(s.uuid.as_str());

                let name = if playing {
                    format!("🔊 {}", truncate(s.name.trim(), 32))
                } else {
                    truncate(s.name.trim(), 32)
                };

                let mut row = Row::new(vec![
                    Cell::from(Span::raw(name)),
                    Cell::from(Span::raw(truncate(&s.country, 12))),
                    Cell::from(Span::raw(truncate(&s.language, 12))),
                    Cell::from(Span::raw(s.clickcount.to_string())),
                    Cell::from(Span::raw(s.votes.to_string())),
                ]);

                if playing {
                    row = row.style(Style::default().fg(self.theme.playing));
                }

                row
            })
            .collect()
    }
}

impl Component for Stations {
    fn draw<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border(self.focused))
            .title(self.title());

        if self.loading && self.table.list().is_empty() {
            let text = vec![
                Spans::from(""),
                Spans::from(Span::styled(
                    "Loading Radio Stations...",
                    Style::default().fg(self.theme.muted),
                )),
            ];

            let paragraph = Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center);

            frame.render_widget(paragraph, area);
            return;
        }

        let table = tui::widgets::Table::new(self.build_rows())
            .header(
                Row::new(vec!["Name", "Country", "Language", "Clicks", "Votes"])
                    .style(Style::default().fg(self.theme.muted)),
            )
            .block(block)
            .highlight_style(self.theme.highlight())
            .widths(&[
                Constraint::Percentage(44),
                Constraint::Percentage(16),
                Constraint::Percentage(16),
                Constraint::Percentage(12),
                Constraint::Percentage(12),
            ]);

        frame.render_stateful_widget(table, area, &mut self.table.get_state());
    }
}
