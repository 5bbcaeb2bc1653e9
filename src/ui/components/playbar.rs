use tui::backend::Backend;
use tui::layout::{Alignment, Rect};
use tui::style::Style;
use tui::text::{Span, Spans};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::Frame;

use crate::models::Station;
use crate::player::PlaybackStatus;
use crate::theme::Theme;

use super::{truncate, Component};

const KEY_HINTS: &str = "Tab focus | Enter play | Space pause | q quit";

pub struct Playbar {
    theme: Theme,

    station: Option<String>,
    status: PlaybackStatus,
    is_paused: bool,
    error: Option<String>,
}

impl Playbar {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            station: None,
            status: PlaybackStatus::Idle,
            is_paused: false,
            error: None,
        }
    }

    pub fn set_station(&mut self, station: Option<&Station>) {
        self.station = station.map(|s| truncate(s.name.trim(), 40));
    }

    pub fn set_player_state(&mut self, status: PlaybackStatus, is_paused: bool) {
        self.status = status;
        self.is_paused = is_paused;
    }

    pub fn set_error(&mut self, error: Option<&str>) {
        self.error = error.map(str::to_string);
    }

    fn status_word(&self) -> &'static str {
        if self.station.is_none() {
            return "Idle";
        }

        if self.is_paused {
            return "Paused";
        }

        match self.status {
            PlaybackStatus::Idle => "Idle",
            PlaybackStatus::Buffering => "Buffering",
            PlaybackStatus::Loaded => "Loaded",
            PlaybackStatus::Playing => "Playing",
        }
    }

    fn now_playing(&self) -> String {
        self.station.as_ref().map_or_else(
            || "Select a Station".to_string(),
            |name| format!("Now Playing: {name}"),
        )
    }
}

impl Component for Playbar {
    fn draw<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let second_line = match self.error {
            Some(ref error) => Span::styled(error.as_str(), Style::default().fg(self.theme.error)),
            None => Span::styled(KEY_HINTS, Style::default().fg(self.theme.muted)),
        };

        let text = vec![
            Spans::from(Span::styled(
                self.now_playing(),
                Style::default().fg(self.theme.text),
            )),
            Spans::from(second_line),
        ];

        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title(format!("{:9}", self.status_word()))
                    .borders(Borders::LEFT | Borders::TOP | Borders::RIGHT)
                    .border_type(BorderType::Rounded)
                    .border_style(self.theme.border(false)),
            )
            .alignment(Alignment::Left);

        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(name: &str) -> Station {
        Station {
            uuid: "1".to_string(),
            name: name.to_string(),
            url_resolved: "https://x/stream".to_string(),
            country: "MM".to_string(),
            language: "Burmese".to_string(),
            clickcount: 5,
            votes: 10,
        }
    }

    #[test]
    fn prompts_for_a_station_when_nothing_is_tuned() {
        let playbar = Playbar::new(Theme::dark());

        assert_eq!(playbar.now_playing(), "Select a Station");
        assert_eq!(playbar.status_word(), "Idle");
    }

    #[test]
    fn shows_the_tuned_station() {
        let mut playbar = Playbar::new(Theme::dark());

        playbar.set_station(Some(&station("Cherry FM")));
        playbar.set_player_state(PlaybackStatus::Playing, false);

        assert_eq!(playbar.now_playing(), "Now Playing: Cherry FM");
        assert_eq!(playbar.status_word(), "Playing");
    }

    #[test]
    fn paused_wins_over_the_stream_stage() {
        let mut playbar = Playbar::new(Theme::dark());

        playbar.set_station(Some(&station("Cherry FM")));
        playbar.set_player_state(PlaybackStatus::Playing, true);

        assert_eq!(playbar.status_word(), "Paused");
    }

    #[test]
    fn buffering_is_reported_while_the_stream_opens() {
        let mut playbar = Playbar::new(Theme::dark());

        playbar.set_station(Some(&station("Cherry FM")));
        playbar.set_player_state(PlaybackStatus::Buffering, false);

        assert_eq!(playbar.status_word(), "Buffering");
    }

    #[test]
    fn long_station_names_are_cut() {
        let mut playbar = Playbar::new(Theme::dark());

        let name = "Myanmar National Broadcasting Service International";
        playbar.set_station(Some(&station(name)));

        assert_eq!(
            playbar.now_playing(),
            "Now Playing: Myanmar National Broadcasting Service In..."
        );
    }
}
