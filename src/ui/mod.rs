use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use components::{Component, Playbar, Search, Stations};

use crate::app;
use crate::theme::Theme;

mod components;

pub enum ActiveBlock {
    Search,
    Stations,
}

pub struct Ui {
    app: app::App,
    closed: bool,

    active: ActiveBlock,
    search: Search,
    stations: Stations,
    playbar: Playbar,
}

impl Ui {
    pub fn new(app: app::App, theme: Theme) -> Self {
        Self {
            app,
            closed: false,
            active: ActiveBlock::Search,
            search: Search::new(theme),
            stations: Stations::new(theme),
            playbar: Playbar::new(theme),
        }
    }

    pub async fn start(&mut self) -> anyhow::Result<()> {
        setup_terminal()?;

        let backend = CrosstermBackend::new(io::stdout());

        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor().context("hide cursor")?;

        let tick_rate = Duration::from_millis(250);
        let mut last_tick = Instant::now();

        // first load, with an empty term: whatever the directory rates
        // best for the configured country.
        self.app.search(self.search.value());

        loop {
            self.app.tick();
            self.sync_components();

            terminal.draw(|f| self.draw(f))?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                self.handle_event(event::read()?);

                if self.closed {
                    break;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }
        }

        self.app.release();

        shutdown_terminal()
    }

    fn sync_components(&mut self) {
        if self.app.stations() != self.stations.list() {
            self.stations.set_list(self.app.stations().to_vec());
        }

        self.stations.set_loading(self.app.is_loading());
        self.stations.set_playing(self.app.current());
        self.stations
            .set_focused(matches!(self.active, ActiveBlock::Stations));

        self.search
            .set_focused(matches!(self.active, ActiveBlock::Search));

        self.playbar.set_station(self.app.current());
        self.playbar
            .set_player_state(self.app.status(), self.app.is_paused());
        self.playbar.set_error(self.app.error());
    }

    fn draw<B: Backend>(&self, f: &mut Frame<B>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(f.size());

        self.search.draw(f, layout[0]);
        self.stations.draw(f, layout[1]);
        self.playbar.draw(f, layout[2]);
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match self.active {
                ActiveBlock::Search => match key.code {
                    KeyCode::Esc => self.closed = true,
                    KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                        self.active = ActiveBlock::Stations;
                    }
                    code => {
                        if self.search.handle_key(code) {
                            self.app.search(self.search.value());
                        }
                    }
                },
                ActiveBlock::Stations => match key.code {
                    KeyCode::Char('q') => self.closed = true,
                    KeyCode::Esc | KeyCode::Tab => self.active = ActiveBlock::Search,
                    KeyCode::Up => self.stations.handle_up(),
                    KeyCode::Down => self.stations.handle_down(),
                    KeyCode::Enter => {
                        if let Some(station) = self.stations.get_selected() {
                            self.app.select_station(station);
                        }
                    }
                    KeyCode::Char(' ') => self.app.toggle_play_pause(),
                    _ => {}
                },
            }
        }
    }
}

fn setup_terminal() -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("execute")?;
    enable_raw_mode().context("enable raw mode")?;

    std::panic::set_hook(Box::new(|info| {
        shutdown_terminal().expect("can't graceful shutdown terminal");
        eprintln!("{:?}", info);
    }));

    Ok(())
}

fn shutdown_terminal() -> anyhow::Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).context("execute")
}
