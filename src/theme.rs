use clap::ValueEnum;
use tui::style::{Color, Modifier, Style};

/// Palette selection, picked on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Light,
    Dark,
}

impl Kind {
    pub fn palette(self) -> Theme {
        match self {
            Self::Light => Theme::light(),
            Self::Dark => Theme::dark(),
        }
    }
}

/// Colors of the ui. Handed to every component explicitly, so a component
/// renders the same wherever it is mounted.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub playing: Color,
    pub error: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            text: Color::Rgb(51, 51, 51),
            muted: Color::Rgb(128, 128, 128),
            accent: Color::Rgb(190, 40, 190),
            playing: Color::Rgb(0, 190, 150),
            error: Color::Red,
        }
    }

    pub fn dark() -> Self {
        Self {
            text: Color::Rgb(242, 242, 242),
            muted: Color::Rgb(191, 191, 191),
            accent: Color::Rgb(255, 80, 255),
            playing: Color::Rgb(0, 190, 150),
            error: Color::Red,
        }
    }

    pub fn highlight(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        }
    }
}
