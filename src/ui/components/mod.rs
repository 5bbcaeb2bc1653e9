use tui::backend::Backend;
use tui::layout::Rect;
use tui::Frame;

pub use playbar::Playbar;
pub use search::Search;
pub use stations::Stations;
pub use table::Table;

mod playbar;
mod search;
mod stations;
mod table;

pub trait Component {
    fn draw<B: Backend>(&self, frame: &mut Frame<B>, area: Rect);
}

/// Cuts long values at `max_len` characters, marking the cut with an
/// ellipsis.
pub fn truncate(value: &str, max_len: usize) -> String {
    if value.chars().count() > max_len {
        let cut: String = value.chars().take(max_len).collect();
        format!("{cut}...")
    } else {
        value.to_string()
    }
}
