use tui::widgets::TableState;

/// List with a wrapping cursor. Rendering is up to the owner, this only
/// tracks the rows and the selection.
pub struct Table<T> {
    list: Vec<T>,
    state: TableState,
}

impl<T> Table<T> {
    pub fn new() -> Self {
        let mut state = TableState::default();
        state.select(Some(0));

        Self {
            list: vec![],
            state,
        }
    }

    pub fn set_list(&mut self, list: Vec<T>) {
        self.list = list;

        if !self.list.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn list(&self) -> &[T] {
        &self.list
    }

    pub fn handle_up(&mut self) {
        if self.list.is_empty() {
            return;
        }

        let idx = self.state.selected().unwrap_or(0);

        if idx == 0 {
            self.state.select(Some(self.list.len() - 1));
        } else {
            self.state.select(Some(idx - 1));
        }
    }

    pub fn handle_down(&mut self) {
        if self.list.is_empty() {
            return;
        }

        let idx = self.state.selected().unwrap_or(0);

        if idx >= self.list.len() - 1 {
            self.state.select(Some(0));
        } else {
            self.state.select(Some(idx + 1));
        }
    }

    pub fn get_selected(&self) -> Option<&T> {
        self.list.get(self.state.selected().unwrap_or(0))
    }

    pub fn get_state(&self) -> TableState {
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table<u32> {
        let mut table = Table::new();
        table.set_list(vec![1, 2, 3]);

        table
    }

    #[test]
    fn cursor_wraps_around() {
        let mut table = table();

        table.handle_up();
        assert_eq!(table.get_selected(), Some(&3));

        table.handle_down();
        assert_eq!(table.get_selected(), Some(&1));
        table.handle_down();
        assert_eq!(table.get_selected(), Some(&2));
    }

    #[test]
    fn empty_list_is_safe() {
        let mut table: Table<u32> = Table::new();

        table.handle_up();
        table.handle_down();

        assert_eq!(table.get_selected(), None);
    }

    #[test]
    fn new_list_resets_cursor() {
        let mut table = table();

        table.handle_down();
        table.set_list(vec![7, 8]);

        assert_eq!(table.get_selected(), Some(&7));
    }
}
