//! Input routing
//!
//! Terminal key events are split into typed characters (search box input)
//! and navigation keys for the engine. Each entry point returns the
//! notifications the engine published while handling the input.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use super::App;
use crate::messages::NavEvent;
use crate::model::MenuId;
use crate::utils::truncate_label;

impl App {
    /// Menu that receives keyboard input
    ///
    /// The menu whose search box has focus, then the menu holding the
    /// keyboard selection, then the first open root menu.
    pub fn source_menu(&self) -> Option<MenuId> {
        self.tree
            .search_focus()
            .or_else(|| self.focus.menu().filter(|m| self.tree.contains(*m)))
            .or_else(|| self.tree.populated_roots().first().copied())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<NavEvent> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        let Some(source) = self.source_menu() else {
            if key.code == KeyCode::Esc {
                self.should_quit = true;
            }
            return Vec::new();
        };

        let typing = key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT;
        let handled = match key.code {
            KeyCode::Char(c) if typing => {
                self.engine
                    .process_typed_character(&mut self.tree, &mut self.focus, source, c)
            }
            KeyCode::Backspace if key.modifiers == KeyModifiers::NONE => {
                self.erase_search_character(source)
            }
            code => self.engine.process_key(
                &mut self.tree,
                &mut self.focus,
                source,
                code,
                key.modifiers,
            ),
        };
        debug!("{:?} in {:?} handled={}", key.code, source, handled);

        // Escape with nothing selected closes the menus
        if !handled && key.code == KeyCode::Esc {
            self.should_quit = true;
        }
        self.drain_events()
    }

    fn erase_search_character(&mut self, menu: MenuId) -> bool {
        let Some(mut text) = self.tree.get(menu).map(|n| n.search_text.clone()) else {
            return false;
        };
        if text.pop().is_none() {
            return false;
        }
        self.engine.search_text_changing(&mut self.tree, &mut self.focus);
        self.tree.set_search_text(menu, &text);
        self.engine
            .search_text_changed(&mut self.tree, &mut self.focus, menu, text.is_empty());
        true
    }

    /// The global hotkey fired (forwarded from the input thread)
    pub fn hotkey_activated(&mut self) -> Vec<NavEvent> {
        self.engine.hotkey_pressed();
        self.drain_events()
    }

    /// One-line description of a notification
    pub fn describe(&self, event: &NavEvent) -> String {
        let label = |menu: MenuId, row| {
            self.tree
                .row(menu, row)
                .map(|r| truncate_label(&r.label, usize::from(self.config.menu_width)))
                .unwrap_or_else(|| "?".to_string())
        };
        match event {
            NavEvent::HotkeyPressed => "hotkey pressed".to_string(),
            NavEvent::ClosePressed => "close".to_string(),
            NavEvent::RowSelected { menu, row } => format!("selected {}", label(*menu, *row)),
            NavEvent::RowDeselected {
                previous_index,
                previous_menu,
            } => match (previous_index, previous_menu) {
                (Some(index), Some(menu)) => format!("deselected row {} of {:?}", index, menu),
                (Some(index), None) => format!("deselected row {}", index),
                _ => "deselected".to_string(),
            },
            NavEvent::EnterPressed { menu, row } => format!("expand {}", label(*menu, *row)),
            NavEvent::SearchFocused { menu } => {
                let text = self
                    .tree
                    .get(*menu)
                    .map(|n| n.search_text.clone())
                    .unwrap_or_default();
                format!("search {:?}: {:?}", menu, text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::app::App;
    use crate::config::Config;
    use crate::messages::NavEvent;

    const MENUS: &str = r#"
menus:
  - x: 0
    rows:
      - label: Apple
      - label: Banana
      - label: Fruit
        rows:
          - label: Cherry
          - label: Date
      - label: Quit
        close_after_open: true
  - x: 60
    rows:
      - label: Other
"#;

    fn app() -> App {
        App::new(Config::from_yaml(MENUS).unwrap(), None, 120)
    }

    fn press(app: &mut App, code: KeyCode) -> Vec<NavEvent> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn selected_labels(app: &App) -> Vec<String> {
        app.tree
            .selected_rows()
            .into_iter()
            .filter_map(|(m, r)| app.tree.row(m, r).map(|r| r.label.clone()))
            .collect()
    }

    #[test]
    fn test_source_menu_defaults_to_first_root() {
        let app = app();
        assert_eq!(app.source_menu(), app.tree.populated_roots().first().copied());
    }

    #[test]
    fn test_down_selects_first_row() {
        let mut app = app();
        let events = press(&mut app, KeyCode::Down);
        assert!(matches!(events.as_slice(), [NavEvent::RowSelected { .. }]));
        assert_eq!(selected_labels(&app), vec!["Apple"]);
    }

    #[test]
    fn test_enter_expands_folder_and_right_descends() {
        let mut app = app();
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Up);
        assert_eq!(selected_labels(&app), vec!["Fruit"]);

        let events = press(&mut app, KeyCode::Enter);
        assert!(events
            .iter()
            .any(|e| matches!(e, NavEvent::EnterPressed { .. })));
        let root = app.tree.populated_roots()[0];
        let child = app.tree.get(root).unwrap().child().unwrap();
        assert_eq!(app.tree.get(child).unwrap().labels(), vec!["Cherry", "Date"]);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.focus.menu(), Some(child));
        assert_eq!(selected_labels(&app), vec!["Cherry"]);
    }

    #[test]
    fn test_moving_off_folder_collapses_submenu() {
        let mut app = app();
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        let root = app.tree.populated_roots()[0];
        assert!(app.tree.get(root).unwrap().child().is_some());

        press(&mut app, KeyCode::Up);
        assert_eq!(selected_labels(&app), vec!["Banana"]);
        assert!(app.tree.get(root).unwrap().child().is_none());
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(selected_labels(&app), vec!["Banana"]);

        press(&mut app, KeyCode::Backspace);
        let root = app.tree.populated_roots()[0];
        assert_eq!(app.tree.get(root).unwrap().search_text, "");
        assert!(selected_labels(&app).is_empty());
    }

    #[test]
    fn test_escape_closes() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        let events = press(&mut app, KeyCode::Esc);
        assert_eq!(events.last(), Some(&NavEvent::ClosePressed));
        assert!(app.should_quit);
    }

    #[test]
    fn test_escape_without_selection_quits() {
        let mut app = app();
        let events = press(&mut app, KeyCode::Esc);
        assert!(events.is_empty());
        assert!(app.should_quit);
    }

    #[test]
    fn test_enter_on_close_after_open_item() {
        let mut app = app();
        press(&mut app, KeyCode::End);
        let events = press(&mut app, KeyCode::Enter);
        assert!(events.contains(&NavEvent::ClosePressed));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_moves_to_other_root() {
        let mut app = app();
        let roots = app.tree.populated_roots();
        let events = press(&mut app, KeyCode::Tab);
        assert_eq!(events, vec![NavEvent::SearchFocused { menu: roots[1] }]);
        assert_eq!(app.source_menu(), Some(roots[1]));
    }

    #[test]
    fn test_typing_after_tab_searches_new_root() {
        let mut app = app();
        let roots = app.tree.populated_roots();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Char('o'));
        assert_eq!(selected_labels(&app), vec!["Other"]);
        assert_eq!(app.focus.menu(), Some(roots[1]));
        assert_eq!(app.tree.get(roots[0]).unwrap().search_text, "");
    }

    #[test]
    fn test_left_after_typing_in_submenu_returns_to_root() {
        let mut app = app();
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Right);
        assert_eq!(selected_labels(&app), vec!["Cherry"]);

        // Search box is still the root's, which has no "d" row
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(selected_labels(&app), vec!["Cherry"]);

        press(&mut app, KeyCode::Left);
        let root = app.tree.populated_roots()[0];
        assert_eq!(app.focus.menu(), Some(root));
        assert_eq!(selected_labels(&app), vec!["Fruit"]);
        assert!(app.tree.get(root).unwrap().child().is_some());
    }

    #[test]
    fn test_hotkey_resets_menus() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'));
        let events = app.hotkey_activated();
        assert_eq!(events, vec![NavEvent::HotkeyPressed]);
        assert!(selected_labels(&app).is_empty());
        assert!(app.focus.is_empty());
        let root = app.tree.populated_roots()[0];
        assert_eq!(app.tree.get(root).unwrap().search_text, "");
        assert_eq!(app.tree.search_focus(), Some(root));
    }

    #[test]
    fn test_describe_selection() {
        let mut app = app();
        let events = press(&mut app, KeyCode::Down);
        assert_eq!(app.describe(&events[0]), "selected Apple");
    }
}
