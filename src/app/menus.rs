//! Menu construction and submenu lifecycle
//!
//! Root menus come from the config. Folder rows keep their configured
//! contents aside until Enter expands them into a submenu placed next to
//! the parent with `logic::layout::place_submenu`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::App;
use crate::config::RowSpec;
use crate::logic::cascade::Direction;
use crate::logic::layout::place_submenu;
use crate::model::{MenuId, Position, RowId, RowTarget};

/// Leaf row opened from the config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredItem {
    label: String,
    close_after_open: bool,
}

impl ConfiguredItem {
    pub fn new(label: &str, close_after_open: bool) -> Self {
        Self {
            label: label.to_string(),
            close_after_open,
        }
    }
}

impl RowTarget for ConfiguredItem {
    fn open(&self) -> bool {
        info!("opened {}", self.label);
        self.close_after_open
    }
}

impl App {
    pub(crate) fn build_root_menus(&mut self) {
        let menus = self.config.menus.clone();
        for (slot, spec) in menus.iter().enumerate() {
            match self.tree.add_root(slot, Position::new(spec.x, spec.y)) {
                Some(menu) => self.populate(menu, &spec.rows),
                None => warn!(
                    "menu {} ignored: only {} root slots",
                    slot, self.config.root_slots
                ),
            }
        }
    }

    fn populate(&mut self, menu: MenuId, rows: &[RowSpec]) {
        for spec in rows {
            match &spec.rows {
                Some(children) => {
                    if let Some(row) = self.tree.push_folder(menu, &spec.label) {
                        self.folders.insert(row, children.clone());
                    }
                }
                None => {
                    let Some(row) = self.tree.push_row(menu, &spec.label) else {
                        continue;
                    };
                    if let Some(item) = self.tree.row_mut(menu, row) {
                        item.target = Some(Arc::new(ConfiguredItem::new(
                            &spec.label,
                            spec.close_after_open,
                        )));
                    }
                }
            }
        }
    }

    /// Side the cascade is growing towards at `menu`
    fn cascade_direction(&self, menu: MenuId) -> Direction {
        let Some(node) = self.tree.get(menu) else {
            return Direction::Right;
        };
        match node.parent().and_then(|p| self.tree.get(p)) {
            Some(parent) if parent.position.x > node.position.x => Direction::Left,
            _ => Direction::Right,
        }
    }

    /// Open the submenu of a folder row
    ///
    /// The submenu starts at the row's height and on the side of the parent
    /// that has room for it. Returns `None` for rows that are not folders.
    pub fn expand_folder(&mut self, menu: MenuId, row: RowId) -> Option<MenuId> {
        let rows = self.folders.get(&row)?.clone();
        let node = self.tree.get(menu)?;
        let index = node.index_of(row)?;
        let width = self.config.menu_width;
        let placement = place_submenu(
            node.position.x,
            width,
            width,
            self.screen_width,
            self.cascade_direction(menu),
        );
        let y = node.position.y + index as i32;

        if let Some(previous) = node.child() {
            self.close_submenu(previous);
        }
        let child = self
            .tree
            .open_submenu(menu, row, Position::new(placement.x, y))?;
        self.populate(child, &rows);
        debug!(
            "expanded {:?} into {:?} at x={} ({:?})",
            row, child, placement.x, placement.direction
        );
        Some(child)
    }

    /// Close `menu` and its submenus, forgetting their folder contents
    pub fn close_submenu(&mut self, menu: MenuId) {
        let mut next = Some(menu);
        while let Some(id) = next {
            let Some(node) = self.tree.get(id) else {
                break;
            };
            for row in node.rows() {
                self.folders.remove(&row.id());
            }
            next = node.child();
        }

        let closed = self.tree.close_menu(menu);
        if self.focus.menu().map_or(false, |m| closed.contains(&m)) {
            self.engine.reset_selection(&mut self.focus);
        }
    }

    /// Keyboard selection moved to `row`: an open submenu of another row goes away
    pub(crate) fn collapse_other_submenu(&mut self, menu: MenuId, row: RowId) {
        let Some(node) = self.tree.get(menu) else {
            return;
        };
        if let Some(child) = node.child() {
            if node.opener_row() != Some(row) {
                self.close_submenu(child);
            }
        }
    }

    /// Hotkey brings the menus back to their initial state
    pub(crate) fn reopen(&mut self) {
        self.engine.clear_selection(&mut self.tree, &self.focus);
        self.engine.reset_selection(&mut self.focus);

        for root in self.tree.populated_roots() {
            if let Some(child) = self.tree.get(root).and_then(|n| n.child()) {
                self.close_submenu(child);
            }
            self.tree.set_search_text(root, "");
        }
        if let Some(first) = self.tree.populated_roots().first() {
            self.tree.focus_search_box(*first);
        }
        self.should_quit = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::config::Config;
    use crate::model::RowTarget;

    use super::ConfiguredItem;

    const MENUS: &str = r#"
menu_width: 10
menus:
  - x: 0
    rows:
      - label: Apple
      - label: Fruit
        rows:
          - label: Banana
          - label: Berries
            rows:
              - label: Blueberry
"#;

    fn app(screen_width: u16) -> App {
        App::new(Config::from_yaml(MENUS).unwrap(), None, screen_width)
    }

    #[test]
    fn test_root_menus_from_config() {
        let app = app(80);
        let roots = app.tree.populated_roots();
        assert_eq!(roots.len(), 1);
        let root = app.tree.get(roots[0]).unwrap();
        assert_eq!(root.labels(), vec!["Apple", "Fruit"]);
        assert!(root.row(1).unwrap().is_pointing_to_folder);
        assert!(root.row(0).unwrap().target.is_some());
    }

    #[test]
    fn test_expand_folder_places_submenu_right() {
        let mut app = app(80);
        let root = app.tree.populated_roots()[0];
        let fruit = app.tree.get(root).unwrap().row(1).unwrap().id();

        let child = app.expand_folder(root, fruit).unwrap();
        let node = app.tree.get(child).unwrap();
        assert_eq!(node.position.x, 10);
        assert_eq!(node.position.y, 1);
        assert_eq!(node.labels(), vec!["Banana", "Berries"]);
        assert_eq!(node.parent(), Some(root));
    }

    #[test]
    fn test_expand_flips_left_at_screen_edge() {
        let mut app = app(25);
        let root = app.tree.populated_roots()[0];
        let fruit = app.tree.get(root).unwrap().row(1).unwrap().id();
        let child = app.expand_folder(root, fruit).unwrap();
        let berries = app.tree.get(child).unwrap().row(1).unwrap().id();

        // 10 + 10 + 10 > 25
        let grandchild = app.expand_folder(child, berries).unwrap();
        assert_eq!(app.tree.get(grandchild).unwrap().position.x, 0);
    }

    #[test]
    fn test_leaf_rows_do_not_expand() {
        let mut app = app(80);
        let root = app.tree.populated_roots()[0];
        let apple = app.tree.get(root).unwrap().row(0).unwrap().id();
        assert_eq!(app.expand_folder(root, apple), None);
    }

    #[test]
    fn test_close_submenu_forgets_nested_folders() {
        let mut app = app(80);
        let root = app.tree.populated_roots()[0];
        let fruit = app.tree.get(root).unwrap().row(1).unwrap().id();
        let child = app.expand_folder(root, fruit).unwrap();
        let berries = app.tree.get(child).unwrap().row(1).unwrap().id();

        app.close_submenu(child);
        assert!(!app.tree.contains(child));
        assert_eq!(app.expand_folder(child, berries), None);

        // Reopening the folder works again
        assert!(app.expand_folder(root, fruit).is_some());
    }

    #[test]
    fn test_configured_item_close_after_open() {
        assert!(ConfiguredItem::new("a", true).open());
        assert!(!ConfiguredItem::new("b", false).open());
    }
}
