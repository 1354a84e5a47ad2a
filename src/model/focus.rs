//! Focus Model
//!
//! The "currently focused menu + currently focused row" pair. It is an
//! explicit value owned by the caller and handed to every navigation call,
//! so independent engines can run side by side.

use super::menu::MenuId;
use super::row::RowId;
use super::tree::MenuTree;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    pub(crate) menu: Option<MenuId>,
    pub(crate) row: Option<RowId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn menu(&self) -> Option<MenuId> {
        self.menu
    }

    pub fn row(&self) -> Option<RowId> {
        self.row
    }

    pub fn is_empty(&self) -> bool {
        self.menu.is_none() && self.row.is_none()
    }

    pub(crate) fn reset(&mut self) {
        self.menu = None;
        self.row = None;
    }

    /// Index of the focused row inside the focused menu
    pub fn row_index(&self, tree: &MenuTree) -> Option<usize> {
        let menu = tree.get(self.menu?)?;
        menu.index_of(self.row?)
    }

    /// Focused row still exists and still carries the keyboard-selection flag
    pub fn is_still_selected(&self, tree: &MenuTree) -> bool {
        match (self.menu, self.row) {
            (Some(menu), Some(row)) => tree
                .get(menu)
                .and_then(|m| m.get(row))
                .map(|r| r.is_selected())
                .unwrap_or(false),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    #[test]
    fn test_new_focus_is_empty() {
        let focus = FocusState::new();
        assert!(focus.is_empty());
        assert!(focus.menu().is_none());
        assert!(focus.row().is_none());
    }

    #[test]
    fn test_stale_focus_is_not_selected() {
        let mut tree = MenuTree::new(1);
        let root = tree.add_root(0, Position::new(0, 0)).unwrap();
        let row = tree.push_row(root, "a").unwrap();

        let focus = FocusState {
            menu: Some(root),
            row: Some(row),
        };
        assert_eq!(focus.row_index(&tree), Some(0));
        // Row exists but the engine never selected it
        assert!(!focus.is_still_selected(&tree));

        tree.close_menu(root);
        assert_eq!(focus.row_index(&tree), None);
        assert!(!focus.is_still_selected(&tree));
    }
}
