//! Row Model
//!
//! A single selectable entry inside a menu. Selection flags are only written
//! by the navigation engine; everything else reads them through accessors.

use std::fmt;
use std::sync::Arc;

use super::menu::MenuId;

/// Stable identity of a row, unique across the whole menu tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub(crate) u64);

/// Open action behind a row (file, folder, shortcut...)
///
/// The engine never interprets what was opened, only whether the menu
/// should close afterwards.
pub trait RowTarget: Send + Sync {
    /// Open the target. Returns `true` when the menu should close after opening.
    fn open(&self) -> bool;
}

/// One entry of a menu
#[derive(Clone)]
pub struct RowItem {
    id: RowId,
    pub label: String,
    is_selected: bool,
    is_clicking: bool,
    /// Submenu spawned from this row (weak: resolves to nothing once closed)
    pub child_menu: Option<MenuId>,
    pub is_pointing_to_folder: bool,
    pub is_submenu_open: bool,
    pub target: Option<Arc<dyn RowTarget>>,
}

impl RowItem {
    pub(crate) fn new(id: RowId, label: String) -> Self {
        Self {
            id,
            label,
            is_selected: false,
            is_clicking: false,
            child_menu: None,
            is_pointing_to_folder: false,
            is_submenu_open: false,
            target: None,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Selected by keyboard navigation
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// Mouse button currently held down on this row
    pub fn is_clicking(&self) -> bool {
        self.is_clicking
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    pub(crate) fn set_clicking(&mut self, clicking: bool) {
        self.is_clicking = clicking;
    }

    /// Run the open action. Rows without a target never ask to close the menu.
    pub fn open(&self) -> bool {
        self.target.as_ref().map(|t| t.open()).unwrap_or(false)
    }
}

impl fmt::Debug for RowItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("is_selected", &self.is_selected)
            .field("is_clicking", &self.is_clicking)
            .field("child_menu", &self.child_menu)
            .field("is_pointing_to_folder", &self.is_pointing_to_folder)
            .field("is_submenu_open", &self.is_submenu_open)
            .field("target", &self.target.as_ref().map(|_| "<RowTarget>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CloseAfterOpen;

    impl RowTarget for CloseAfterOpen {
        fn open(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_new_row_is_unselected() {
        let row = RowItem::new(RowId(1), "Documents".to_string());
        assert!(!row.is_selected());
        assert!(!row.is_clicking());
        assert!(row.child_menu.is_none());
    }

    #[test]
    fn test_open_without_target_keeps_menu() {
        let row = RowItem::new(RowId(1), "readme.txt".to_string());
        assert!(!row.open());
    }

    #[test]
    fn test_open_forwards_target_result() {
        let mut row = RowItem::new(RowId(1), "notes.txt".to_string());
        row.target = Some(Arc::new(CloseAfterOpen));
        assert!(row.open());
    }

    #[test]
    fn test_debug_hides_target() {
        let mut row = RowItem::new(RowId(7), "app".to_string());
        row.target = Some(Arc::new(CloseAfterOpen));
        let dbg = format!("{:?}", row);
        assert!(dbg.contains("<RowTarget>"));
    }
}
