//! Menu Model
//!
//! One on-screen cascading menu: its rows, where it sits on screen, and its
//! links into the menu hierarchy.

use super::row::{RowId, RowItem};

/// Non-owning handle to a menu stored in a `MenuTree`
///
/// Handles are never reused, so a handle to a closed menu simply resolves to
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(pub(crate) usize);

/// Screen position of a menu window (top-left corner)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A menu window
#[derive(Debug, Clone)]
pub struct MenuNode {
    pub(crate) rows: Vec<RowItem>,
    pub(crate) depth: usize,
    pub position: Position,
    pub(crate) parent: Option<MenuId>,
    pub(crate) child: Option<MenuId>,

    /// Text typed into this menu's search box (the prefix filter)
    pub search_text: String,

    /// Rows the view currently shows as highlighted
    highlighted: Vec<RowId>,

    /// Last row the view was asked to scroll to
    scroll_target: Option<RowId>,
}

impl MenuNode {
    pub(crate) fn new(depth: usize, position: Position) -> Self {
        Self {
            rows: Vec::new(),
            depth,
            position,
            parent: None,
            child: None,
            search_text: String::new(),
            highlighted: Vec::new(),
            scroll_target: None,
        }
    }

    pub fn rows(&self) -> &[RowItem] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&RowItem> {
        self.rows.get(index)
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> Option<&mut RowItem> {
        self.rows.get_mut(index)
    }

    pub fn index_of(&self, row: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id() == row)
    }

    pub fn get(&self, row: RowId) -> Option<&RowItem> {
        self.rows.iter().find(|r| r.id() == row)
    }

    pub(crate) fn get_mut(&mut self, row: RowId) -> Option<&mut RowItem> {
        self.rows.iter_mut().find(|r| r.id() == row)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    /// 0 = root menu
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<MenuId> {
        self.parent
    }

    pub fn child(&self) -> Option<MenuId> {
        self.child
    }

    pub fn highlighted(&self) -> &[RowId] {
        &self.highlighted
    }

    pub fn is_highlighted(&self, row: RowId) -> bool {
        self.highlighted.contains(&row)
    }

    /// Move a row to the end of the highlighted view
    pub fn highlight(&mut self, row: RowId) {
        self.unhighlight(row);
        self.highlighted.push(row);
    }

    pub fn unhighlight(&mut self, row: RowId) {
        self.highlighted.retain(|r| *r != row);
    }

    pub fn scroll_into_view(&mut self, row: RowId) {
        self.scroll_target = Some(row);
    }

    pub fn scroll_target(&self) -> Option<RowId> {
        self.scroll_target
    }

    /// Row whose submenu is currently open, if any
    pub fn opener_row(&self) -> Option<RowId> {
        self.rows.iter().find(|r| r.is_submenu_open).map(|r| r.id())
    }
}
