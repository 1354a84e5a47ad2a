//! Menu Tree
//!
//! Arena that owns every open menu. Menus reference each other through
//! `MenuId` handles; the tree keeps the parent/child links consistent and
//! tracks the fixed set of root menu slots.

use super::menu::{MenuId, MenuNode, Position};
use super::row::{RowId, RowItem};

#[derive(Debug, Clone)]
pub struct MenuTree {
    /// Closed menus leave a `None` behind; slots are never reused
    menus: Vec<Option<MenuNode>>,

    /// Root menu slots in Tab order (empty = not open)
    roots: Vec<Option<MenuId>>,

    /// Menu whose search box has input focus
    search_focus: Option<MenuId>,

    next_row_id: u64,
}

impl MenuTree {
    /// Create a tree with a fixed number of root slots
    pub fn new(root_slots: usize) -> Self {
        Self {
            menus: Vec::new(),
            roots: vec![None; root_slots],
            search_focus: None,
            next_row_id: 0,
        }
    }

    pub fn get(&self, id: MenuId) -> Option<&MenuNode> {
        self.menus.get(id.0).and_then(|m| m.as_ref())
    }

    pub fn get_mut(&mut self, id: MenuId) -> Option<&mut MenuNode> {
        self.menus.get_mut(id.0).and_then(|m| m.as_mut())
    }

    pub fn contains(&self, id: MenuId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over all open menus
    pub fn menus(&self) -> impl Iterator<Item = (MenuId, &MenuNode)> {
        self.menus
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.as_ref().map(|m| (MenuId(i), m)))
    }

    fn insert(&mut self, node: MenuNode) -> MenuId {
        self.menus.push(Some(node));
        MenuId(self.menus.len() - 1)
    }

    /// Open a root menu in `slot`, closing whatever occupied it
    ///
    /// Returns `None` when the slot is outside the fixed root set.
    pub fn add_root(&mut self, slot: usize, position: Position) -> Option<MenuId> {
        if slot >= self.roots.len() {
            return None;
        }
        if let Some(previous) = self.roots[slot] {
            self.close_menu(previous);
        }
        let id = self.insert(MenuNode::new(0, position));
        self.roots[slot] = Some(id);
        Some(id)
    }

    pub fn roots(&self) -> &[Option<MenuId>] {
        &self.roots
    }

    /// Open root menus in slot order, skipping empty slots
    pub fn populated_roots(&self) -> Vec<MenuId> {
        self.roots
            .iter()
            .flatten()
            .copied()
            .filter(|id| self.contains(*id))
            .collect()
    }

    /// Walk parent links up to the root menu of the cascade
    pub fn root_of(&self, id: MenuId) -> Option<MenuId> {
        let mut current = id;
        loop {
            let menu = self.get(current)?;
            match menu.parent {
                Some(parent) => current = parent,
                None => return Some(current),
            }
        }
    }

    pub fn push_row(&mut self, menu: MenuId, label: &str) -> Option<RowId> {
        let id = RowId(self.next_row_id);
        let node = self.get_mut(menu)?;
        node.rows.push(RowItem::new(id, label.to_string()));
        self.next_row_id += 1;
        Some(id)
    }

    /// Push a row that expands into a submenu
    pub fn push_folder(&mut self, menu: MenuId, label: &str) -> Option<RowId> {
        let id = self.push_row(menu, label)?;
        if let Some(row) = self.row_mut(menu, id) {
            row.is_pointing_to_folder = true;
        }
        Some(id)
    }

    pub fn row(&self, menu: MenuId, row: RowId) -> Option<&RowItem> {
        self.get(menu)?.get(row)
    }

    pub fn row_mut(&mut self, menu: MenuId, row: RowId) -> Option<&mut RowItem> {
        self.get_mut(menu)?.get_mut(row)
    }

    /// Open the submenu of `row`, replacing any submenu `parent` already shows
    pub fn open_submenu(
        &mut self,
        parent: MenuId,
        row: RowId,
        position: Position,
    ) -> Option<MenuId> {
        let parent_node = self.get(parent)?;
        parent_node.get(row)?;
        let depth = parent_node.depth + 1;

        if let Some(previous) = parent_node.child {
            self.close_menu(previous);
        }

        let mut node = MenuNode::new(depth, position);
        node.parent = Some(parent);
        let id = self.insert(node);

        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.child = Some(id);
            if let Some(opener) = parent_node.get_mut(row) {
                opener.child_menu = Some(id);
                opener.is_submenu_open = true;
            }
        }
        Some(id)
    }

    /// Close a menu and every submenu below it
    ///
    /// Both sides of the parent/child link are cleared. Returns the closed
    /// menus, deepest first.
    pub fn close_menu(&mut self, id: MenuId) -> Vec<MenuId> {
        let mut closed = Vec::new();
        let Some(node) = self.get(id) else {
            return closed;
        };
        if let Some(child) = node.child {
            closed.extend(self.close_menu(child));
        }

        let Some(node) = self.menus.get_mut(id.0).and_then(|m| m.take()) else {
            return closed;
        };

        if let Some(parent) = node.parent.and_then(|p| self.get_mut(p)) {
            if parent.child == Some(id) {
                parent.child = None;
            }
            for row in parent.rows.iter_mut().filter(|r| r.child_menu == Some(id)) {
                row.child_menu = None;
                row.is_submenu_open = false;
            }
        }

        for slot in self.roots.iter_mut() {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        if self.search_focus == Some(id) {
            self.search_focus = None;
        }

        closed.push(id);
        closed
    }

    /// Close every menu and empty all root slots
    pub fn clear(&mut self) {
        self.menus.iter_mut().for_each(|menu| *menu = None);
        self.roots.iter_mut().for_each(|slot| *slot = None);
        self.search_focus = None;
    }

    /// Give input focus to a menu's search box
    pub fn focus_search_box(&mut self, id: MenuId) -> bool {
        if self.contains(id) {
            self.search_focus = Some(id);
            true
        } else {
            false
        }
    }

    pub fn search_focus(&self) -> Option<MenuId> {
        self.search_focus
    }

    pub fn set_search_text(&mut self, id: MenuId, text: &str) {
        if let Some(menu) = self.get_mut(id) {
            menu.search_text = text.to_string();
        }
    }

    /// Every row carrying the keyboard-selection flag
    pub fn selected_rows(&self) -> Vec<(MenuId, RowId)> {
        self.menus()
            .flat_map(|(id, menu)| {
                menu.rows
                    .iter()
                    .filter(|r| r.is_selected())
                    .map(move |r| (id, r.id()))
            })
            .collect()
    }
}
