//! Keyboard Navigation Engine
//!
//! Turns key presses and typed characters into focus/selection changes
//! across the open menus and publishes a `NavEvent` for every step.
//!
//! There is no mode: each key is processed atomically against the current
//! `FocusState`. A key that finds a new row always runs the same sequence:
//! deselect notification for the old row, focus update, `is_selected` on the
//! new row, select notification, then clearing of the row that was focused
//! when the key press began. The final clear runs last so a single key press
//! can move focus across menus without leaving a stale selection behind.

use crossterm::event::{KeyCode, KeyModifiers};
use tracing::debug;

use crate::logic::cascade::{classify_horizontal_move, Direction, HorizontalMove};
use crate::logic::navigation::cycle_root;
use crate::logic::search;
use crate::messages::{EventBus, NavEvent, SubscriptionId};
use crate::model::{FocusState, MenuId, MenuTree, RowId};

/// Navigation keys routed through the selection logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavKey {
    Enter,
    Up,
    Down,
    Home,
    End,
    Left,
    Right,
    Close,
}

impl NavKey {
    /// Keys that may start from the source menu when nothing is selected yet
    fn starts_without_selection(self) -> bool {
        matches!(self, NavKey::Up | NavKey::Down | NavKey::Home | NavKey::End)
    }
}

/// Focus as it was when the key press began
#[derive(Debug, Clone, Copy)]
struct Before {
    menu: Option<MenuId>,
    row: Option<RowId>,
    index: Option<usize>,
    /// Keyboard selection was active at entry
    active: bool,
}

/// The keyboard navigation state machine
#[derive(Debug)]
pub struct NavigationEngine {
    events: EventBus,
    keep_selection_while_typing: bool,
    in_use: bool,
}

impl Default for NavigationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationEngine {
    pub fn new() -> Self {
        Self {
            events: EventBus::new(),
            keep_selection_while_typing: true,
            in_use: false,
        }
    }

    /// Keep the focused row while it still matches the typed prefix
    pub fn with_keep_selection_while_typing(mut self, keep: bool) -> Self {
        self.keep_selection_while_typing = keep;
        self
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&NavEvent) + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// True once any row has been selected by keyboard
    pub fn in_use(&self) -> bool {
        self.in_use
    }

    pub fn set_in_use(&mut self, in_use: bool) {
        self.in_use = in_use;
    }

    /// Global hotkey fired (already marshaled onto this thread)
    pub fn hotkey_pressed(&mut self) {
        self.events.publish(NavEvent::HotkeyPressed);
    }

    /// Route a key press received by `source`
    ///
    /// Keys are only handled when the modifiers match exactly; everything
    /// else is ignored. Returns whether the key was handled.
    pub fn process_key(
        &mut self,
        tree: &mut MenuTree,
        focus: &mut FocusState,
        source: MenuId,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> bool {
        let none = modifiers == KeyModifiers::NONE;
        match code {
            KeyCode::Enter if none => {
                let handled = self.select_by_key(tree, focus, source, Some(NavKey::Enter), "", false);
                if let Some(menu) = focus.menu {
                    self.focus_search_box(tree, menu);
                }
                handled
            }
            KeyCode::Up if none => self.select_by_key(tree, focus, source, Some(NavKey::Up), "", false),
            KeyCode::Down if none => {
                self.select_by_key(tree, focus, source, Some(NavKey::Down), "", false)
            }
            KeyCode::Home if none => {
                self.select_by_key(tree, focus, source, Some(NavKey::Home), "", false)
            }
            KeyCode::End if none => self.select_by_key(tree, focus, source, Some(NavKey::End), "", false),
            KeyCode::Left if none => {
                self.select_by_key(tree, focus, source, Some(NavKey::Left), "", false)
            }
            KeyCode::Right if none => {
                self.select_by_key(tree, focus, source, Some(NavKey::Right), "", false)
            }
            KeyCode::Esc if none => {
                self.select_by_key(tree, focus, source, Some(NavKey::Close), "", false)
            }
            KeyCode::F(4) if modifiers == KeyModifiers::ALT => {
                self.select_by_key(tree, focus, source, Some(NavKey::Close), "", false)
            }
            KeyCode::Char('f') | KeyCode::Char('F') if modifiers == KeyModifiers::CONTROL => {
                let menu = focus.menu.filter(|m| tree.contains(*m)).unwrap_or(source);
                self.focus_search_box(tree, menu)
            }
            KeyCode::Tab if none => self.cycle_root_menu(tree, source, false),
            KeyCode::Tab if modifiers == KeyModifiers::SHIFT => self.cycle_root_menu(tree, source, true),
            // Terminals report Shift+Tab as BackTab, usually with SHIFT set
            KeyCode::BackTab if none || modifiers == KeyModifiers::SHIFT => {
                self.cycle_root_menu(tree, source, true)
            }
            _ => false,
        }
    }

    /// Append a typed character to `menu`'s search text and jump to a match
    ///
    /// Returns whether the keyboard selection now sits on a matching row.
    pub fn process_typed_character(
        &mut self,
        tree: &mut MenuTree,
        focus: &mut FocusState,
        menu: MenuId,
        ch: char,
    ) -> bool {
        let Some(node) = tree.get_mut(menu) else {
            return false;
        };
        node.search_text.push(ch);
        let input = node.search_text.clone();
        self.select_by_key(tree, focus, menu, None, &input, self.keep_selection_while_typing)
    }

    /// The search box is about to change its text
    pub fn search_text_changing(&mut self, tree: &mut MenuTree, focus: &mut FocusState) {
        self.clear_selection(tree, focus);
    }

    /// The search box of `menu` changed its text
    ///
    /// An empty search clears the keyboard selection. Otherwise the first
    /// matching row is selected unless the focused row in this menu still
    /// matches.
    pub fn search_text_changed(
        &mut self,
        tree: &mut MenuTree,
        focus: &mut FocusState,
        menu: MenuId,
        is_empty: bool,
    ) {
        if is_empty {
            self.clear_selection(tree, focus);
            return;
        }

        let Some(node) = tree.get(menu) else {
            return;
        };
        let filter = node.search_text.clone();

        if focus.menu == Some(menu) && focus.is_still_selected(tree) {
            let still_matches = focus
                .row
                .and_then(|r| node.get(r))
                .map(|r| search::prefix_matches(&filter, &r.label))
                .unwrap_or(false);
            if still_matches {
                return;
            }
        }

        let first = search::find_forward(&node.labels(), 0, None, &filter)
            .and_then(|i| node.row(i))
            .map(|r| r.id());
        match first {
            Some(row) => {
                self.select(tree, focus, menu, row, true);
            }
            None => self.clear_selection(tree, focus),
        }
    }

    /// Explicit selection (mouse hover/click)
    ///
    /// Keyboard navigation continues from this row afterwards. Any previous
    /// keyboard selection elsewhere is cleared first.
    pub fn select(
        &mut self,
        tree: &mut MenuTree,
        focus: &mut FocusState,
        menu: MenuId,
        row: RowId,
        refresh_view: bool,
    ) -> bool {
        if tree.row(menu, row).is_none() {
            return false;
        }
        if focus.row != Some(row) || focus.menu != Some(menu) {
            self.clear_selection(tree, focus);
        }

        focus.menu = Some(menu);
        focus.row = Some(row);

        if let Some(node) = tree.get_mut(menu) {
            if let Some(item) = node.get_mut(row) {
                item.set_selected(true);
            }
            if refresh_view {
                node.highlight(row);
            }
        }
        true
    }

    /// Mouse button went down (or up) on a row
    pub fn set_clicking(
        &mut self,
        tree: &mut MenuTree,
        focus: &mut FocusState,
        menu: MenuId,
        row: RowId,
        clicking: bool,
    ) {
        if clicking {
            self.select(tree, focus, menu, row, true);
        }
        if let Some(item) = tree.row_mut(menu, row) {
            item.set_clicking(clicking);
        }
    }

    /// Forget the focus without touching rows or notifying (menu teardown)
    pub fn reset_selection(&mut self, focus: &mut FocusState) {
        focus.reset();
    }

    /// Drop the selection flags of the focused row
    pub fn clear_selection(&mut self, tree: &mut MenuTree, focus: &FocusState) {
        clear_row(tree, focus.menu, focus.row);
    }

    fn focus_search_box(&mut self, tree: &mut MenuTree, menu: MenuId) -> bool {
        if tree.focus_search_box(menu) {
            self.events.publish(NavEvent::SearchFocused { menu });
            true
        } else {
            false
        }
    }

    fn cycle_root_menu(&mut self, tree: &mut MenuTree, source: MenuId, shift: bool) -> bool {
        let roots = tree.populated_roots();
        let current = tree
            .root_of(source)
            .and_then(|root| roots.iter().position(|r| *r == root));
        match cycle_root(&roots, current, shift).copied() {
            Some(target) => self.focus_search_box(tree, target),
            None => false,
        }
    }

    fn select_by_key(
        &mut self,
        tree: &mut MenuTree,
        focus: &mut FocusState,
        source: MenuId,
        key: Option<NavKey>,
        key_input: &str,
        keep_selection: bool,
    ) -> bool {
        let before = Before {
            menu: focus.menu,
            row: focus.row,
            index: focus.row_index(tree),
            active: focus.is_still_selected(tree),
        };

        let typed_elsewhere = key.is_none() && before.active && before.menu != Some(source);
        let menu = if typed_elsewhere {
            // Typed text belongs to the menu it was typed into
            Some(source).filter(|s| tree.contains(*s))
        } else if before.active {
            if keep_selection {
                let label = before
                    .menu
                    .zip(before.row)
                    .and_then(|(m, r)| tree.row(m, r))
                    .map(|r| r.label.clone());
                if let Some(label) = label {
                    if search::prefix_matches(key_input, &label) {
                        return true;
                    }
                }
            }
            focus.menu
        } else {
            focus.reset();
            let from_source = key.map_or(true, NavKey::starts_without_selection);
            Some(source).filter(|s| from_source && tree.contains(*s))
        };

        let mut to_clear = false;
        let mut handled = false;

        match (key, menu) {
            (Some(NavKey::Enter), Some(menu)) => {
                if let Some(row) = focus.row {
                    self.enter(tree, &before, menu, row);
                    handled = true;
                }
            }
            (Some(NavKey::Up), Some(menu)) => {
                if let Some(row) = self.step(tree, focus, menu, false) {
                    self.moved(&before, menu, row, true);
                    to_clear = true;
                    handled = true;
                }
            }
            (Some(NavKey::Down), Some(menu)) => {
                if let Some(row) = self.step(tree, focus, menu, true) {
                    self.moved(&before, menu, row, true);
                    to_clear = true;
                    handled = true;
                }
            }
            (Some(NavKey::Home), Some(menu)) => {
                if let Some(row) = self.jump(tree, focus, menu, true) {
                    self.moved(&before, menu, row, true);
                    to_clear = true;
                    handled = true;
                }
            }
            (Some(NavKey::End), Some(menu)) => {
                if let Some(row) = self.jump(tree, focus, menu, false) {
                    self.moved(&before, menu, row, true);
                    to_clear = true;
                    handled = true;
                }
            }
            (Some(NavKey::Left), Some(menu)) => {
                to_clear = self.horizontal(tree, focus, &before, menu, Direction::Left);
                handled = true;
            }
            (Some(NavKey::Right), Some(menu)) => {
                to_clear = self.horizontal(tree, focus, &before, menu, Direction::Right);
                handled = true;
            }
            (Some(NavKey::Close), Some(_)) => {
                self.deselected(&before, true);
                focus.reset();
                to_clear = true;
                self.events.publish(NavEvent::ClosePressed);
                handled = true;
            }
            _ => {}
        }

        if !handled && !key_input.is_empty() {
            if let Some(menu) = menu {
                handled = self.typed_search(tree, focus, &before, menu, key_input, &mut to_clear);
            }
        }

        let moved = focus.menu != before.menu || focus.row != before.row;
        if before.active && to_clear && moved {
            clear_row(tree, before.menu, before.row);
        }

        handled
    }

    fn enter(&mut self, tree: &mut MenuTree, before: &Before, menu: MenuId, row: RowId) {
        let Some(item) = tree.row(menu, row) else {
            return;
        };

        if item.is_submenu_open || !item.is_pointing_to_folder {
            debug!("open row {:?} in menu {:?}", row, menu);
            if item.open() {
                self.events.publish(NavEvent::ClosePressed);
            }
        } else {
            self.moved(before, menu, row, true);
            self.events.publish(NavEvent::EnterPressed { menu, row });
        }
    }

    /// Up/Down with wrap-around using the menu's search text as filter
    fn step(
        &mut self,
        tree: &mut MenuTree,
        focus: &mut FocusState,
        menu: MenuId,
        forward: bool,
    ) -> Option<RowId> {
        let node = tree.get(menu)?;
        let labels = node.labels();
        let current = focus.row.and_then(|r| node.index_of(r));
        let found = if forward {
            search::find_forward_wrapping(&labels, current, current, &node.search_text)
        } else {
            search::find_backward_wrapping(&labels, current, current, &node.search_text)
        }?;
        mark_selected(tree, focus, menu, found)
    }

    /// Home/End: first or last matching row
    fn jump(
        &mut self,
        tree: &mut MenuTree,
        focus: &mut FocusState,
        menu: MenuId,
        first: bool,
    ) -> Option<RowId> {
        let node = tree.get(menu)?;
        let labels = node.labels();
        let found = if first {
            search::find_forward(&labels, 0, None, &node.search_text)
        } else {
            search::find_backward(&labels, labels.len().saturating_sub(1), None, &node.search_text)
        }?;
        let current = focus.row.and_then(|r| node.index_of(r));
        if current == Some(found) && focus.menu == Some(menu) {
            return None;
        }
        mark_selected(tree, focus, menu, found)
    }

    /// Left/Right: descend into the open submenu or ascend to the parent
    ///
    /// Returns whether focus moved.
    fn horizontal(
        &mut self,
        tree: &mut MenuTree,
        focus: &mut FocusState,
        before: &Before,
        menu: MenuId,
        direction: Direction,
    ) -> bool {
        let target = match classify_horizontal_move(direction, tree, menu) {
            HorizontalMove::Descend => self.descend_target(tree, focus, menu),
            HorizontalMove::Ascend => ascend_target(tree, menu),
            HorizontalMove::NoOp => None,
        };
        debug!("{:?} from menu {:?} -> {:?}", direction, menu, target);

        let Some((target_menu, index)) = target else {
            return false;
        };
        focus.row = None;
        match mark_selected(tree, focus, target_menu, index) {
            Some(row) => {
                self.moved(before, target_menu, row, true);
                true
            }
            None => {
                focus.row = before.row;
                false
            }
        }
    }

    /// Row to land on inside the open submenu of the focused row
    ///
    /// The submenu's highlighted row, else row 0. The search filter does not apply.
    fn descend_target(
        &self,
        tree: &MenuTree,
        focus: &FocusState,
        menu: MenuId,
    ) -> Option<(MenuId, usize)> {
        let node = tree.get(menu)?;
        let child = node.child()?;
        let from_selected = focus.row.and_then(|r| node.get(r)).and_then(|r| r.child_menu);
        if from_selected != Some(child) {
            return None;
        }

        let child_node = tree.get(child)?;
        let index = child_node
            .highlighted()
            .last()
            .and_then(|r| child_node.index_of(*r))
            .unwrap_or(0);
        child_node.row(index)?;
        Some((child, index))
    }

    fn typed_search(
        &mut self,
        tree: &mut MenuTree,
        focus: &mut FocusState,
        before: &Before,
        menu: MenuId,
        key_input: &str,
        to_clear: &mut bool,
    ) -> bool {
        if let Some(row) = self.find_typed(tree, focus, menu, key_input) {
            self.moved(before, menu, row, false);
            *to_clear = true;
            return true;
        }

        if !before.active || before.menu != Some(menu) {
            return false;
        }

        // Retry one row earlier than the previously focused row
        let previous_row = before
            .index
            .and_then(|i| i.checked_sub(1))
            .filter(|i| *i > 0)
            .and_then(|i| before.menu.and_then(|m| tree.get(m)).and_then(|m| m.row(i)))
            .map(|r| r.id());
        focus.row = previous_row;

        match self.find_typed(tree, focus, menu, key_input) {
            Some(row) => {
                self.moved(before, menu, row, false);
                *to_clear = Some(row) != before.row;
                true
            }
            None => {
                focus.row = before.row;
                false
            }
        }
    }

    fn find_typed(
        &mut self,
        tree: &mut MenuTree,
        focus: &mut FocusState,
        menu: MenuId,
        key_input: &str,
    ) -> Option<RowId> {
        let node = tree.get(menu)?;
        let current = focus.row.and_then(|r| node.index_of(r));
        let found = search::find_forward_wrapping(&node.labels(), current, current, key_input)?;
        mark_selected(tree, focus, menu, found)
    }

    /// Deselect-old / select-new notification pair
    fn moved(&mut self, before: &Before, menu: MenuId, row: RowId, with_menu: bool) {
        self.deselected(before, with_menu);
        self.in_use = true;
        self.events.publish(NavEvent::RowSelected { menu, row });
    }

    fn deselected(&mut self, before: &Before, with_menu: bool) {
        if before.active {
            self.events.publish(NavEvent::RowDeselected {
                previous_index: before.index,
                previous_menu: if with_menu { before.menu } else { None },
            });
        }
    }
}

/// Row in `menu`'s parent to re-select when ascending
///
/// Prefers the row the view shows as highlighted, then the row whose
/// submenu is open, then row 0. The search filter does not apply.
fn ascend_target(tree: &MenuTree, menu: MenuId) -> Option<(MenuId, usize)> {
    let parent = tree.get(menu)?.parent()?;
    let node = tree.get(parent)?;
    let index = node
        .highlighted()
        .last()
        .and_then(|r| node.index_of(*r))
        .or_else(|| node.opener_row().and_then(|r| node.index_of(r)))
        .unwrap_or(0);
    node.row(index)?;
    Some((parent, index))
}

/// Give the row at `index` the keyboard selection and move focus onto it
fn mark_selected(
    tree: &mut MenuTree,
    focus: &mut FocusState,
    menu: MenuId,
    index: usize,
) -> Option<RowId> {
    let node = tree.get_mut(menu)?;
    let row = node.row_mut(index)?;
    row.set_selected(true);
    let id = row.id();
    node.highlight(id);
    node.scroll_into_view(id);

    focus.menu = Some(menu);
    focus.row = Some(id);
    Some(id)
}

fn clear_row(tree: &mut MenuTree, menu: Option<MenuId>, row: Option<RowId>) {
    let (Some(menu), Some(row)) = (menu, row) else {
        return;
    };
    if let Some(node) = tree.get_mut(menu) {
        node.unhighlight(row);
        if let Some(item) = node.get_mut(row) {
            item.set_selected(false);
            item.set_clicking(false);
        }
    }
}
