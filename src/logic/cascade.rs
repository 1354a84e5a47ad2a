//! Cascade direction logic
//!
//! Submenus open to the right of their parent when there is room and flip to
//! the left otherwise, so the hierarchy alone cannot tell which way Left and
//! Right should go. The decision is made from actual screen X positions.

use crate::model::{MenuId, MenuTree};

/// Horizontal arrow key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// What a Left/Right press means for the focused menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalMove {
    /// Move into the open submenu
    Descend,
    /// Move back to the parent menu
    Ascend,
    /// Edge root menu, nothing in that direction
    NoOp,
}

/// Classify a horizontal key press from the menus' screen positions
///
/// Right descends when the open submenu sits further right than `menu`, or
/// when `menu` itself sits further right than its parent (the cascade grows
/// rightwards). Left is the mirror image. Otherwise the key ascends from a
/// submenu and does nothing on a root menu.
///
/// # Examples
/// ```
/// use cascade_menu::logic::cascade::{classify_horizontal_move, Direction, HorizontalMove};
/// use cascade_menu::model::{MenuTree, Position};
///
/// let mut tree = MenuTree::new(1);
/// let root = tree.add_root(0, Position::new(100, 0)).unwrap();
/// let row = tree.push_folder(root, "Flipped").unwrap();
/// // Not enough room on the right: the submenu opened to the left
/// tree.open_submenu(root, row, Position::new(50, 0)).unwrap();
///
/// assert_eq!(classify_horizontal_move(Direction::Right, &tree, root), HorizontalMove::NoOp);
/// assert_eq!(classify_horizontal_move(Direction::Left, &tree, root), HorizontalMove::Descend);
/// ```
pub fn classify_horizontal_move(
    direction: Direction,
    tree: &MenuTree,
    menu: MenuId,
) -> HorizontalMove {
    let Some(node) = tree.get(menu) else {
        return HorizontalMove::NoOp;
    };

    let x = node.position.x;
    let child_x = node.child().and_then(|c| tree.get(c)).map(|c| c.position.x);
    let parent_x = node.parent().and_then(|p| tree.get(p)).map(|p| p.position.x);

    let descend = match direction {
        Direction::Right => {
            child_x.map_or(false, |cx| cx > x) || parent_x.map_or(false, |px| x > px)
        }
        Direction::Left => {
            child_x.map_or(false, |cx| cx < x) || parent_x.map_or(false, |px| x < px)
        }
    };

    if descend {
        HorizontalMove::Descend
    } else if node.depth() > 0 {
        HorizontalMove::Ascend
    } else {
        HorizontalMove::NoOp
    }
}
