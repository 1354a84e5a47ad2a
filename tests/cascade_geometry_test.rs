//! Left/Right follow screen positions, not the menu hierarchy
//!
//! A submenu that did not fit on the right opens to the left of its parent.
//! From the root at x=100 with its submenu at x=50, Left is the key that
//! goes into the submenu and Right does nothing.

use cascade_menu::logic::cascade::{classify_horizontal_move, Direction, HorizontalMove};
use cascade_menu::logic::layout::place_submenu;
use cascade_menu::{FocusState, MenuTree, NavEvent, NavigationEngine, Position};
use crossterm::event::{KeyCode, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_flipped_submenu_is_entered_with_left() {
    let mut tree = MenuTree::new(1);
    let root = tree.add_root(0, Position::new(100, 0)).unwrap();
    let folder = tree.push_folder(root, "Archive").unwrap();
    let child = tree.open_submenu(root, folder, Position::new(50, 0)).unwrap();
    let first = tree.push_row(child, "2023").unwrap();
    tree.push_row(child, "2024").unwrap();

    assert_eq!(
        classify_horizontal_move(Direction::Right, &tree, root),
        HorizontalMove::NoOp
    );
    assert_eq!(
        classify_horizontal_move(Direction::Left, &tree, root),
        HorizontalMove::Descend
    );

    let events = Rc::new(RefCell::new(Vec::new()));
    let mut engine = NavigationEngine::new();
    let sink = Rc::clone(&events);
    engine.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    let mut focus = FocusState::new();

    engine.process_key(&mut tree, &mut focus, root, KeyCode::Down, KeyModifiers::NONE);
    events.borrow_mut().clear();

    // Right: nothing to the right of a root menu
    engine.process_key(&mut tree, &mut focus, root, KeyCode::Right, KeyModifiers::NONE);
    assert_eq!(focus.menu(), Some(root));
    assert_eq!(focus.row(), Some(folder));
    assert!(events.borrow().is_empty());

    // Left: into the submenu
    engine.process_key(&mut tree, &mut focus, root, KeyCode::Left, KeyModifiers::NONE);
    assert_eq!(focus.menu(), Some(child));
    assert_eq!(focus.row(), Some(first));
    assert!(!tree.row(root, folder).unwrap().is_selected());
    assert_eq!(
        events.borrow().last(),
        Some(&NavEvent::RowSelected {
            menu: child,
            row: first
        })
    );

    // Right from the flipped submenu goes back to the root
    engine.process_key(&mut tree, &mut focus, root, KeyCode::Right, KeyModifiers::NONE);
    assert_eq!(focus.menu(), Some(root));
    assert_eq!(focus.row(), Some(folder));
    assert!(!tree.row(child, first).unwrap().is_selected());
}

#[test]
fn test_submenu_of_unselected_row_is_not_entered() {
    let mut tree = MenuTree::new(1);
    let root = tree.add_root(0, Position::new(0, 0)).unwrap();
    let plain = tree.push_row(root, "Notes").unwrap();
    let folder = tree.push_folder(root, "Archive").unwrap();
    let child = tree.open_submenu(root, folder, Position::new(30, 0)).unwrap();
    tree.push_row(child, "2023").unwrap();

    let mut engine = NavigationEngine::new();
    let mut focus = FocusState::new();
    engine.process_key(&mut tree, &mut focus, root, KeyCode::Home, KeyModifiers::NONE);
    assert_eq!(focus.row(), Some(plain));

    engine.process_key(&mut tree, &mut focus, root, KeyCode::Right, KeyModifiers::NONE);
    assert_eq!(focus.menu(), Some(root));
    assert_eq!(focus.row(), Some(plain));
}

#[test]
fn test_cascade_flips_at_screen_edge() {
    // Three levels of 30-wide menus on a 100-wide screen
    let first = place_submenu(0, 30, 30, 100, Direction::Right);
    assert_eq!((first.x, first.direction), (30, Direction::Right));

    let second = place_submenu(first.x, 30, 30, 100, first.direction);
    assert_eq!((second.x, second.direction), (60, Direction::Right));

    let third = place_submenu(second.x, 30, 30, 100, second.direction);
    assert_eq!((third.x, third.direction), (30, Direction::Left));
}
