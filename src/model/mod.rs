//! Menu Model
//!
//! Plain data for the cascading menus. The model is organized into:
//!
//! - **RowItem**: one selectable entry, with its keyboard-selection flags
//! - **MenuNode**: one menu window (rows, position, depth, links)
//! - **MenuTree**: arena owning all menus plus the fixed root slot set
//! - **FocusState**: focused menu + focused row, passed into every navigation call
//!
//! Key principles:
//! - Menus reference each other through `MenuId` handles, never by value
//! - A handle to a closed menu resolves to `None` instead of dangling
//! - Selection flags are crate-private setters; only the engine writes them

pub mod focus;
pub mod menu;
pub mod row;
pub mod tree;

pub use focus::FocusState;
pub use menu::{MenuId, MenuNode, Position};
pub use row::{RowId, RowItem, RowTarget};
pub use tree::MenuTree;
