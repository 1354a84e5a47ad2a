//! Cascade Menu Library
//!
//! Keyboard navigation for cascading pop-up menus: a tree of open menus,
//! a single keyboard focus, and an engine that turns key presses into
//! selection changes and notifications.

pub mod app;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod logic;
pub mod messages;
pub mod model;
pub mod services;
pub mod utils;

pub use app::App;
pub use config::Config;
pub use handlers::NavigationEngine;
pub use messages::{EventBus, NavEvent, SubscriptionId};
pub use model::{FocusState, MenuId, MenuNode, MenuTree, Position, RowId, RowItem, RowTarget};
pub use services::{HotKey, HotkeyBridge, HotkeyError, HotkeyRegistry};
