//! Navigation Logic
//!
//! Pure functions that can be unit tested without an engine:
//! - cascade: Left/Right classification from menu screen positions
//! - layout: Submenu placement and left/right flipping
//! - navigation: Tab cycling across root menus
//! - search: Prefix matching and wrapping row scans

pub mod cascade;
pub mod layout;
pub mod navigation;
pub mod search;
