//! Event Handlers
//!
//! - keyboard: the navigation engine that turns key presses into
//!   focus/selection changes and notifications

pub mod keyboard;

// Re-export for convenience
pub use keyboard::NavigationEngine;
