//! External Services
//!
//! This module contains services that interact with systems outside the
//! navigation core:
//! - hotkey: global hotkey registration and activation forwarding

pub mod hotkey;

// Re-export commonly used types for convenience
pub use hotkey::{HotKey, HotkeyBackend, HotkeyBridge, HotkeyError, HotkeyRegistry};
