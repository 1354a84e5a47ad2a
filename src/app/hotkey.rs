//! Hotkey registration with fallback
//!
//! A configured hotkey that cannot be registered is dropped from the config
//! (and the config saved) so the next start does not fail the same way.

use tracing::warn;

use super::App;
use crate::services::{HotkeyBackend, HotkeyBridge};

impl App {
    /// Register the configured hotkey on `bridge`
    ///
    /// Returns `true` when a hotkey is active afterwards.
    pub fn register_hotkey<B: HotkeyBackend>(&mut self, bridge: &mut HotkeyBridge<B>) -> bool {
        let Some(combo) = self.config.hotkey.clone() else {
            return false;
        };

        match bridge.register_hotkey(&combo) {
            Ok(()) => true,
            Err(e) => {
                warn!("hotkey {} unavailable: {}", combo, e);
                self.config.hotkey = None;
                if let Some(path) = &self.config_path {
                    if let Err(e) = self.config.save(path) {
                        warn!("could not save config: {:#}", e);
                    }
                }
                false
            }
        }
    }
}
