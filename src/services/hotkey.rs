//! Global hotkey bridge
//!
//! Claims one key combination and forwards every firing as a payload-free
//! activation. Key events arrive on the terminal input thread; the bridge
//! only pushes `()` into a channel and the event loop turns that into
//! `NavigationEngine::hotkey_pressed` on the engine's own thread.
//!
//! A failed registration is never fatal: callers log it, forget the stored
//! combination and carry on without a hotkey.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Reasons a combination cannot be registered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotkeyError {
    #[error("hotkey combination is empty")]
    Empty,
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("hotkey '{0}' needs Ctrl, Alt or Super")]
    MissingModifier(String),
    #[error("hotkey '{0}' is already in use")]
    AlreadyInUse(String),
}

/// A key plus the exact modifiers that must be held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotKey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl HotKey {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            code: normalize(code),
            modifiers,
        }
    }

    /// Exact match against a key event (letters compare case-insensitively)
    pub fn matches(&self, event: &KeyEvent) -> bool {
        normalize(event.code) == self.code && event.modifiers == self.modifiers
    }

    /// Combinations the navigation engine already handles
    pub fn is_navigation_key(&self) -> bool {
        let none = self.modifiers == KeyModifiers::NONE;
        match self.code {
            KeyCode::Enter
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::Esc => none,
            KeyCode::Tab => none || self.modifiers == KeyModifiers::SHIFT,
            KeyCode::BackTab => true,
            KeyCode::F(4) => self.modifiers == KeyModifiers::ALT,
            KeyCode::Char('f') => self.modifiers == KeyModifiers::CONTROL,
            _ => false,
        }
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

impl FromStr for HotKey {
    type Err = HotkeyError;

    /// Parse `"Ctrl+Alt+M"`, `"Shift+F12"`, `"Super+Space"`...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split('+')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        let Some((key, modifier_names)) = parts.split_last() else {
            return Err(HotkeyError::Empty);
        };

        let mut modifiers = KeyModifiers::NONE;
        for name in modifier_names {
            modifiers |= match name.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                "super" | "win" | "meta" | "cmd" => KeyModifiers::SUPER,
                _ => return Err(HotkeyError::UnknownModifier(name.to_string())),
            };
        }

        let code = parse_key(key).ok_or_else(|| HotkeyError::UnknownKey(key.to_string()))?;

        let strong = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER;
        if matches!(code, KeyCode::Char(_)) && !modifiers.intersects(strong) {
            return Err(HotkeyError::MissingModifier(s.to_string()));
        }

        Ok(HotKey::new(code, modifiers))
    }
}

fn parse_key(key: &str) -> Option<KeyCode> {
    let lower = key.to_ascii_lowercase();
    let code = match lower.as_str() {
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        _ => {
            let mut chars = lower.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_graphic() => KeyCode::Char(c),
                (Some('f'), Some(_)) => {
                    let n: u8 = lower[1..].parse().ok()?;
                    if !(1..=24).contains(&n) {
                        return None;
                    }
                    KeyCode::F(n)
                }
                _ => return None,
            }
        }
    };
    Some(code)
}

impl fmt::Display for HotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl"),
            (KeyModifiers::ALT, "Alt"),
            (KeyModifiers::SHIFT, "Shift"),
            (KeyModifiers::SUPER, "Super"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{}+", name)?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::F(n) => write!(f, "F{}", n),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Whatever actually owns global key combinations
pub trait HotkeyBackend {
    fn claim(&mut self, key: &HotKey) -> Result<(), HotkeyError>;
    fn release(&mut self, key: &HotKey);
}

/// Process-wide table of claimed combinations
///
/// Clones share the same table, so two bridges cannot hold the same
/// combination. Navigation keys are never available.
#[derive(Debug, Clone, Default)]
pub struct HotkeyRegistry {
    claimed: Arc<Mutex<HashSet<HotKey>>>,
}

impl HotkeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, key: &HotKey) -> bool {
        self.claimed
            .lock()
            .map(|claimed| claimed.contains(key))
            .unwrap_or(false)
    }
}

impl HotkeyBackend for HotkeyRegistry {
    fn claim(&mut self, key: &HotKey) -> Result<(), HotkeyError> {
        if key.is_navigation_key() {
            return Err(HotkeyError::AlreadyInUse(key.to_string()));
        }
        let mut claimed = self
            .claimed
            .lock()
            .map_err(|_| HotkeyError::AlreadyInUse(key.to_string()))?;
        if !claimed.insert(*key) {
            return Err(HotkeyError::AlreadyInUse(key.to_string()));
        }
        Ok(())
    }

    fn release(&mut self, key: &HotKey) {
        if let Ok(mut claimed) = self.claimed.lock() {
            claimed.remove(key);
        }
    }
}

/// Registers the global hotkey and forwards its activations
#[derive(Debug)]
pub struct HotkeyBridge<B: HotkeyBackend = HotkeyRegistry> {
    backend: B,
    registered: Option<HotKey>,
    tx: mpsc::UnboundedSender<()>,
}

impl<B: HotkeyBackend> HotkeyBridge<B> {
    /// Create a bridge and the receiver its activations arrive on
    pub fn new(backend: B) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let bridge = Self {
            backend,
            registered: None,
            tx,
        };
        (bridge, rx)
    }

    /// Register `combo`, replacing any previous registration
    ///
    /// On failure the bridge is left with no hotkey.
    pub fn register_hotkey(&mut self, combo: &str) -> Result<(), HotkeyError> {
        self.unregister();
        let key: HotKey = combo.parse()?;
        self.backend.claim(&key)?;
        tracing::debug!("registered hotkey {}", key);
        self.registered = Some(key);
        Ok(())
    }

    pub fn unregister(&mut self) {
        if let Some(key) = self.registered.take() {
            self.backend.release(&key);
        }
    }

    pub fn registered(&self) -> Option<&HotKey> {
        self.registered.as_ref()
    }

    /// Forward `event` if it is the registered hotkey
    ///
    /// Returns `true` when the event was consumed as a hotkey activation.
    pub fn dispatch(&self, event: &KeyEvent) -> bool {
        match &self.registered {
            Some(key) if key.matches(event) => {
                // Receiver gone means the event loop is shutting down
                let _ = self.tx.send(());
                true
            }
            _ => false,
        }
    }
}

impl<B: HotkeyBackend> Drop for HotkeyBridge<B> {
    fn drop(&mut self) {
        self.unregister();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_combinations() {
        let key: HotKey = "Ctrl+Alt+M".parse().unwrap();
        assert_eq!(key.code, KeyCode::Char('m'));
        assert_eq!(key.modifiers, KeyModifiers::CONTROL | KeyModifiers::ALT);

        let key: HotKey = "shift + f12".parse().unwrap();
        assert_eq!(key.code, KeyCode::F(12));
        assert_eq!(key.modifiers, KeyModifiers::SHIFT);

        let key: HotKey = "Win+Space".parse().unwrap();
        assert_eq!(key.code, KeyCode::Char(' '));
        assert_eq!(key.modifiers, KeyModifiers::SUPER);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<HotKey>(), Err(HotkeyError::Empty));
        assert_eq!("+".parse::<HotKey>(), Err(HotkeyError::Empty));
        assert_eq!(
            "Hyper+M".parse::<HotKey>(),
            Err(HotkeyError::UnknownModifier("Hyper".to_string()))
        );
        assert_eq!(
            "Ctrl+F99".parse::<HotKey>(),
            Err(HotkeyError::UnknownKey("F99".to_string()))
        );
        assert_eq!(
            "Shift+M".parse::<HotKey>(),
            Err(HotkeyError::MissingModifier("Shift+M".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let key: HotKey = "alt+ctrl+m".parse().unwrap();
        assert_eq!(key.to_string(), "Ctrl+Alt+M");
        assert_eq!(key.to_string().parse::<HotKey>().unwrap(), key);
    }

    #[test]
    fn test_matches_is_exact() {
        let key: HotKey = "Ctrl+Alt+M".parse().unwrap();
        assert!(key.matches(&key_event(KeyCode::Char('M'), KeyModifiers::CONTROL | KeyModifiers::ALT)));
        assert!(!key.matches(&key_event(KeyCode::Char('m'), KeyModifiers::CONTROL)));
        assert!(!key.matches(&key_event(
            KeyCode::Char('m'),
            KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT
        )));
    }

    #[test]
    fn test_navigation_keys_are_taken() {
        let mut bridge = HotkeyBridge::new(HotkeyRegistry::new()).0;
        assert_eq!(
            bridge.register_hotkey("Alt+F4"),
            Err(HotkeyError::AlreadyInUse("Alt+F4".to_string()))
        );
        assert_eq!(
            bridge.register_hotkey("Ctrl+F"),
            Err(HotkeyError::AlreadyInUse("Ctrl+F".to_string()))
        );
        assert!(bridge.registered().is_none());
    }

    #[test]
    fn test_second_bridge_cannot_claim_same_combo() {
        let registry = HotkeyRegistry::new();
        let (mut first, _rx1) = HotkeyBridge::new(registry.clone());
        let (mut second, _rx2) = HotkeyBridge::new(registry.clone());

        first.register_hotkey("Ctrl+Alt+M").unwrap();
        assert!(matches!(
            second.register_hotkey("Ctrl+Alt+M"),
            Err(HotkeyError::AlreadyInUse(_))
        ));

        drop(first);
        assert!(second.register_hotkey("Ctrl+Alt+M").is_ok());
        assert!(registry.is_claimed(&"Ctrl+Alt+M".parse().unwrap()));
    }

    #[test]
    fn test_reregister_releases_previous() {
        let registry = HotkeyRegistry::new();
        let (mut bridge, _rx) = HotkeyBridge::new(registry.clone());
        bridge.register_hotkey("Ctrl+Alt+M").unwrap();
        bridge.register_hotkey("Ctrl+Alt+N").unwrap();

        assert!(!registry.is_claimed(&"Ctrl+Alt+M".parse().unwrap()));
        assert!(registry.is_claimed(&"Ctrl+Alt+N".parse().unwrap()));
    }

    #[test]
    fn test_failed_register_leaves_no_hotkey() {
        let (mut bridge, _rx) = HotkeyBridge::new(HotkeyRegistry::new());
        bridge.register_hotkey("Ctrl+Alt+M").unwrap();
        assert!(bridge.register_hotkey("nonsense+M").is_err());
        assert!(bridge.registered().is_none());
    }

    #[test]
    fn test_dispatch_forwards_activation() {
        let (mut bridge, mut rx) = HotkeyBridge::new(HotkeyRegistry::new());
        let ctrl_alt = KeyModifiers::CONTROL | KeyModifiers::ALT;

        // Nothing registered yet
        assert!(!bridge.dispatch(&key_event(KeyCode::Char('m'), ctrl_alt)));

        bridge.register_hotkey("Ctrl+Alt+M").unwrap();
        assert!(!bridge.dispatch(&key_event(KeyCode::Down, KeyModifiers::NONE)));
        assert!(bridge.dispatch(&key_event(KeyCode::Char('m'), ctrl_alt)));

        assert_eq!(rx.try_recv(), Ok(()));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_activation_crosses_threads() {
        let (mut bridge, mut rx) = HotkeyBridge::new(HotkeyRegistry::new());
        bridge.register_hotkey("Ctrl+Alt+M").unwrap();

        let input_thread = std::thread::spawn(move || {
            bridge.dispatch(&KeyEvent::new(
                KeyCode::Char('m'),
                KeyModifiers::CONTROL | KeyModifiers::ALT,
            ))
        });

        assert!(input_thread.join().unwrap());
        assert_eq!(rx.recv().await, Some(()));
    }
}
