//! Navigation notifications
//!
//! Every observable outcome of a key press is published as a `NavEvent`.
//! Subscribers (rendering layer, submenu expansion, tests) receive the events
//! synchronously and in the order they were emitted.
//!
//! Handlers only get `&NavEvent`, never the engine, so a handler cannot feed
//! another key press back in while the engine is still processing one.

use crate::model::{MenuId, RowId};

/// Notification emitted by the navigation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// The global hotkey fired
    HotkeyPressed,

    /// The menus should close (Escape, Alt+F4, or an opened item asked for it)
    ClosePressed,

    /// A row became the keyboard selection
    RowSelected { menu: MenuId, row: RowId },

    /// The previous keyboard selection lost focus
    ///
    /// `previous_menu` is `None` when the deselection came from typed search.
    RowDeselected {
        previous_index: Option<usize>,
        previous_menu: Option<MenuId>,
    },

    /// Enter on a collapsed folder row; the subscriber should expand it
    EnterPressed { menu: MenuId, row: RowId },

    /// Input focus moved to a menu's search box
    SearchFocused { menu: MenuId },
}

/// Handle returned by `EventBus::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Handler = Box<dyn FnMut(&NavEvent)>;

/// Ordered, synchronous publish/subscribe delivery
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; handlers run in subscription order
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&NavEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    pub fn publish(&mut self, event: NavEvent) {
        tracing::trace!("publish {:?}", event);
        for (_, handler) in self.handlers.iter_mut() {
            handler(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
