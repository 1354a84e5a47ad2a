//! App Orchestration
//!
//! `App` owns the menu tree, the keyboard focus and the navigation engine,
//! and reacts to the engine's notifications. Methods are grouped by domain:
//! - menus: building root menus from config, expanding and collapsing submenus
//! - input: routing terminal key events and the global hotkey
//! - hotkey: registering the configured hotkey with fallback

pub(crate) mod hotkey;
pub(crate) mod input;
pub(crate) mod menus;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use crate::config::{Config, RowSpec};
use crate::handlers::NavigationEngine;
use crate::messages::NavEvent;
use crate::model::{FocusState, MenuTree, RowId};

pub use menus::ConfiguredItem;

pub struct App {
    pub tree: MenuTree,
    pub focus: FocusState,
    pub engine: NavigationEngine,
    pub config: Config,
    /// Where to write the config back (hotkey fallback)
    config_path: Option<PathBuf>,
    /// Contents of folder rows that have not been expanded yet
    folders: HashMap<RowId, Vec<RowSpec>>,
    /// Notifications collected from the engine, drained after each call
    inbox: Rc<RefCell<Vec<NavEvent>>>,
    screen_width: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, config_path: Option<PathBuf>, screen_width: u16) -> Self {
        let inbox = Rc::new(RefCell::new(Vec::new()));
        let mut engine = NavigationEngine::new()
            .with_keep_selection_while_typing(config.keep_selection_while_typing);
        let sink = Rc::clone(&inbox);
        engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let mut app = Self {
            tree: MenuTree::new(config.root_slots),
            focus: FocusState::new(),
            engine,
            config,
            config_path,
            folders: HashMap::new(),
            inbox,
            screen_width,
            should_quit: false,
        };
        app.build_root_menus();
        app
    }

    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }

    pub fn set_screen_width(&mut self, width: u16) {
        self.screen_width = width;
    }

    /// Take the engine's pending notifications and react to each in order
    fn drain_events(&mut self) -> Vec<NavEvent> {
        let events: Vec<NavEvent> = self.inbox.borrow_mut().drain(..).collect();
        for event in &events {
            self.on_event(event);
        }
        events
    }

    fn on_event(&mut self, event: &NavEvent) {
        match event {
            NavEvent::EnterPressed { menu, row } => {
                self.expand_folder(*menu, *row);
            }
            NavEvent::RowSelected { menu, row } => {
                self.collapse_other_submenu(*menu, *row);
            }
            NavEvent::ClosePressed => {
                self.should_quit = true;
            }
            NavEvent::HotkeyPressed => {
                self.reopen();
            }
            NavEvent::RowDeselected { .. } | NavEvent::SearchFocused { .. } => {}
        }
    }
}
