// gfm-core/src/controller/handlers/keymap.rs
// Fixed key bindings for browse mode

use crate::controller::actions::Action;
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashMap;
use tracing::trace;

use super::*;

pub struct KeyMap {
    bindings: HashMap<KeyEvent, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    pub fn new() -> Self {
        let mut bindings = HashMap::with_capacity(32);

        // Application
        bindings.insert(key('q'), Action::Quit);
        bindings.insert(key('?'), Action::ShowManual);
        bindings.insert(ctrl('l'), Action::ReloadDirectory);

        // Directory changes
        bindings.insert(enter_key(), Action::ActivateEntry);
        bindings.insert(ctrl('j'), Action::ActivateEntry);
        bindings.insert(key('~'), Action::GoHome);
        bindings.insert(backspace_key(), Action::GoToParent);
        bindings.insert(ctrl('h'), Action::GoToParent);
        bindings.insert(key('*'), Action::VirtualDirectory);

        // Arrow keys
        bindings.insert(arrow_key(KeyCode::Up), Action::MoveSelectionUp);
        bindings.insert(arrow_key(KeyCode::Down), Action::MoveSelectionDown);
        bindings.insert(arrow_key(KeyCode::Left), Action::MoveColumnLeft);
        bindings.insert(arrow_key(KeyCode::Right), Action::MoveColumnRight);

        // Vim keys
        bindings.insert(key('k'), Action::MoveSelectionUp);
        bindings.insert(key('j'), Action::MoveSelectionDown);
        bindings.insert(key('h'), Action::MoveColumnLeft);
        bindings.insert(key('l'), Action::MoveColumnRight);

        // External commands
        bindings.insert(key('d'), Action::Delete);
        bindings.insert(key('c'), Action::Copy);
        bindings.insert(key('m'), Action::Move);
        bindings.insert(key('n'), Action::CreateFile);
        bindings.insert(key('x'), Action::Execute);
        bindings.insert(key('e'), Action::Edit);
        bindings.insert(key(':'), Action::RunShell);

        bindings.insert(key('/'), Action::StartSearch);

        Self { bindings }
    }

    /// Action bound to `key_event`, if any.
    pub fn resolve(&self, key_event: KeyEvent) -> Option<Action> {
        let action = self.bindings.get(&normalize(key_event)).copied();
        trace!(
            marker = "KEYMAP_LOOKUP",
            operation_type = "input_handling",
            "KeyMap: {:?} -> {:?}",
            key_event,
            action
        );
        action
    }
}
