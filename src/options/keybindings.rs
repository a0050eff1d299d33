use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `MoveForward` → `"KeyW"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::MoveForward, "KeyW".into()),
            (KeyAction::MoveBackward, "KeyS".into()),
            (KeyAction::StrafeLeft, "KeyA".into()),
            (KeyAction::StrafeRight, "KeyD".into()),
            (KeyAction::MoveUp, "Space".into()),
            (KeyAction::MoveDown, "ShiftLeft".into()),
            (KeyAction::Exit, "Escape".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    ///
    /// If a loaded file binds one key to several actions, the action
    /// declared first in [`KeyAction`] wins and the others are reported.
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        let mut entries: Vec<_> = self.bindings.iter().collect();
        entries.sort_unstable_by_key(|(action, _)| **action);
        for (action, key) in entries {
            if let Some(kept) = self.key_to_action.get(key) {
                log::warn!(
                    "{key} is bound to both {kept:?} and {action:?}; \
                     ignoring {action:?}"
                );
                continue;
            }
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Bind `action` to `key`, replacing its previous key.
    ///
    /// Any other action bound to `key` loses its binding.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let key = key.into();
        self.bindings
            .retain(|bound, bound_key| *bound == action || *bound_key != key);
        let _ = self.bindings.insert(action, key);
        self.rebuild_reverse_map();
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_movement_keys() {
        let opts = KeybindingOptions::default();
        assert_eq!(opts.lookup("KeyW"), Some(KeyAction::MoveForward));
        assert_eq!(opts.lookup("Escape"), Some(KeyAction::Exit));
        assert_eq!(opts.lookup("KeyQ"), None);
    }

    #[test]
    fn rebinding_a_taken_key_evicts_its_old_action() {
        let mut opts = KeybindingOptions::default();
        opts.bind(KeyAction::Exit, "KeyW");
        assert_eq!(opts.lookup("KeyW"), Some(KeyAction::Exit));
        assert_eq!(opts.lookup("Escape"), None);
        assert!(!opts.bindings.contains_key(&KeyAction::MoveForward));
    }

    #[test]
    fn duplicate_keys_in_a_loaded_map_resolve_by_declaration_order() {
        let mut opts = KeybindingOptions {
            bindings: HashMap::from([
                (KeyAction::Exit, "KeyW".to_owned()),
                (KeyAction::MoveForward, "KeyW".to_owned()),
            ]),
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        assert_eq!(opts.lookup("KeyW"), Some(KeyAction::MoveForward));
    }
}
