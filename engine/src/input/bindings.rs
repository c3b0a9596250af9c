//! Input Bindings Module
//!
//! Maps physical keys to logical actions so the tour logic never sees raw
//! key codes. Several keys may drive the same action (WASD and arrows).

use std::collections::HashMap;

use super::{Intent, KeyCode};

/// Logical input actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (default: W, ArrowUp)
    MoveForward,
    /// Move backward (default: S, ArrowDown)
    MoveBackward,
    /// Strafe left (default: A, ArrowLeft)
    MoveLeft,
    /// Strafe right (default: D, ArrowRight)
    MoveRight,
    /// Jump (default: Space)
    Jump,
    /// Sprint modifier (default: Shift)
    Sprint,
    /// Advance to the next scene step (default: Enter, N)
    Advance,
    /// Release pointer capture (default: Escape)
    ReleasePointer,
    /// Pick a toggle button by zero-based index (default: 1-6)
    SelectVariant(u8),
}

impl InputAction {
    /// The movement intent this action drives, if any.
    pub fn intent(self) -> Option<Intent> {
        match self {
            InputAction::MoveForward => Some(Intent::Forward),
            InputAction::MoveBackward => Some(Intent::Backward),
            InputAction::MoveLeft => Some(Intent::Left),
            InputAction::MoveRight => Some(Intent::Right),
            InputAction::Jump => Some(Intent::Jump),
            InputAction::Sprint => Some(Intent::Sprint),
            _ => None,
        }
    }
}

/// Maps physical keys to logical actions, supporting remapping.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_action: HashMap<KeyCode, InputAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create bindings with the default layout.
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::A, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::D, InputAction::MoveRight);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);
        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Sprint);
        bindings.bind(KeyCode::ShiftRight, InputAction::Sprint);
        bindings.bind(KeyCode::Enter, InputAction::Advance);
        bindings.bind(KeyCode::N, InputAction::Advance);
        bindings.bind(KeyCode::Escape, InputAction::ReleasePointer);

        let digits = [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
        ];
        for (index, key) in digits.into_iter().enumerate() {
            bindings.bind(key, InputAction::SelectVariant(index as u8));
        }

        bindings
    }

    /// Bindings with nothing mapped.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
        }
    }

    /// Bind a key to an action, replacing whatever the key did before.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.key_to_action.insert(key, action);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        self.key_to_action.remove(&key);
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Every key bound to an action, in no particular order.
    pub fn keys_for(&self, action: InputAction) -> Vec<KeyCode> {
        self.key_to_action
            .iter()
            .filter(|&(_, &a)| a == action)
            .map(|(&k, _)| k)
            .collect()
    }
}
