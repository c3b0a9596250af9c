//! Keyboard Input Module
//!
//! Generic key codes plus the held-state of the six movement intents.
//! Decoupled from winit; [`KeyCode::from_winit`] does the translation.

use glam::Vec2;

/// Generic key codes, independent of the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Number row (variant toggles)
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,

    // Control keys
    Enter,
    Escape,
    N,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Translate a winit physical key code.
    pub fn from_winit(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as Winit;
        match key {
            Winit::KeyW => KeyCode::W,
            Winit::KeyA => KeyCode::A,
            Winit::KeyS => KeyCode::S,
            Winit::KeyD => KeyCode::D,
            Winit::Space => KeyCode::Space,
            Winit::ShiftLeft => KeyCode::ShiftLeft,
            Winit::ShiftRight => KeyCode::ShiftRight,
            Winit::ArrowUp => KeyCode::ArrowUp,
            Winit::ArrowDown => KeyCode::ArrowDown,
            Winit::ArrowLeft => KeyCode::ArrowLeft,
            Winit::ArrowRight => KeyCode::ArrowRight,
            Winit::Digit1 => KeyCode::Digit1,
            Winit::Digit2 => KeyCode::Digit2,
            Winit::Digit3 => KeyCode::Digit3,
            Winit::Digit4 => KeyCode::Digit4,
            Winit::Digit5 => KeyCode::Digit5,
            Winit::Digit6 => KeyCode::Digit6,
            Winit::Enter | Winit::NumpadEnter => KeyCode::Enter,
            Winit::Escape => KeyCode::Escape,
            Winit::KeyN => KeyCode::N,
            _ => KeyCode::Unknown,
        }
    }
}

/// The named movement intents a key can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Sprint,
}

/// Held state of every movement intent.
///
/// Mutated by key events, read once per frame by movement. Movement only
/// ever touches it through [`InputState::take_jump`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Pending-jump bit, armed on key-down while grounded
    pub jump: bool,
    pub sprint: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down/key-up for an intent.
    ///
    /// Jump is armed only while `grounded` and is not cleared by key-up: it
    /// stays pending until the next physics tick consumes it. Every other
    /// intent is recorded unconditionally.
    pub fn set(&mut self, intent: Intent, pressed: bool, grounded: bool) {
        match intent {
            Intent::Forward => self.forward = pressed,
            Intent::Backward => self.backward = pressed,
            Intent::Left => self.left = pressed,
            Intent::Right => self.right = pressed,
            Intent::Sprint => self.sprint = pressed,
            Intent::Jump => {
                if pressed && grounded {
                    self.jump = true;
                }
            }
        }
    }

    /// Key-down shorthand for [`InputState::set`].
    pub fn press(&mut self, intent: Intent, grounded: bool) {
        self.set(intent, true, grounded);
    }

    pub fn release(&mut self, intent: Intent) {
        self.set(intent, false, false);
    }

    /// Whether an intent is currently held.
    pub fn is_held(&self, intent: Intent) -> bool {
        match intent {
            Intent::Forward => self.forward,
            Intent::Backward => self.backward,
            Intent::Left => self.left,
            Intent::Right => self.right,
            Intent::Jump => self.jump,
            Intent::Sprint => self.sprint,
        }
    }

    /// Consume the pending jump, returning whether one was armed.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }

    /// Get the forward/backward axis (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Get the left/right axis (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }

    /// Desired planar direction: `x` = right − left, `y` = forward − backward.
    ///
    /// Normalized to unit length when non-zero.
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.right_axis() as f32, self.forward_axis() as f32).normalize_or_zero()
    }

    pub fn any_movement(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Release everything (used on restart and when pointer capture is lost).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
