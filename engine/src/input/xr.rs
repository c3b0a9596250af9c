//! Tracked-controller input for VR presentation.
//!
//! Each frame the XR layer reports the state of every connected controller.
//! The left hand drives locomotion, the right hand drives snap-free turning.

use glam::{Quat, Vec2};

/// Which hand a controller is held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    None,
}

/// One tracked controller's analog state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerState {
    pub handedness: Handedness,
    /// Thumbstick axes; `y` is negative when pushed away from the user
    pub thumbstick: Vec2,
    /// Trigger (or grip) pull in 0..=1
    pub trigger: f32,
}

impl ControllerState {
    pub fn new(handedness: Handedness, thumbstick: Vec2, trigger: f32) -> Self {
        Self {
            handedness,
            thumbstick,
            trigger,
        }
    }
}

/// Snapshot of the XR input sources for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct XrInput {
    pub controllers: Vec<ControllerState>,
    /// Head orientation relative to the rig
    pub head_rotation: Quat,
}

impl Default for XrInput {
    fn default() -> Self {
        Self {
            controllers: Vec::new(),
            head_rotation: Quat::IDENTITY,
        }
    }
}

impl XrInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn by_hand(&self, hand: Handedness) -> Option<&ControllerState> {
        self.controllers.iter().find(|c| c.handedness == hand)
    }

    /// Locomotion source (left hand).
    pub fn movement_controller(&self) -> Option<&ControllerState> {
        self.by_hand(Handedness::Left)
    }

    /// Turning source (right hand).
    pub fn turn_controller(&self) -> Option<&ControllerState> {
        self.by_hand(Handedness::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controllers_identified_by_handedness() {
        let input = XrInput {
            controllers: vec![
                ControllerState::new(Handedness::Right, Vec2::new(0.5, 0.0), 0.0),
                ControllerState::new(Handedness::Left, Vec2::new(0.0, -1.0), 0.9),
            ],
            head_rotation: Quat::IDENTITY,
        };
        assert_eq!(input.movement_controller().unwrap().trigger, 0.9);
        assert_eq!(input.turn_controller().unwrap().thumbstick.x, 0.5);
    }

    #[test]
    fn test_missing_controllers() {
        let input = XrInput {
            controllers: vec![ControllerState::default()],
            head_rotation: Quat::IDENTITY,
        };
        assert!(input.movement_controller().is_none());
        assert!(input.turn_controller().is_none());
    }
}
