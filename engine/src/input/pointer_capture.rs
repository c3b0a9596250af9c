//! Pointer Capture Module
//!
//! Tracks whether first-person pointer capture is engaged. Desktop movement
//! and mouse look only run while it is.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut capture = PointerCapture::new();
//!
//! // Click inside the walkthrough: engage
//! if capture.request_capture() == CaptureAction::ApplyState {
//!     capture.apply_to_window(&window);
//! }
//!
//! // ESC: release
//! capture.release();
//! ```

/// What the window layer should do after a capture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureAction {
    /// No action needed
    None,
    /// Grab mode / cursor visibility changed, apply it to the window
    ApplyState,
}

/// Pointer capture state for first-person look.
#[derive(Debug, Clone)]
pub struct PointerCapture {
    /// User wants the pointer captured
    engaged: bool,
    /// Window currently has focus
    has_focus: bool,
    /// State changed and has not been applied to the window yet
    state_dirty: bool,
}

impl Default for PointerCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerCapture {
    /// Start released; capture has to be requested by a click.
    pub fn new() -> Self {
        Self {
            engaged: false,
            has_focus: true,
            state_dirty: false,
        }
    }

    /// Capture is engaged and the window has focus.
    pub fn is_engaged(&self) -> bool {
        self.engaged && self.has_focus
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_dirty(&self) -> bool {
        self.state_dirty
    }

    pub fn clear_dirty(&mut self) {
        self.state_dirty = false;
    }

    /// Engage capture (click inside the walkthrough).
    pub fn request_capture(&mut self) -> CaptureAction {
        if self.engaged {
            return CaptureAction::None;
        }
        self.engaged = true;
        self.state_dirty = true;
        CaptureAction::ApplyState
    }

    /// Release capture (Escape, step change, restart).
    pub fn release(&mut self) -> CaptureAction {
        if !self.engaged {
            return CaptureAction::None;
        }
        self.engaged = false;
        self.state_dirty = true;
        CaptureAction::ApplyState
    }

    /// Window focus changed. The user's capture preference is kept.
    pub fn set_focus(&mut self, focused: bool) -> CaptureAction {
        if self.has_focus == focused {
            return CaptureAction::None;
        }
        self.has_focus = focused;
        self.state_dirty = true;
        CaptureAction::ApplyState
    }

    /// Cursor should be hidden and grabbed.
    pub fn should_grab(&self) -> bool {
        self.is_engaged()
    }

    /// Apply grab mode and visibility to a winit window.
    ///
    /// `Locked` is not supported everywhere, so `Confined` is tried as a fallback.
    pub fn apply_to_window(&mut self, window: &winit::window::Window) {
        use winit::window::CursorGrabMode;

        if self.should_grab() {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("pointer capture unavailable: {e}");
            }
            window.set_cursor_visible(false);
        } else {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("failed to release pointer: {e}");
            }
            window.set_cursor_visible(true);
        }
        self.clear_dirty();
    }

    /// Human-readable hint for the current state.
    pub fn status_message(&self) -> &'static str {
        if self.engaged {
            "Walkthrough active. ESC to release the pointer."
        } else {
            "Click to look around."
        }
    }
}
