//! Orchestrator
//!
//! Glue between the window and the tour: owns the [`Sequencer`], the input
//! state and both movement strategies, routes events and runs the per-frame
//! tick. Every entry point takes `&mut self`, so a step setup always settles
//! before the next event is looked at.

use crate::camera::{PresentationMode, VrRig, Viewport};
use crate::input::{InputAction, InputState, KeyBindings, KeyCode, PointerCapture, XrInput};
use crate::player::{DesktopMovement, MovementStrategy, VrMovement};
use crate::tour::asset_stage::AssetStage;
use crate::tour::config::{STEP_COUNT, ViewerConfig};
use crate::tour::error::SequenceError;
use crate::tour::sequencer::{Sequencer, StepOutcome};
use crate::tour::ui::UiPort;

/// Index of the walkable step, the only one with live movement.
pub const WALKTHROUGH_STEP: usize = STEP_COUNT - 1;

/// Pick the presentation mode from the user's request and device support.
pub fn detect_presentation(vr_requested: bool, vr_available: bool) -> PresentationMode {
    let mode = match (vr_requested, vr_available) {
        (true, true) => PresentationMode::Vr,
        (true, false) => {
            log::warn!("VR requested but no headset is available, using desktop");
            PresentationMode::Desktop
        }
        (false, _) => PresentationMode::Desktop,
    };
    log::info!("presentation mode: {mode:?}");
    mode
}

/// What the window layer should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    /// Handled here, nothing else to do
    Consumed,
    /// No binding for this key
    Unbound,
    /// Call [`Orchestrator::advance_scene`]
    AdvanceRequested,
    /// Escape with nothing to release
    ExitRequested,
}

pub struct Orchestrator<A: AssetStage, U: UiPort> {
    sequencer: Sequencer<A, U>,
    bindings: KeyBindings,
    input: InputState,
    xr: XrInput,
    capture: PointerCapture,
    desktop: DesktopMovement,
    vr: VrMovement,
    mode: PresentationMode,
}

impl<A: AssetStage, U: UiPort> Orchestrator<A, U> {
    pub fn new(config: ViewerConfig, assets: A, ui: U, mode: PresentationMode) -> Self {
        let ViewerConfig {
            catalog,
            physics,
            bindings,
            ..
        } = config;

        let mut viewport = Viewport::default();
        *viewport.rig_mut() = VrRig::new(physics.vr.eye_height);

        let mut sequencer = Sequencer::new(catalog, assets, ui, viewport);
        sequencer.set_presentation(mode);

        Self {
            sequencer,
            bindings,
            input: InputState::new(),
            xr: XrInput::new(),
            capture: PointerCapture::new(),
            desktop: DesktopMovement::new(physics.desktop),
            vr: VrMovement::new(physics.vr, physics.desktop),
            mode,
        }
    }

    /// Load the sound bank. Call once before the first advance.
    pub async fn load_sounds(&mut self) {
        self.sequencer.load_sounds().await;
    }

    /// Advance the tour. Failures are logged, shown as an alert and
    /// returned; the step index is not rolled back.
    pub async fn advance_scene(&mut self) -> Result<StepOutcome, SequenceError> {
        self.capture.release();

        match self.sequencer.advance().await {
            Ok(StepOutcome::Restarted) => {
                self.reset_player();
                Ok(StepOutcome::Restarted)
            }
            Ok(StepOutcome::Entered(step)) => {
                if step == WALKTHROUGH_STEP {
                    self.reset_player();
                }
                Ok(StepOutcome::Entered(step))
            }
            Err(e) => {
                log::error!("scene setup failed: {e}");
                self.sequencer
                    .ui_mut()
                    .show_alert(&format!("Could not load the scene: {e}. Please reload."));
                Err(e)
            }
        }
    }

    fn reset_player(&mut self) {
        self.desktop.reset();
        self.vr.reset();
        self.input.reset();
        self.capture.release();
    }

    pub fn select_variant(&mut self, index: usize) -> bool {
        self.sequencer.select_variant(index)
    }

    pub fn current_step_index(&self) -> i32 {
        self.sequencer.current_step_index()
    }

    pub fn in_walkthrough(&self) -> bool {
        self.current_step_index() == WALKTHROUGH_STEP as i32
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> InputResponse {
        let Some(action) = self.bindings.get_action(key) else {
            return InputResponse::Unbound;
        };

        if let Some(intent) = action.intent() {
            // No jumping in VR
            let grounded = self.mode == PresentationMode::Desktop && self.desktop.is_grounded();
            self.input.set(intent, pressed, grounded);
            if action == InputAction::Sprint {
                self.desktop.set_sprint(pressed);
            }
            return InputResponse::Consumed;
        }

        if !pressed {
            return InputResponse::Consumed;
        }
        match action {
            InputAction::Advance => InputResponse::AdvanceRequested,
            InputAction::ReleasePointer => {
                if self.capture.is_engaged() {
                    self.capture.release();
                    InputResponse::Consumed
                } else {
                    InputResponse::ExitRequested
                }
            }
            InputAction::SelectVariant(index) => {
                self.select_variant(usize::from(index));
                InputResponse::Consumed
            }
            _ => InputResponse::Consumed,
        }
    }

    /// Raw mouse motion. Only turns the first-person camera while captured.
    pub fn handle_mouse_motion(&mut self, dx: f32, dy: f32) {
        if !self.in_walkthrough() || !self.capture.is_engaged() {
            return;
        }
        if let Some(controls) = self.sequencer.viewport_mut().first_person_mut() {
            controls.apply_look_delta(dx, dy);
        }
    }

    /// Primary click. Engages capture in the walkthrough; starts the tour
    /// from the landing page.
    pub fn handle_click(&mut self) -> InputResponse {
        if self.in_walkthrough() && self.mode == PresentationMode::Desktop {
            self.capture.request_capture();
            return InputResponse::Consumed;
        }
        if self.current_step_index() < 0 {
            return InputResponse::AdvanceRequested;
        }
        InputResponse::Consumed
    }

    /// Click on the start / next / restart affordance. Works from any
    /// step, including the walkthrough where the scene click is taken by
    /// pointer capture.
    pub fn handle_affordance_click(&mut self) -> InputResponse {
        self.capture.release();
        self.input.reset();
        InputResponse::AdvanceRequested
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.capture.set_focus(focused);
    }

    pub fn set_xr_input(&mut self, xr: XrInput) {
        self.xr = xr;
    }

    pub fn set_presentation(&mut self, mode: PresentationMode) {
        if self.mode != mode {
            log::info!("presentation mode: {mode:?}");
            self.mode = mode;
            self.capture.release();
            self.sequencer.set_presentation(mode);
        }
    }

    /// Per-frame tick: camera auto-rotation, then movement.
    pub fn update(&mut self, dt: f32) {
        self.sequencer.update(dt);
        if self.in_walkthrough() {
            self.update_movement(dt);
        }
    }

    fn update_movement(&mut self, dt: f32) {
        let (field, viewport) = self.sequencer.frame_parts();
        match self.mode {
            PresentationMode::Desktop => {
                if !self.capture.is_engaged() {
                    return;
                }
                if let Some(controls) = viewport.first_person_mut() {
                    self.desktop.update(dt, &mut self.input, field, controls);
                }
            }
            PresentationMode::Vr => {
                self.vr.update(dt, &mut self.xr, field, viewport.rig_mut());
            }
        }
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn sequencer(&self) -> &Sequencer<A, U> {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut Sequencer<A, U> {
        &mut self.sequencer
    }

    pub fn ui(&self) -> &U {
        self.sequencer.ui()
    }

    pub fn viewport(&self) -> &Viewport {
        self.sequencer.viewport()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn capture(&self) -> &PointerCapture {
        &self.capture
    }

    pub fn capture_mut(&mut self) -> &mut PointerCapture {
        &mut self.capture
    }

    pub fn desktop(&self) -> &DesktopMovement {
        &self.desktop
    }

    pub fn vr(&self) -> &VrMovement {
        &self.vr
    }
}
