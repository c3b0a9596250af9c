//! Scene Sequencer
//!
//! Drives the tour through its six steps. The only mutable progress state is
//! [`SessionState::step_index`]: it starts at -1, each [`Sequencer::advance`]
//! moves it forward by one, and moving past the last step restarts the tour.
//!
//! Every advance runs under a [`LoadingGuard`]: the loading indicator is
//! raised first and is always lowered again (and the info controls shown)
//! when the step setup ends, whether it succeeded, failed or unwound.
//!
//! # Example
//!
//! ```ignore
//! let mut sequencer = Sequencer::new(catalog, stage, UiState::new(), Viewport::default());
//! pollster::block_on(sequencer.load_sounds());
//! match pollster::block_on(sequencer.advance()) {
//!     Ok(StepOutcome::Entered(step)) => log::info!("now at {step}"),
//!     Ok(StepOutcome::Restarted) => {}
//!     Err(e) => sequencer.ui_mut().show_alert(&e.to_string()),
//! }
//! ```

use std::ops::{Deref, DerefMut};

use crate::camera::{CameraIntent, PresentationMode, Viewport};
use crate::physics::CollisionField;
use crate::tour::asset_stage::{AssetStage, ModelRequest};
use crate::tour::config::{SceneCatalog, SceneStep, VariantSet};
use crate::tour::error::{AssetError, SequenceError};
use crate::tour::sound::SoundBank;
use crate::tour::ui::UiPort;

/// Progress of one viewing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// -1 before the first advance, then 0..=5
    pub step_index: i32,
    /// Highlighted toggle of the current step
    pub variant: Option<usize>,
    pub presentation: PresentationMode,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            step_index: -1,
            variant: None,
            presentation: PresentationMode::Desktop,
        }
    }
}

/// What an advance did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Entered(usize),
    /// Ran past the last step; back to the landing state
    Restarted,
}

/// Raises the loading indicator for its lifetime.
///
/// Dropping it lowers the indicator and reveals the info controls.
pub struct LoadingGuard<'a, U: UiPort> {
    ui: &'a mut U,
}

impl<'a, U: UiPort> LoadingGuard<'a, U> {
    pub fn begin(ui: &'a mut U) -> Self {
        ui.set_loading(true);
        ui.set_info_controls_visible(false);
        ui.set_panels(None);
        ui.set_description(None);
        Self { ui }
    }
}

impl<U: UiPort> Deref for LoadingGuard<'_, U> {
    type Target = U;

    fn deref(&self) -> &U {
        self.ui
    }
}

impl<U: UiPort> DerefMut for LoadingGuard<'_, U> {
    fn deref_mut(&mut self) -> &mut U {
        self.ui
    }
}

impl<U: UiPort> Drop for LoadingGuard<'_, U> {
    fn drop(&mut self) {
        self.ui.set_loading(false);
        self.ui.set_info_controls_visible(true);
    }
}

/// Everything a step setup mutates apart from the UI.
struct Scene<A> {
    assets: A,
    viewport: Viewport,
    sounds: SoundBank,
    session: SessionState,
}

impl<A: AssetStage> Scene<A> {
    async fn enter<U: UiPort>(
        &mut self,
        catalog: &SceneCatalog,
        index: usize,
        ui: &mut U,
    ) -> Result<(), AssetError> {
        let Some(step) = catalog.step(index) else {
            return Ok(());
        };

        if step.reuse_previous_models {
            log::debug!("scene {index} keeps the previous models");
        } else {
            self.assets.unload_all_models().await;

            let requests = step
                .models
                .iter()
                .map(|load| {
                    catalog
                        .model(load.model)
                        .map(|entry| ModelRequest {
                            entry,
                            visible: load.visible,
                        })
                        .ok_or(AssetError::UnknownModel(load.model))
                })
                .collect::<Result<Vec<_>, _>>()?;
            self.assets.load_models(&requests).await?;

            for &collider in &step.colliders {
                let entry = catalog
                    .model(collider)
                    .ok_or(AssetError::UnknownModel(collider))?;
                self.assets.load_collider(entry).await?;
            }
        }

        self.viewport
            .configure_camera(&step.camera, self.session.presentation);

        ui.set_background_visible(step.background_visible);
        ui.set_toggle_buttons(&step.buttons);
        ui.set_panels(step.panels.as_ref());
        ui.set_description(step.description.as_deref());
        ui.set_next_affordance(Some(&step.affordance));

        if let Some(track) = step.audio_track {
            self.sounds.play(&mut self.assets, track);
        }
        if let Some(initial) = step.initial_variant {
            self.apply_variant(catalog, step, initial, ui);
        }
        Ok(())
    }

    /// Apply variant `index` of `step`. Out-of-range indices do nothing.
    fn apply_variant<U: UiPort>(
        &mut self,
        catalog: &SceneCatalog,
        step: &SceneStep,
        index: usize,
        ui: &mut U,
    ) -> bool {
        match &step.variants {
            VariantSet::None => return false,
            VariantSet::Panels(pairs) => {
                let Some(pair) = pairs.get(index) else {
                    return false;
                };
                ui.set_panels(Some(pair));
            }
            VariantSet::Visibility(entries) => {
                let Some(entry) = entries.get(index) else {
                    return false;
                };
                let ids = |indices: &[usize]| -> Vec<String> {
                    indices
                        .iter()
                        .filter_map(|&i| catalog.model(i).map(|m| m.id.clone()))
                        .collect()
                };
                for id in ids(&entry.hide) {
                    self.assets.set_model_visibility(&id, false);
                }
                for id in ids(&entry.show) {
                    self.assets.set_model_visibility(&id, true);
                }
                ui.set_panels(Some(&entry.panels));
            }
            VariantSet::CameraStops(stops) => {
                let Some(stop) = stops.get(index) else {
                    return false;
                };
                let intent = CameraIntent::fixed(stop.position, stop.target, stop.fov);
                self.viewport
                    .configure_camera(&intent, self.session.presentation);
                ui.set_panels(Some(&stop.panels));
            }
        }
        ui.highlight_toggle(Some(index));
        self.session.variant = Some(index);
        log::debug!("variant {index} selected");
        true
    }

    async fn restart<U: UiPort>(&mut self, ui: &mut U) {
        log::info!("tour finished, restarting");
        self.assets.unload_all_models().await;
        self.session.step_index = -1;
        self.session.variant = None;
        self.viewport
            .configure_camera(&CameraIntent::default(), self.session.presentation);

        ui.set_toggle_buttons(&[]);
        ui.set_panels(None);
        ui.set_description(None);
        ui.set_background_visible(true);
        ui.set_next_affordance(Some("Start"));
    }
}

/// Finite-state driver of the tour.
pub struct Sequencer<A: AssetStage, U: UiPort> {
    catalog: SceneCatalog,
    scene: Scene<A>,
    ui: U,
}

impl<A: AssetStage, U: UiPort> Sequencer<A, U> {
    pub fn new(catalog: SceneCatalog, assets: A, ui: U, viewport: Viewport) -> Self {
        Self {
            catalog,
            scene: Scene {
                assets,
                viewport,
                sounds: SoundBank::new(),
                session: SessionState::default(),
            },
            ui,
        }
    }

    /// Load the catalog's sound tracks. Failures only leave silent slots.
    pub async fn load_sounds(&mut self) {
        self.scene.sounds = SoundBank::load_all(&mut self.scene.assets, &self.catalog.sounds).await;
    }

    /// Move to the next step, or restart after the last one.
    ///
    /// The index is advanced before setup begins and stays there if setup
    /// fails; the error carries the step that failed.
    pub async fn advance(&mut self) -> Result<StepOutcome, SequenceError> {
        self.scene.session.step_index += 1;
        self.scene.session.variant = None;
        let next = self.scene.session.step_index;

        let mut ui = LoadingGuard::begin(&mut self.ui);
        self.scene.assets.stop_sounds();

        let index = match usize::try_from(next) {
            Ok(index) if index < self.catalog.steps.len() => index,
            _ => {
                self.scene.restart(&mut *ui).await;
                return Ok(StepOutcome::Restarted);
            }
        };

        log::info!(
            "entering scene {index} ({})",
            self.catalog.steps[index].name
        );
        self.scene
            .enter(&self.catalog, index, &mut *ui)
            .await
            .map(|()| StepOutcome::Entered(index))
            .map_err(|source| SequenceError::Asset {
                step: index,
                source,
            })
    }

    /// Toggle-button click. Returns `false` when the current step has no
    /// variant `index`.
    pub fn select_variant(&mut self, index: usize) -> bool {
        let Some(step) = usize::try_from(self.scene.session.step_index)
            .ok()
            .and_then(|i| self.catalog.step(i))
        else {
            return false;
        };
        self.scene
            .apply_variant(&self.catalog, step, index, &mut self.ui)
    }

    /// -1 before the tour starts, otherwise 0..=5.
    pub fn current_step_index(&self) -> i32 {
        self.scene.session.step_index
    }

    pub fn current_step(&self) -> Option<&SceneStep> {
        usize::try_from(self.scene.session.step_index)
            .ok()
            .and_then(|i| self.catalog.step(i))
    }

    pub fn session(&self) -> &SessionState {
        &self.scene.session
    }

    /// Switch presentation and re-apply the current camera for it.
    pub fn set_presentation(&mut self, mode: PresentationMode) {
        self.scene.session.presentation = mode;
        let Some(step) = usize::try_from(self.scene.session.step_index)
            .ok()
            .and_then(|i| self.catalog.step(i))
        else {
            return;
        };
        self.scene.viewport.configure_camera(&step.camera, mode);
        if let Some(variant) = self.scene.session.variant {
            self.scene
                .apply_variant(&self.catalog, step, variant, &mut self.ui);
        }
    }

    /// Per-frame camera update.
    pub fn update(&mut self, dt: f32) {
        self.scene.viewport.update(dt);
    }

    /// Collision geometry and camera for this frame's movement tick.
    pub fn frame_parts(&mut self) -> (&CollisionField, &mut Viewport) {
        (self.scene.assets.collision_field(), &mut self.scene.viewport)
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    pub fn assets(&self) -> &A {
        &self.scene.assets
    }

    pub fn assets_mut(&mut self) -> &mut A {
        &mut self.scene.assets
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn viewport(&self) -> &Viewport {
        &self.scene.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.scene.viewport
    }

    pub fn sounds(&self) -> &SoundBank {
        &self.scene.sounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::memory_stage::MemoryAssetStage;
    use crate::tour::ui::UiState;
    use pollster::block_on;

    fn sequencer() -> Sequencer<MemoryAssetStage, UiState> {
        Sequencer::new(
            SceneCatalog::default(),
            MemoryAssetStage::demo(),
            UiState::new(),
            Viewport::default(),
        )
    }

    #[test]
    fn test_loading_guard_cleans_up_on_drop() {
        let mut ui = UiState::new();
        {
            let guard = LoadingGuard::begin(&mut ui);
            assert!(guard.loading);
            assert!(!guard.info_controls_visible);
        }
        assert!(!ui.loading);
        assert!(ui.info_controls_visible);
    }

    #[test]
    fn test_starts_before_first_step() {
        let sequencer = sequencer();
        assert_eq!(sequencer.current_step_index(), -1);
        assert!(sequencer.current_step().is_none());
    }

    #[test]
    fn test_select_variant_before_start_is_noop() {
        let mut sequencer = sequencer();
        assert!(!sequencer.select_variant(0));
        assert_eq!(sequencer.session().variant, None);
    }

    #[test]
    fn test_first_advance_enters_overview() {
        let mut sequencer = sequencer();
        let outcome = block_on(sequencer.advance()).unwrap();
        assert_eq!(outcome, StepOutcome::Entered(0));
        assert_eq!(sequencer.ui().affordance.as_deref(), Some("Start"));
        assert!(!sequencer.ui().loading);
    }

    #[test]
    fn test_sounds_follow_steps() {
        let mut sequencer = sequencer();
        block_on(sequencer.load_sounds());
        block_on(sequencer.advance()).unwrap();
        assert_eq!(sequencer.assets().playing_sound(), Some("city_ambience"));

        block_on(sequencer.advance()).unwrap();
        block_on(sequencer.advance()).unwrap();
        // Step 2 has no track; the previous one was stopped
        assert_eq!(sequencer.assets().playing_sound(), None);
    }
}
