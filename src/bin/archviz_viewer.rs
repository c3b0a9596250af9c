//! Archviz Viewer
//!
//! Guided tour of an architectural model: six scene steps ending in a
//! first-person walkthrough.
//!
//! Run with: `cargo run --bin archviz_viewer -- --assets assets`
//!
//! Controls:
//! - Click / Enter / N: start and advance the tour
//! - Right click: the start / next / restart button (also in the walkthrough)
//! - 1-6: toggle buttons of the current step
//! - WASD / arrows: walk (walkthrough, after clicking into the window)
//! - Space: jump, Shift: sprint
//! - Mouse: look around while the pointer is captured
//! - ESC: release the pointer, or exit when it is already free

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowAttributes, WindowId};

use archviz_engine::KeyCode;
use archviz_engine::tour::{
    AssetStage, GltfAssetStage, InputResponse, MemoryAssetStage, Orchestrator, StepOutcome,
    UiState, ViewerConfig, detect_presentation,
};

/// Longest frame step fed to movement, in seconds
const MAX_FRAME_DT: f32 = 0.1;

/// Architectural visualization tour viewer
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory model and sound urls are resolved against
    #[arg(long, value_name = "DIR", default_value = "assets")]
    assets: PathBuf,

    /// JSON file replacing the built-in scene catalog
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// JSON file overriding physics constants
    #[arg(long, value_name = "FILE")]
    physics: Option<PathBuf>,

    /// Present in VR when a headset is available
    #[arg(long)]
    vr: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

struct ViewerApp<A: AssetStage> {
    window: Option<Arc<Window>>,
    tour: Orchestrator<A, UiState>,
    last_frame: Instant,
    last_title: String,
}

impl<A: AssetStage> ViewerApp<A> {
    fn new(tour: Orchestrator<A, UiState>) -> Self {
        Self {
            window: None,
            tour,
            last_frame: Instant::now(),
            last_title: String::new(),
        }
    }

    fn advance(&mut self) {
        match pollster::block_on(self.tour.advance_scene()) {
            Ok(StepOutcome::Entered(step)) => log::debug!("scene {step} ready"),
            Ok(StepOutcome::Restarted) => log::debug!("back at the landing page"),
            // Already logged and alerted by the orchestrator
            Err(_) => {}
        }
    }

    fn respond(&mut self, response: InputResponse, event_loop: &ActiveEventLoop) {
        match response {
            InputResponse::AdvanceRequested => self.advance(),
            InputResponse::ExitRequested => event_loop.exit(),
            InputResponse::Consumed | InputResponse::Unbound => {}
        }
    }

    /// Push capture state and the title to the window.
    fn sync_window(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        if self.tour.capture().is_dirty() {
            self.tour.capture_mut().apply_to_window(window);
        }

        let ui = self.tour.ui();
        let mut title = format!("Archviz Tour - {}", ui.headline());
        if self.tour.in_walkthrough() {
            title.push_str(" | ");
            title.push_str(self.tour.capture().status_message());
        }
        if !ui.button_labels().is_empty() {
            title.push_str(&format!(" | [1-6] {}", ui.button_labels().join(" / ")));
        }
        if title != self.last_title {
            window.set_title(&title);
            self.last_title = title;
        }
    }
}

impl<A: AssetStage> ApplicationHandler for ViewerApp<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = WindowAttributes::default()
            .with_title("Archviz Tour")
            .with_inner_size(PhysicalSize::new(1600, 900));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                if size.height > 0 {
                    let aspect = size.width as f32 / size.height as f32;
                    self.tour.sequencer_mut().viewport_mut().set_aspect(aspect);
                }
                self.window = Some(Arc::new(window));
                self.last_frame = Instant::now();
                self.sync_window();
            }
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    let response = self.tour.handle_key(KeyCode::from_winit(key), pressed);
                    self.respond(response, event_loop);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let response = self.tour.handle_click();
                self.respond(response, event_loop);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Right,
                ..
            } => {
                let response = self.tour.handle_affordance_click();
                self.respond(response, event_loop);
            }
            WindowEvent::Focused(focused) => self.tour.set_focus(focused),
            WindowEvent::Resized(size) => {
                if size.height > 0 {
                    let aspect = size.width as f32 / size.height as f32;
                    self.tour.sequencer_mut().viewport_mut().set_aspect(aspect);
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now
                    .duration_since(self.last_frame)
                    .as_secs_f32()
                    .min(MAX_FRAME_DT);
                self.last_frame = now;
                self.tour.update(dt);
            }
            _ => {}
        }
        self.sync_window();
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.tour.handle_mouse_motion(delta.0 as f32, delta.1 as f32);
        }
    }
}

fn run<A: AssetStage>(config: ViewerConfig, stage: A) -> anyhow::Result<()> {
    // No XR runtime is wired into the desktop viewer
    let mode = detect_presentation(config.vr_requested, false);
    let mut tour = Orchestrator::new(config, stage, UiState::new(), mode);
    pollster::block_on(tour.load_sounds());

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = ViewerApp::new(tour);
    event_loop.run_app(&mut app).context("event loop terminated abnormally")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level.as_str()))
        .init();

    let config = ViewerConfig::load(
        cli.assets.clone(),
        cli.catalog.as_deref(),
        cli.physics.as_deref(),
        cli.vr,
    )
    .context("failed to load viewer configuration")?;
    config
        .catalog
        .validate()
        .context("scene catalog is invalid")?;

    log::info!("archviz viewer starting, assets at {}", cli.assets.display());
    if config.asset_root.is_dir() {
        let stage = GltfAssetStage::new(config.asset_root.clone());
        run(config, stage)
    } else {
        log::warn!(
            "asset directory {} not found, touring the built-in demo geometry",
            config.asset_root.display()
        );
        run(config, MemoryAssetStage::demo())
    }
}
