//! UI Port
//!
//! The sequencer talks to the page chrome (loading indicator, toggle
//! buttons, content panels, affordance) only through [`UiPort`]. Each target
//! environment implements it once. [`UiState`] is the stock implementation:
//! it records what should be visible so a window title, an overlay or a test
//! can read it back.

use crate::tour::config::{PanelPair, ToggleButton};

pub trait UiPort {
    fn set_loading(&mut self, loading: bool);
    fn set_background_visible(&mut self, visible: bool);
    /// Info affordances: description, buttons, panels, next button.
    fn set_info_controls_visible(&mut self, visible: bool);
    /// Replace the toggle buttons. An empty slice hides them.
    fn set_toggle_buttons(&mut self, buttons: &[ToggleButton]);
    fn highlight_toggle(&mut self, index: Option<usize>);
    fn set_panels(&mut self, panels: Option<&PanelPair>);
    fn set_description(&mut self, text: Option<&str>);
    /// Label of the start/next/restart affordance, hidden when `None`.
    fn set_next_affordance(&mut self, label: Option<&str>);
    /// Blocking notification for errors the user has to act on.
    fn show_alert(&mut self, message: &str);
}

/// Recorded UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub loading: bool,
    pub background_visible: bool,
    pub info_controls_visible: bool,
    pub buttons: Vec<ToggleButton>,
    pub highlighted: Option<usize>,
    pub panels: Option<PanelPair>,
    pub description: Option<String>,
    pub affordance: Option<String>,
    pub last_alert: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    /// Landing page: background and a "Start" affordance.
    pub fn new() -> Self {
        Self {
            loading: false,
            background_visible: true,
            info_controls_visible: true,
            buttons: Vec::new(),
            highlighted: None,
            panels: None,
            description: None,
            affordance: Some("Start".to_string()),
            last_alert: None,
        }
    }

    pub fn button_labels(&self) -> Vec<&str> {
        self.buttons.iter().map(|b| b.label.as_str()).collect()
    }

    /// One-line summary, used for the window title.
    pub fn headline(&self) -> String {
        if self.loading {
            return "Loading…".to_string();
        }
        match (&self.description, &self.affordance) {
            (Some(text), _) => text.clone(),
            (None, Some(label)) => label.clone(),
            (None, None) => String::new(),
        }
    }
}

impl UiPort for UiState {
    fn set_loading(&mut self, loading: bool) {
        log::debug!("ui: loading={loading}");
        self.loading = loading;
    }

    fn set_background_visible(&mut self, visible: bool) {
        self.background_visible = visible;
    }

    fn set_info_controls_visible(&mut self, visible: bool) {
        self.info_controls_visible = visible;
    }

    fn set_toggle_buttons(&mut self, buttons: &[ToggleButton]) {
        log::debug!("ui: {} toggle buttons", buttons.len());
        self.buttons = buttons.to_vec();
        self.highlighted = None;
    }

    fn highlight_toggle(&mut self, index: Option<usize>) {
        self.highlighted = index.filter(|&i| i < self.buttons.len());
    }

    fn set_panels(&mut self, panels: Option<&PanelPair>) {
        if let Some(pair) = panels {
            log::debug!("ui: panels {} / {}", pair.left, pair.right);
        }
        self.panels = panels.cloned();
    }

    fn set_description(&mut self, text: Option<&str>) {
        self.description = text.map(str::to_string);
    }

    fn set_next_affordance(&mut self, label: Option<&str>) {
        self.affordance = label.map(str::to_string);
    }

    fn show_alert(&mut self, message: &str) {
        log::warn!("alert: {message}");
        self.last_alert = Some(message.to_string());
    }
}
