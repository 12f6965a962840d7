use glam::Vec2;
use tracing::trace;

use crate::camera::CameraPose;
use crate::input::{InputEvent, PointerButton};
use crate::viewport::Navigation;

/// Sensitivities shared by the navigation and drag controllers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    pub rotation_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub scroll_sensitivity: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            rotation_sensitivity: 0.005,
            pan_sensitivity: 0.0025,
            scroll_sensitivity: 0.2,
        }
    }
}

/// Wheel zoom and context-menu suppression.
///
/// Wheel input is accumulated and applied to the camera on the next
/// viewport advance.
#[derive(Debug, Default)]
pub struct OrbitNavigation {
    settings: ControlSettings,
    scroll: f32,
    suppressed_menus: u32,
}

impl OrbitNavigation {
    pub fn new(settings: ControlSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Pending wheel input, not yet applied.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll
    }

    /// Context menus swallowed so far.
    pub fn suppressed_menus(&self) -> u32 {
        self.suppressed_menus
    }

    /// Apply and reset pending wheel input.
    pub fn apply(&mut self, pose: &mut CameraPose) {
        if self.scroll != 0.0 {
            pose.zoom(-self.scroll * self.settings.scroll_sensitivity);
            self.scroll = 0.0;
        }
    }
}

impl Navigation for OrbitNavigation {
    fn mousewheel(&mut self, event: &InputEvent) {
        self.scroll += event.wheel_delta;
    }

    fn contextmenu(&mut self, _event: &InputEvent) {
        self.suppressed_menus += 1;
        trace!("Suppressed context menu #{}", self.suppressed_menus);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    mode: DragMode,
    button: Option<PointerButton>,
    last: Vec2,
}

/// Mouse and touch drags turned into orbit/pan motion.
///
/// Primary button or a single touch orbits; middle/secondary button or two
/// touches pan.
#[derive(Debug, Default)]
pub struct DragController {
    settings: ControlSettings,
    drag: Option<DragState>,
    rotate: Vec2,
    pan: Vec2,
}

impl DragController {
    pub fn new(settings: ControlSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Option<DragMode> {
        self.drag.map(|state| state.mode)
    }

    pub fn press(&mut self, button: PointerButton, position: Vec2) {
        let mode = match button {
            PointerButton::Primary => DragMode::Rotate,
            PointerButton::Middle | PointerButton::Secondary => DragMode::Pan,
            PointerButton::Other(_) => return,
        };
        self.drag = Some(DragState {
            mode,
            button: Some(button),
            last: position,
        });
    }

    pub fn release(&mut self, button: PointerButton) {
        if self.drag.is_some_and(|state| state.button == Some(button)) {
            self.drag = None;
        }
    }

    pub fn motion(&mut self, position: Vec2) {
        let Some(state) = self.drag.as_mut() else {
            return;
        };
        let delta = position - state.last;
        state.last = position;
        match state.mode {
            DragMode::Rotate => self.rotate += delta,
            DragMode::Pan => self.pan += delta,
        }
    }

    pub fn touch_begin(&mut self, touches: &[Vec2]) {
        self.drag = touch_anchor(touches).map(|(mode, last)| DragState {
            mode,
            button: None,
            last,
        });
    }

    pub fn touch_motion(&mut self, touches: &[Vec2]) {
        match (self.drag, touch_anchor(touches)) {
            (Some(state), Some((mode, position))) if state.button.is_none() && state.mode == mode => {
                self.motion(position);
            }
            // Finger count changed mid-gesture: restart from here.
            _ => self.touch_begin(touches),
        }
    }

    pub fn touch_end(&mut self, remaining: &[Vec2]) {
        if self.drag.is_some_and(|state| state.button.is_none()) {
            self.touch_begin(remaining);
        }
    }

    /// Apply and reset motion accumulated since the last call.
    pub fn apply(&mut self, pose: &mut CameraPose) {
        if self.rotate != Vec2::ZERO {
            pose.orbit(self.rotate, self.settings.rotation_sensitivity);
            self.rotate = Vec2::ZERO;
        }
        if self.pan != Vec2::ZERO {
            pose.pan(self.pan, self.settings.pan_sensitivity);
            self.pan = Vec2::ZERO;
        }
    }
}

fn touch_anchor(touches: &[Vec2]) -> Option<(DragMode, Vec2)> {
    match touches {
        [] => None,
        [single] => Some((DragMode::Rotate, *single)),
        [a, b, ..] => Some((DragMode::Pan, (*a + *b) * 0.5)),
    }
}
