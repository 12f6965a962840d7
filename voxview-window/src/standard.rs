//! Headless viewport with an orbit camera.

use crate::camera::CameraPose;
use crate::controls::{ControlSettings, DragController, OrbitNavigation};
use crate::input::{EventKind, InputEvent};
use crate::viewport::{
    Handler, ListenerRegistry, MountPoints, Navigation, SharedViewport, Viewport, ViewportError,
    ViewportFactory,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Per-viewport frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub clears: u64,
    pub advances: u64,
    /// Sum of all `delta` values passed to `advance`.
    pub logical_time: f64,
}

#[derive(Debug)]
pub struct StandardViewport {
    mounts: MountPoints,
    listeners: ListenerRegistry,
    navigation: OrbitNavigation,
    drag: DragController,
    pose: CameraPose,
    stats: FrameStats,
    initialized: bool,
    disposed: bool,
}

impl StandardViewport {
    pub fn new(mounts: MountPoints) -> Self {
        Self::with_settings(mounts, ControlSettings::default())
    }

    pub fn with_settings(mounts: MountPoints, settings: ControlSettings) -> Self {
        Self {
            mounts,
            listeners: ListenerRegistry::new(),
            navigation: OrbitNavigation::new(settings),
            drag: DragController::new(settings),
            pose: CameraPose::default(),
            stats: FrameStats::default(),
            initialized: false,
            disposed: false,
        }
    }

    /// Viewport bound to the default mount points.
    pub fn headless() -> Self {
        Self::new(MountPoints::default())
    }

    pub fn mounts(&self) -> &MountPoints {
        &self.mounts
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn orbit_navigation(&self) -> &OrbitNavigation {
        &self.navigation
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Viewport for StandardViewport {
    fn init(&mut self) -> Result<(), ViewportError> {
        if self.disposed {
            return Err(ViewportError::Disposed);
        }
        for id in [&self.mounts.panel, &self.mounts.canvas] {
            if id.trim().is_empty() {
                return Err(ViewportError::MountNotFound(id.clone()));
            }
        }
        self.initialized = true;
        debug!(
            "Viewport bound to #{} / #{}",
            self.mounts.panel, self.mounts.canvas
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.stats.clears += 1;
    }

    fn advance(&mut self, _elapsed: f64, delta: f64) {
        self.drag.apply(&mut self.pose);
        self.navigation.apply(&mut self.pose);
        self.stats.advances += 1;
        self.stats.logical_time += delta;
    }

    fn add_listener(&mut self, kind: EventKind, handler: Handler) {
        self.listeners.add(kind, handler);
    }

    fn remove_listener(&mut self, kind: EventKind, handler: &Handler) -> bool {
        self.listeners.remove(kind, handler)
    }

    fn listeners(&self, kind: EventKind) -> Vec<Handler> {
        self.listeners.handlers(kind)
    }

    fn navigation(&mut self) -> &mut dyn Navigation {
        &mut self.navigation
    }

    fn mousedown(&mut self, event: &InputEvent) {
        if let Some(button) = event.button {
            self.drag.press(button, event.position);
        }
    }

    fn mousemove(&mut self, event: &InputEvent) {
        self.drag.motion(event.position);
    }

    fn mouseup(&mut self, event: &InputEvent) {
        if let Some(button) = event.button {
            self.drag.release(button);
        }
    }

    fn touchstart(&mut self, event: &InputEvent) {
        self.drag.touch_begin(&event.touches);
    }

    fn touchmove(&mut self, event: &InputEvent) {
        self.drag.touch_motion(&event.touches);
    }

    fn touchend(&mut self, event: &InputEvent) {
        self.drag.touch_end(&event.touches);
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let dropped = self.listeners.total();
        self.listeners.clear();
        self.disposed = true;
        self.initialized = false;
        info!(
            "Disposed viewport #{} after {} frames ({dropped} listeners dropped)",
            self.mounts.canvas, self.stats.advances
        );
    }

    fn listener_count(&self) -> usize {
        self.listeners.total()
    }
}

/// Creates [`StandardViewport`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardViewportFactory {
    pub settings: ControlSettings,
}

impl ViewportFactory for StandardViewportFactory {
    fn create(&self, mounts: &MountPoints) -> SharedViewport {
        Rc::new(RefCell::new(StandardViewport::with_settings(
            mounts.clone(),
            self.settings,
        )))
    }
}
