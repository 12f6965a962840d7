//! Cancellable per-frame render loop.
//!
//! Each tick clears the viewport, advances it by a fixed logical step, draws
//! the session and asks the host for another frame. The host decides when
//! that frame runs (display refresh, timer, test harness) and calls
//! [`RenderLoop::tick`] again.

use crate::session::{DrawError, RenderSession, SessionKind};
use crate::viewport::SharedViewport;
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};

/// Logical time units the viewport advances per frame, regardless of how much
/// wall-clock time actually passed.
pub const FIXED_STEP: f64 = 16.0;

/// Host-side frame scheduling primitive.
pub trait FrameScheduler {
    /// Ask for one more frame callback.
    fn request_frame(&self);
}

/// A frame-request flag that a host polls.
///
/// Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct PendingFrame {
    requested: Rc<Cell<bool>>,
    requests: Rc<Cell<u64>>,
}

impl PendingFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request, returning whether there was one.
    pub fn take(&self) -> bool {
        self.requested.replace(false)
    }

    pub fn is_pending(&self) -> bool {
        self.requested.get()
    }

    /// Total number of requests ever made.
    pub fn requests(&self) -> u64 {
        self.requests.get()
    }
}

impl FrameScheduler for PendingFrame {
    fn request_frame(&self) {
        self.requested.set(true);
        self.requests.set(self.requests.get() + 1);
    }
}

/// Errors that end a render loop.
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("{kind} failed to draw frame {frame}: {source}")]
    Draw {
        kind: SessionKind,
        frame: u64,
        #[source]
        source: DrawError,
    },
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame was drawn; carries the number of frames drawn so far.
    Drawn(u64),
    /// The viewport was borrowed elsewhere; nothing was drawn, next frame requested.
    Skipped,
    /// The loop has been stopped; nothing was drawn or requested.
    Stopped,
}

/// Shared view of whether a loop may keep running.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Drives one session against one viewport.
pub struct RenderLoop {
    viewport: SharedViewport,
    session: Box<dyn RenderSession>,
    scheduler: Rc<dyn FrameScheduler>,
    running: Rc<Cell<bool>>,
    frames: u64,
}

impl RenderLoop {
    /// Start the loop: the first frame is drawn immediately and the next one
    /// requested from `scheduler`.
    pub fn start(
        viewport: SharedViewport,
        session: Box<dyn RenderSession>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Result<Self, LoopError> {
        info!("Starting render loop for {}", session.kind());
        let mut render_loop = Self {
            viewport,
            session,
            scheduler,
            running: Rc::new(Cell::new(true)),
            frames: 0,
        };
        render_loop.tick()?;
        Ok(render_loop)
    }

    /// Run one frame.
    ///
    /// A draw failure stops the loop before the error is returned.
    pub fn tick(&mut self) -> Result<FrameStatus, LoopError> {
        if !self.running.get() {
            return Ok(FrameStatus::Stopped);
        }

        match self.viewport.try_borrow_mut() {
            Ok(mut vp) => {
                vp.clear();
                vp.advance(0.0, FIXED_STEP);
            }
            Err(_) => {
                warn!("Viewport busy, skipping frame {}", self.frames + 1);
                self.scheduler.request_frame();
                return Ok(FrameStatus::Skipped);
            }
        }

        if let Err(source) = self.session.draw() {
            self.stop();
            let err = LoopError::Draw {
                kind: self.session.kind(),
                frame: self.frames + 1,
                source,
            };
            error!("Render loop stopped: {err}");
            return Err(err);
        }

        self.frames += 1;
        trace!("Drew frame {} for {}", self.frames, self.session.kind());
        self.scheduler.request_frame();
        Ok(FrameStatus::Drawn(self.frames))
    }

    /// Stop the loop. Later ticks do nothing.
    pub fn stop(&mut self) {
        if self.running.replace(false) {
            debug!(
                "Stopped render loop for {} after {} frames",
                self.session.kind(),
                self.frames
            );
        }
    }

    pub fn handle(&self) -> LoopHandle {
        LoopHandle {
            running: self.running.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn kind(&self) -> SessionKind {
        self.session.kind()
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.running.set(false);
    }
}
