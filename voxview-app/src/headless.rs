//! Headless frame host.
//!
//! Stands in for a display's frame callback: a `tokio` interval runs the
//! viewer's frame whenever the render loop asked for one.

use crate::errors::ViewerError;
use crate::viewer::Viewer;
use glam::Vec2;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use voxview_window::{FrameStatus, InputEvent, PendingFrame, PointerButton};

/// Why the host stopped driving frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostExit {
    FrameLimit,
    Interrupted,
    /// The loop stopped asking for frames.
    Idle,
}

pub struct HeadlessHost {
    interval: Duration,
    frame_limit: Option<u64>,
    spin: Option<f32>,
}

impl HeadlessHost {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frame_limit: None,
            spin: None,
        }
    }

    pub fn with_frame_limit(mut self, limit: Option<u64>) -> Self {
        self.frame_limit = limit;
        self
    }

    /// Feed a horizontal primary-button drag of `pixels` per frame.
    pub fn with_spin(mut self, pixels: Option<f32>) -> Self {
        self.spin = pixels;
        self
    }

    /// Drive frames until the limit, Ctrl-C, or the loop goes idle.
    ///
    /// Returns the exit reason and the number of frames this host ran.
    pub async fn run(
        &self,
        viewer: &mut Viewer,
        frames: &PendingFrame,
    ) -> Result<(HostExit, u64), ViewerError> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        if self.spin.is_some() {
            viewer.dispatch(&InputEvent::mouse_down(Vec2::ZERO, PointerButton::Primary));
        }

        let mut driven = 0u64;
        let exit = loop {
            if self.frame_limit.is_some_and(|limit| driven >= limit) {
                break HostExit::FrameLimit;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    if !frames.take() {
                        break HostExit::Idle;
                    }
                    if let Some(pixels) = self.spin {
                        let x = pixels * (driven + 1) as f32;
                        viewer.dispatch(&InputEvent::mouse_move(Vec2::new(x, 0.0)));
                    }
                    match viewer.frame()? {
                        FrameStatus::Stopped => break HostExit::Idle,
                        status => debug!("Host frame {}: {status:?}", driven + 1),
                    }
                    driven += 1;
                }
                _ = &mut ctrl_c => {
                    info!("Interrupted after {driven} frames");
                    break HostExit::Interrupted;
                }
            }
        };

        if self.spin.is_some() {
            viewer.dispatch(&InputEvent::mouse_up(Vec2::ZERO, PointerButton::Primary));
        }
        Ok((exit, driven))
    }
}
