//! Test doubles for the viewer's collaborators.

use crate::errors::FetchError;
use crate::fetch::PayloadFetcher;
use crate::ui::{PresentationMode, RootUi};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use voxview_data::AssetReference;
use voxview_window::{
    DrawError, MountPoints, RenderSession, SessionError, SessionFactory, SessionKind,
    SharedViewport, StandardViewport, ViewportFactory,
};

/// Hand-encoded `Data3` payloads.
pub mod payload {
    /// Field 2, empty length-delimited body.
    pub const SPARSE: &[u8] = &[0x12, 0x00];
    /// Field 1, empty length-delimited body.
    pub const VOXEL: &[u8] = &[0x0a, 0x00];
    pub const BOTH: &[u8] = &[0x0a, 0x00, 0x12, 0x00];
    /// Field 5 varint only.
    pub const NEITHER: &[u8] = &[0x28, 0x01];
    /// Field 1 claims five bytes but carries one.
    pub const TRUNCATED: &[u8] = &[0x0a, 0x05, 0x01];
}

enum Reply {
    Bytes(&'static [u8]),
    Hang,
}

/// Fetcher answering from a fixed URL table; unknown URLs are 404s.
#[derive(Default)]
pub struct ScriptedFetcher {
    replies: RefCell<HashMap<String, Reply>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, body: &'static [u8]) {
        self.replies
            .borrow_mut()
            .insert(url.to_string(), Reply::Bytes(body));
    }

    /// Never answer requests for `url`.
    pub fn hang(&self, url: &str) {
        self.replies.borrow_mut().insert(url.to_string(), Reply::Hang);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PayloadFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.borrow_mut().push(url.to_string());
        let body = match self.replies.borrow().get(url) {
            Some(Reply::Bytes(body)) => Some(body.to_vec()),
            Some(Reply::Hang) => None,
            None => {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                });
            }
        };
        match body {
            Some(body) => Ok(body),
            None => std::future::pending().await,
        }
    }
}

/// Root UI that records every mount.
#[derive(Clone, Default)]
pub struct RecordingUi {
    mounts: Rc<RefCell<Vec<PresentationMode>>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounts(&self) -> Vec<PresentationMode> {
        self.mounts.borrow().clone()
    }
}

impl RootUi for RecordingUi {
    fn mount(&mut self, mode: PresentationMode) {
        self.mounts.borrow_mut().push(mode);
    }
}

/// Viewport factory that keeps a handle on every viewport it builds.
#[derive(Clone, Default)]
pub struct RecordingViewports {
    built: Rc<RefCell<Vec<Rc<RefCell<StandardViewport>>>>>,
}

impl RecordingViewports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Rc<RefCell<StandardViewport>> {
        self.built.borrow()[index].clone()
    }

    pub fn count(&self) -> usize {
        self.built.borrow().len()
    }
}

impl ViewportFactory for RecordingViewports {
    fn create(&self, mounts: &MountPoints) -> SharedViewport {
        let viewport = Rc::new(RefCell::new(StandardViewport::new(mounts.clone())));
        self.built.borrow_mut().push(viewport.clone());
        viewport
    }
}

#[derive(Default)]
struct SessionLog {
    created: Vec<SessionKind>,
    draws: Vec<Rc<Cell<u32>>>,
    listeners_at_init: Vec<Rc<Cell<Option<usize>>>>,
    fail_next_init: bool,
    fail_draw_after: Option<u32>,
}

/// Session factory whose sessions record what happens to them.
#[derive(Clone, Default)]
pub struct RecordingSessions {
    log: Rc<RefCell<SessionLog>>,
    alive: Rc<Cell<usize>>,
}

impl RecordingSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> Vec<SessionKind> {
        self.log.borrow().created.clone()
    }

    /// Draw count of the `index`-th session created.
    pub fn draws(&self, index: usize) -> u32 {
        self.log.borrow().draws[index].get()
    }

    /// Listener count on the viewport when the `index`-th session's init ran.
    pub fn listeners_seen_at_init(&self, index: usize) -> Option<usize> {
        self.log.borrow().listeners_at_init[index].get()
    }

    /// Sessions created and not yet dropped.
    pub fn alive(&self) -> usize {
        self.alive.get()
    }

    pub fn fail_next_init(&self) {
        self.log.borrow_mut().fail_next_init = true;
    }

    /// Every session created from now on fails its draw after `frames` frames.
    pub fn fail_draw_after(&self, frames: u32) {
        self.log.borrow_mut().fail_draw_after = Some(frames);
    }
}

impl SessionFactory for RecordingSessions {
    fn create(&self, kind: SessionKind) -> Box<dyn RenderSession> {
        let mut log = self.log.borrow_mut();
        let draws = Rc::new(Cell::new(0));
        let listeners_at_init = Rc::new(Cell::new(None));
        log.created.push(kind);
        log.draws.push(draws.clone());
        log.listeners_at_init.push(listeners_at_init.clone());
        self.alive.set(self.alive.get() + 1);

        Box::new(RecordingSession {
            kind,
            draws,
            listeners_at_init,
            fail_init: std::mem::take(&mut log.fail_next_init),
            fail_draw_after: log.fail_draw_after,
            ready: false,
            alive: self.alive.clone(),
        })
    }
}

struct RecordingSession {
    kind: SessionKind,
    draws: Rc<Cell<u32>>,
    listeners_at_init: Rc<Cell<Option<usize>>>,
    fail_init: bool,
    fail_draw_after: Option<u32>,
    ready: bool,
    alive: Rc<Cell<usize>>,
}

#[async_trait(?Send)]
impl RenderSession for RecordingSession {
    async fn init(
        &mut self,
        viewport: SharedViewport,
        asset: &AssetReference,
    ) -> Result<(), SessionError> {
        self.listeners_at_init
            .set(Some(viewport.borrow().listener_count()));
        tokio::task::yield_now().await;
        if self.fail_init {
            return Err(SessionError::Load {
                asset: asset.to_string(),
                reason: "scripted failure".into(),
            });
        }
        self.ready = true;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), DrawError> {
        if !self.ready {
            return Err(DrawError::NotReady);
        }
        if self.fail_draw_after == Some(self.draws.get()) {
            return Err(DrawError::Failed("scripted failure".into()));
        }
        self.draws.set(self.draws.get() + 1);
        Ok(())
    }

    fn kind(&self) -> SessionKind {
        self.kind
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        self.alive.set(self.alive.get() - 1);
    }
}
