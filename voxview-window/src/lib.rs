pub mod camera;
pub mod controls;
pub mod input;
pub mod render_loop;
pub mod router;
pub mod session;
pub mod standard;
pub mod viewport;

pub use camera::CameraPose;
pub use controls::{ControlSettings, DragController, DragMode, OrbitNavigation};
pub use input::{EventKind, InputEvent, PointerButton, UnknownEventKind};
pub use render_loop::{
    FIXED_STEP, FrameScheduler, FrameStatus, LoopError, LoopHandle, PendingFrame, RenderLoop,
};
pub use router::{InputRouter, ListenerBinding};
pub use session::{DrawError, RenderSession, SessionError, SessionFactory, SessionKind};
pub use standard::{FrameStats, StandardViewport, StandardViewportFactory};
pub use viewport::{
    Handler, ListenerRegistry, MountPoints, Navigation, SharedViewport, Viewport, ViewportError,
    ViewportFactory, dispatch_event,
};
