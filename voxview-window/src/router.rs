//! Binds viewport events to the viewport's content and navigation handlers.

use crate::input::{EventKind, InputEvent};
use crate::viewport::{Handler, SharedViewport, Viewport};
use std::rc::Rc;
use tracing::{debug, warn};

/// One registered listener: the kind it was registered under and the exact
/// handler reference used, so it can be removed again.
pub struct ListenerBinding {
    pub kind: EventKind,
    pub handler: Handler,
}

/// The full set of listeners bound to one viewport.
///
/// Attach and detach walk the same binding table, so every kind that was
/// registered is also unregistered.
pub struct InputRouter {
    bindings: Vec<ListenerBinding>,
}

impl InputRouter {
    /// Register one handler per [`EventKind`] on `viewport`.
    ///
    /// Handlers hold a weak reference; once the viewport is dropped they do
    /// nothing.
    pub fn attach(viewport: &SharedViewport) -> Self {
        let bindings: Vec<ListenerBinding> = EventKind::ALL
            .into_iter()
            .map(|kind| {
                let target = Rc::downgrade(viewport);
                let handler: Handler = Rc::new(move |event: &InputEvent| {
                    let Some(viewport) = target.upgrade() else {
                        return;
                    };
                    match viewport.try_borrow_mut() {
                        Ok(mut vp) => route(kind, &mut *vp, event),
                        Err(_) => warn!("Dropping {kind} event: viewport is busy"),
                    };
                });
                ListenerBinding { kind, handler }
            })
            .collect();

        {
            let mut vp = viewport.borrow_mut();
            for binding in &bindings {
                vp.add_listener(binding.kind, binding.handler.clone());
            }
        }
        debug!("Attached {} input listeners", bindings.len());

        Self { bindings }
    }

    /// Unregister every handler bound by [`InputRouter::attach`].
    ///
    /// Returns how many were actually found on the viewport.
    pub fn detach(self, viewport: &SharedViewport) -> usize {
        let mut vp = viewport.borrow_mut();
        let removed = self
            .bindings
            .iter()
            .filter(|binding| vp.remove_listener(binding.kind, &binding.handler))
            .count();
        if removed != self.bindings.len() {
            warn!(
                "Detached {removed} of {} input listeners; the rest were already gone",
                self.bindings.len()
            );
        } else {
            debug!("Detached {removed} input listeners");
        }
        removed
    }

    pub fn bindings(&self) -> &[ListenerBinding] {
        &self.bindings
    }
}

/// Forward an event to the content or navigation side of the viewport.
fn route(kind: EventKind, viewport: &mut dyn Viewport, event: &InputEvent) {
    match kind {
        EventKind::MouseWheel => viewport.navigation().mousewheel(event),
        EventKind::ContextMenu => viewport.navigation().contextmenu(event),
        EventKind::MouseDown => viewport.mousedown(event),
        EventKind::MouseMove => viewport.mousemove(event),
        EventKind::MouseUp => viewport.mouseup(event),
        EventKind::TouchStart => viewport.touchstart(event),
        EventKind::TouchMove => viewport.touchmove(event),
        EventKind::TouchEnd => viewport.touchend(event),
    }
}
