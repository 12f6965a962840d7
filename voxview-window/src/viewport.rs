//! The viewport contract and listener bookkeeping shared by implementations.

use crate::input::{EventKind, InputEvent};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::warn;

/// A registered event handler. Removal compares by reference, so keep the `Rc`
/// used at registration to unregister it later.
pub type Handler = Rc<dyn Fn(&InputEvent)>;

/// A viewport shared between the viewer, its input handlers and its session.
pub type SharedViewport = Rc<RefCell<dyn Viewport>>;

/// Errors raised by viewport implementations.
#[derive(Debug, Error)]
pub enum ViewportError {
    #[error("Mount point not found: {0}")]
    MountNotFound(String),

    #[error("Viewport already disposed")]
    Disposed,
}

/// The pair of host elements a viewport binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoints {
    pub panel: String,
    pub canvas: String,
}

impl MountPoints {
    pub fn new(panel: impl Into<String>, canvas: impl Into<String>) -> Self {
        Self {
            panel: panel.into(),
            canvas: canvas.into(),
        }
    }
}

impl Default for MountPoints {
    fn default() -> Self {
        Self::new("id_div_panel", "id_div_canvas")
    }
}

/// Camera/view navigation owned by a viewport.
pub trait Navigation {
    fn mousewheel(&mut self, event: &InputEvent);
    fn contextmenu(&mut self, event: &InputEvent);
}

/// A panel/canvas pair with navigation state and listener registration.
///
/// Implementations own their listeners; hosts deliver events through
/// [`dispatch_event`].
pub trait Viewport {
    /// Prepare the draw target. Called once before any listener is attached.
    fn init(&mut self) -> Result<(), ViewportError>;

    /// Clear the draw target ahead of a frame.
    fn clear(&mut self);

    /// Advance view/navigation state by `delta` logical time units.
    fn advance(&mut self, elapsed: f64, delta: f64);

    fn add_listener(&mut self, kind: EventKind, handler: Handler);

    /// Unregister `handler` for `kind`. Returns whether it was registered.
    fn remove_listener(&mut self, kind: EventKind, handler: &Handler) -> bool;

    /// Handlers currently registered for `kind`, in registration order.
    fn listeners(&self, kind: EventKind) -> Vec<Handler>;

    fn navigation(&mut self) -> &mut dyn Navigation;

    fn mousedown(&mut self, event: &InputEvent);
    fn mousemove(&mut self, event: &InputEvent);
    fn mouseup(&mut self, event: &InputEvent);
    fn touchstart(&mut self, event: &InputEvent);
    fn touchmove(&mut self, event: &InputEvent);
    fn touchend(&mut self, event: &InputEvent);

    /// Release host resources. Listeners still registered are dropped.
    fn dispose(&mut self) {}

    /// Total listeners across all kinds.
    fn listener_count(&self) -> usize {
        EventKind::ALL
            .into_iter()
            .map(|kind| self.listeners(kind).len())
            .sum()
    }
}

/// Builds fresh, uninitialized viewports bound to a pair of mount points.
pub trait ViewportFactory {
    fn create(&self, mounts: &MountPoints) -> SharedViewport;
}

/// Event name → handler table that viewport implementations can embed.
#[derive(Default)]
pub struct ListenerRegistry {
    handlers: HashMap<EventKind, Vec<Handler>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    pub fn remove(&mut self, kind: EventKind, handler: &Handler) -> bool {
        let Some(list) = self.handlers.get_mut(&kind) else {
            return false;
        };
        let Some(idx) = list.iter().position(|h| Rc::ptr_eq(h, handler)) else {
            return false;
        };
        list.remove(idx);
        if list.is_empty() {
            self.handlers.remove(&kind);
        }
        true
    }

    pub fn handlers(&self, kind: EventKind) -> Vec<Handler> {
        self.handlers.get(&kind).cloned().unwrap_or_default()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    pub fn total(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self
            .handlers
            .iter()
            .map(|(kind, list)| (kind.name(), list.len()))
            .collect();
        counts.sort();
        f.debug_struct("ListenerRegistry")
            .field("handlers", &counts)
            .finish()
    }
}

/// Deliver `event` to every listener registered for its kind.
///
/// The handler list is copied out before any handler runs, so handlers are
/// free to borrow the viewport mutably. Returns the number of handlers invoked.
pub fn dispatch_event(viewport: &SharedViewport, event: &InputEvent) -> usize {
    let handlers = match viewport.try_borrow() {
        Ok(vp) => vp.listeners(event.kind),
        Err(_) => {
            warn!("Dropping {} event: viewport is busy", event.kind);
            return 0;
        }
    };
    for handler in &handlers {
        handler(event);
    }
    handlers.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_handler(counter: &Rc<Cell<u32>>) -> Handler {
        let counter = counter.clone();
        Rc::new(move |_event: &InputEvent| counter.set(counter.get() + 1))
    }

    #[test]
    fn test_remove_matches_by_reference() {
        let counter = Rc::new(Cell::new(0));
        let first = counting_handler(&counter);
        let second = counting_handler(&counter);

        let mut registry = ListenerRegistry::new();
        registry.add(EventKind::MouseDown, first.clone());
        registry.add(EventKind::MouseDown, second.clone());
        assert_eq!(registry.count(EventKind::MouseDown), 2);

        // An equivalent but distinct closure is not the registered one.
        let lookalike = counting_handler(&counter);
        assert!(!registry.remove(EventKind::MouseDown, &lookalike));

        assert!(registry.remove(EventKind::MouseDown, &first));
        assert_eq!(registry.count(EventKind::MouseDown), 1);
        assert!(Rc::ptr_eq(&registry.handlers(EventKind::MouseDown)[0], &second));
    }

    #[test]
    fn test_remove_under_wrong_kind_fails() {
        let counter = Rc::new(Cell::new(0));
        let handler = counting_handler(&counter);
        let mut registry = ListenerRegistry::new();
        registry.add(EventKind::TouchStart, handler.clone());
        assert!(!registry.remove(EventKind::TouchEnd, &handler));
        assert_eq!(registry.total(), 1);
        assert!(registry.remove(EventKind::TouchStart, &handler));
        assert_eq!(registry.total(), 0);
    }

    #[test]
    fn test_default_mount_points() {
        let mounts = MountPoints::default();
        assert_eq!(mounts.panel, "id_div_panel");
        assert_eq!(mounts.canvas, "id_div_canvas");
    }
}
