//! Raw pointer, touch and wheel events as delivered to a viewport.

use glam::Vec2;
use std::fmt;
use std::str::FromStr;

/// The event kinds a viewport accepts listeners for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    ContextMenu,
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    MouseWheel,
}

impl EventKind {
    /// Every kind, in binding order.
    pub const ALL: [EventKind; 8] = [
        EventKind::ContextMenu,
        EventKind::MouseDown,
        EventKind::MouseMove,
        EventKind::MouseUp,
        EventKind::TouchStart,
        EventKind::TouchMove,
        EventKind::TouchEnd,
        EventKind::MouseWheel,
    ];

    /// Listener name used by hosts (`"mousedown"`, `"touchend"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            EventKind::ContextMenu => "contextmenu",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseUp => "mouseup",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
            EventKind::MouseWheel => "mousewheel",
        }
    }

    /// Whether the event drives camera navigation rather than content interaction.
    pub fn is_navigation(self) -> bool {
        matches!(self, EventKind::ContextMenu | EventKind::MouseWheel)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown event name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event kind: {0}")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

/// A single input event.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub kind: EventKind,
    /// Pointer position in viewport pixels (first touch point for touch events).
    pub position: Vec2,
    pub button: Option<PointerButton>,
    /// Wheel movement; positive scrolls away from the user.
    pub wheel_delta: f32,
    /// All active touch points for touch events.
    pub touches: Vec<Vec2>,
}

impl InputEvent {
    fn pointer(kind: EventKind, position: Vec2, button: Option<PointerButton>) -> Self {
        Self {
            kind,
            position,
            button,
            wheel_delta: 0.0,
            touches: Vec::new(),
        }
    }

    fn touch(kind: EventKind, touches: Vec<Vec2>) -> Self {
        Self {
            kind,
            position: touches.first().copied().unwrap_or(Vec2::ZERO),
            button: None,
            wheel_delta: 0.0,
            touches,
        }
    }

    pub fn mouse_down(position: Vec2, button: PointerButton) -> Self {
        Self::pointer(EventKind::MouseDown, position, Some(button))
    }

    pub fn mouse_move(position: Vec2) -> Self {
        Self::pointer(EventKind::MouseMove, position, None)
    }

    pub fn mouse_up(position: Vec2, button: PointerButton) -> Self {
        Self::pointer(EventKind::MouseUp, position, Some(button))
    }

    pub fn context_menu(position: Vec2) -> Self {
        Self::pointer(EventKind::ContextMenu, position, Some(PointerButton::Secondary))
    }

    pub fn wheel(position: Vec2, delta: f32) -> Self {
        Self {
            wheel_delta: delta,
            ..Self::pointer(EventKind::MouseWheel, position, None)
        }
    }

    pub fn touch_start(touches: Vec<Vec2>) -> Self {
        Self::touch(EventKind::TouchStart, touches)
    }

    pub fn touch_move(touches: Vec<Vec2>) -> Self {
        Self::touch(EventKind::TouchMove, touches)
    }

    pub fn touch_end(touches: Vec<Vec2>) -> Self {
        Self::touch(EventKind::TouchEnd, touches)
    }
}
