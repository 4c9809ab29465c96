//! Input events consumed by the controller and the intents they map to.

/// Keys the carousel reacts to. Everything else is [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Same as the "next" control.
    ArrowRight,
    /// Same as the "previous" control.
    ArrowLeft,
    /// Ignored.
    Other,
}

/// Raw interaction events delivered by the host's event system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// "Next" control clicked.
    NextControl,
    /// "Previous" control clicked.
    PreviousControl,
    /// Key pressed anywhere in the document.
    KeyDown(Key),
    /// Pointer entered the gallery.
    PointerEnter,
    /// Pointer left the gallery.
    PointerLeave,
    /// Touch started at the given horizontal screen coordinate.
    TouchStart {
        /// Screen x in px.
        x: f32,
    },
    /// Touch ended at the given horizontal screen coordinate.
    TouchEnd {
        /// Screen x in px.
        x: f32,
    },
}

/// The only two position transitions an input can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// One step toward the end.
    Advance,
    /// One step toward the start.
    Retreat,
}

impl Key {
    /// Arrow keys stand in for the matching on-screen control.
    pub fn as_control(self) -> Option<InputEvent> {
        match self {
            Key::ArrowRight => Some(InputEvent::NextControl),
            Key::ArrowLeft => Some(InputEvent::PreviousControl),
            Key::Other => None,
        }
    }
}

impl std::str::FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ArrowRight" | "right" => Key::ArrowRight,
            "ArrowLeft" | "left" => Key::ArrowLeft,
            _ => Key::Other,
        })
    }
}
