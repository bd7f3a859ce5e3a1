//! Input model: interaction modes, pointer samples, and the gesture state.
//!
//! `Mode` is chosen by the surrounding UI before a gesture starts and decides
//! which pointer-downs the engine accepts. `Manipulation` is the single
//! gesture tracked between pointer-down and pointer-up/cancel; each active
//! variant carries exactly the context needed to preview the gesture and
//! commit (or roll back) on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CURSOR_CROSSHAIR, CURSOR_DEFAULT};
use crate::coords::Point;
use crate::roster::TokenId;
use crate::zones::{Side, Zone};

/// What a pointer-down does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Drag tokens between the surface and the bench (default).
    #[default]
    Move,
    /// Draw arrows on the surface; tokens are not draggable.
    Draw,
}

impl Mode {
    /// Cursor shown over the surface while no gesture is active.
    #[must_use]
    pub fn idle_cursor(self) -> &'static str {
        match self {
            Self::Move => CURSOR_DEFAULT,
            Self::Draw => CURSOR_CROSSHAIR,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button, pen contact, or a touch.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `PointerEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// One pointer sample: which pointer, and where in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// DOM `pointerId`; mouse and each touch contact get distinct ids.
    pub id: i32,
    pub client: Point,
}

impl Pointer {
    #[must_use]
    pub fn new(id: i32, x: f64, y: f64) -> Self {
        Self { id, client: Point::new(x, y) }
    }
}

/// UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Current interaction mode.
    pub mode: Mode,
    /// The token last activated by a click, if any.
    pub selected: Option<TokenId>,
    /// A bench token is being dragged and the pointer is over the surface.
    pub over_surface: bool,
}

/// The gesture in progress, if any.
#[derive(Debug, Clone, Default)]
pub enum Manipulation {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A token is being dragged.
    MovingToken {
        /// Id of the dragged token.
        token: TokenId,
        /// Zone holding the token when the gesture began.
        source: Zone,
        /// Pointer that owns the gesture; other pointers are ignored.
        pointer_id: i32,
        /// Client position at pointer-down, for click detection.
        start_client: Point,
        /// Live preview position for surface tokens.
        live: Option<Point>,
    },
    /// An arrow is being drawn on the surface.
    DrawingArrow {
        /// Side whose surface the arrow is drawn on.
        side: Side,
        /// Pointer that owns the gesture.
        pointer_id: i32,
        /// Tail, in surface percent.
        start: Point,
        /// Current head, in surface percent (unclamped).
        end: Point,
    },
}

impl Manipulation {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The pointer that owns the active gesture.
    #[must_use]
    pub fn pointer_id(&self) -> Option<i32> {
        match self {
            Self::Idle => None,
            Self::MovingToken { pointer_id, .. } | Self::DrawingArrow { pointer_id, .. } => Some(*pointer_id),
        }
    }
}
