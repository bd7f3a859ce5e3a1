//! The interaction engine: pointer events in, committed board changes out.
//!
//! `EngineCore` owns the roster, the arrows, and the single active
//! [`Manipulation`]. Hosts feed it pointer samples plus a [`ZoneMeasure`] for
//! live zone rectangles, and apply the returned [`Action`]s: commit events go
//! to persistence, host effects (pointer tracking, cursor, redraw) go to the
//! view. A gesture that does not meet its geometric criteria simply commits
//! nothing; no handler fails.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::annotation::{Annotations, Arrow, ArrowId};
use crate::config::EngineConfig;
use crate::consts::CURSOR_GRABBING;
use crate::coords::{Point, Rect, to_percentage, to_percentage_clamped, try_to_percentage};
use crate::hit::{Tolerance, find_nearest};
use crate::input::{Button, Manipulation, Mode, Pointer, UiState};
use crate::layout::{MarkerLayout, hit_tolerance, marker_layout};
use crate::roster::{Roster, RosterError, Token, TokenDetails, TokenId};
use crate::zones::{DropTarget, Side, Zone, ZoneKind, ZoneMeasure, classify};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// A surface token was dragged to a new position.
    PositionChanged { token: TokenId, position: Point },
    /// A token changed zones without displacing another.
    Transferred { token: TokenId, from: Zone, to: Zone, position: Option<Point> },
    /// A bench token replaced a surface token, which went to the bench.
    Swapped { bench_token: TokenId, surface_token: TokenId },
    ArrowAdded { arrow: Arrow },
    ArrowRemoved { id: ArrowId },
    /// A surface token was clicked rather than dragged.
    TokenActivated { token: TokenId },
    /// Start following this pointer outside the zone elements.
    TrackPointer { pointer_id: i32 },
    /// Stop following the pointer; the gesture is over.
    ReleasePointer,
    SetCursor { cursor: String },
    RenderNeeded,
}

/// Core engine state, independent of the DOM so it can be tested natively.
#[derive(Default)]
pub struct EngineCore {
    pub roster: Roster,
    pub arrows: Annotations,
    pub ui: UiState,
    pub manipulation: Manipulation,
    pub config: EngineConfig,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config, ..Self::default() }
    }

    // --- Data inputs ---

    /// Hydrate one side's surface and bench from the roster store.
    pub fn load_roster(&mut self, side: Side, surface: Vec<Token>, bench: Vec<Token>) -> Result<(), RosterError> {
        if !self.manipulation.is_idle() {
            warn!(?side, "roster reloaded during an active gesture");
        }
        self.roster.load(side, surface, bench)
    }

    /// Hydrate the arrow list.
    pub fn load_arrows(&mut self, arrows: Vec<Arrow>) {
        self.arrows.load(arrows);
    }

    /// A token was created by the roster editor.
    pub fn apply_token_added(&mut self, zone: Zone, token: Token) -> Result<(), RosterError> {
        self.roster.insert(zone, token)
    }

    /// A token's name, number, note, or label was edited.
    pub fn apply_token_updated(&mut self, id: TokenId, details: &TokenDetails) -> Result<(), RosterError> {
        self.roster.update_details(id, details)
    }

    /// A token was deleted by the roster editor. Cancels a drag of that token.
    pub fn apply_token_removed(&mut self, id: TokenId) -> Vec<Action> {
        let mut actions = Vec::new();
        if matches!(self.manipulation, Manipulation::MovingToken { token, .. } if token == id) {
            actions = self.cancel();
        }
        if self.roster.remove(id).is_some() {
            if self.ui.selected == Some(id) {
                self.ui.selected = None;
            }
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Mode / arrows ---

    /// Switch between moving tokens and drawing arrows. Ignored mid-gesture.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if !self.manipulation.is_idle() {
            trace!(?mode, "mode change ignored during gesture");
            return false;
        }
        self.ui.mode = mode;
        true
    }

    /// Delete an arrow the user picked. Only honored in draw mode.
    pub fn remove_arrow(&mut self, id: &ArrowId) -> Vec<Action> {
        if self.ui.mode != Mode::Draw {
            trace!(%id, "arrow removal ignored outside draw mode");
            return Vec::new();
        }
        match self.arrows.remove(id) {
            Some(_) => {
                debug!(%id, "arrow removed");
                vec![Action::ArrowRemoved { id: *id }, Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    /// Delete every arrow. Only honored in draw mode.
    pub fn clear_arrows(&mut self) -> Vec<Action> {
        if self.ui.mode != Mode::Draw {
            return Vec::new();
        }
        let mut actions: Vec<Action> = self
            .arrows
            .clear()
            .into_iter()
            .map(|arrow| Action::ArrowRemoved { id: arrow.id })
            .collect();
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Pointer input ---

    /// Pointer pressed on a token, on the surface or on a bench.
    pub fn on_token_pointer_down(&mut self, token: TokenId, pointer: Pointer, button: Button) -> Vec<Action> {
        if button != Button::Primary || self.ui.mode != Mode::Move || !self.manipulation.is_idle() {
            trace!(token, ?button, mode = ?self.ui.mode, "token pointer-down ignored");
            return Vec::new();
        }
        let Some(source) = self.roster.locate(token) else {
            warn!(token, "pointer-down on unknown token");
            return Vec::new();
        };
        debug!(token, ?source, "token drag started");
        self.manipulation = Manipulation::MovingToken {
            token,
            source,
            pointer_id: pointer.id,
            start_client: pointer.client,
            live: None,
        };
        vec![
            Action::TrackPointer { pointer_id: pointer.id },
            Action::SetCursor { cursor: CURSOR_GRABBING.to_string() },
        ]
    }

    /// Pointer pressed on empty surface.
    pub fn on_surface_pointer_down(
        &mut self,
        side: Side,
        pointer: Pointer,
        button: Button,
        zones: &impl ZoneMeasure,
    ) -> Vec<Action> {
        if button != Button::Primary || self.ui.mode != Mode::Draw || !self.manipulation.is_idle() {
            trace!(?button, mode = ?self.ui.mode, "surface pointer-down ignored");
            return Vec::new();
        }
        let Some(start) = self.surface_point(side, pointer.client, zones) else {
            debug!(?side, "surface not laid out; arrow not started");
            return Vec::new();
        };

        debug!(?side, ?start, "arrow drawing started");
        self.manipulation = Manipulation::DrawingArrow { side, pointer_id: pointer.id, start, end: start };
        vec![Action::TrackPointer { pointer_id: pointer.id }]
    }

    /// Pointer moved anywhere in the window.
    pub fn on_pointer_move(&mut self, pointer: Pointer, zones: &impl ZoneMeasure) -> Vec<Action> {
        if self.manipulation.pointer_id() != Some(pointer.id) {
            return Vec::new();
        }
        match &mut self.manipulation {
            Manipulation::MovingToken { source, live, .. } => match source.kind {
                ZoneKind::Surface => {
                    let Some(rect) = live_rect(zones, *source) else {
                        return Vec::new();
                    };
                    *live = Some(to_percentage_clamped(pointer.client, &rect));
                    vec![Action::RenderNeeded]
                }
                ZoneKind::Bench => {
                    let over = classify(zones, source.side, pointer.client) == DropTarget::Surface;
                    if over == self.ui.over_surface {
                        return Vec::new();
                    }
                    self.ui.over_surface = over;
                    vec![Action::RenderNeeded]
                }
            },
            Manipulation::DrawingArrow { side, end, .. } => {
                let rect = live_rect(zones, Zone::surface(*side));
                let Some(p) = rect.and_then(|r| try_to_percentage(pointer.client, &r)) else {
                    return Vec::new();
                };
                *end = p;
                vec![Action::RenderNeeded]
            }
            Manipulation::Idle => Vec::new(),
        }
    }

    /// Pointer released anywhere in the window. Classifies the drop and commits.
    ///
    /// Any release of the owning pointer ends the gesture; a non-primary
    /// release aborts it instead of committing.
    pub fn on_pointer_up(&mut self, pointer: Pointer, button: Button, zones: &impl ZoneMeasure) -> Vec<Action> {
        if self.manipulation.pointer_id() != Some(pointer.id) {
            return Vec::new();
        }
        if button != Button::Primary {
            debug!(?button, "gesture ended by non-primary release");
            return self.cancel();
        }
        let mut actions = match std::mem::take(&mut self.manipulation) {
            Manipulation::MovingToken { token, source, start_client, .. } => {
                self.finish_move(token, source, start_client, pointer.client, zones)
            }
            Manipulation::DrawingArrow { side, start, end, .. } => {
                let end = self.surface_point(side, pointer.client, zones).unwrap_or(end);
                self.finish_arrow(side, start, end, zones)
            }
            Manipulation::Idle => return Vec::new(),
        };
        actions.extend(self.end_gesture());
        actions
    }

    /// The browser cancelled the pointer (touch turned into a scroll, etc.).
    pub fn on_pointer_cancel(&mut self, pointer_id: i32) -> Vec<Action> {
        if self.manipulation.pointer_id() != Some(pointer_id) {
            return Vec::new();
        }
        self.cancel()
    }

    /// The window lost focus; no pointer-up will arrive.
    pub fn on_blur(&mut self) -> Vec<Action> {
        self.cancel()
    }

    /// Keyboard input. Escape aborts the active gesture.
    pub fn on_key_down(&mut self, key: &str) -> Vec<Action> {
        if key == "Escape" {
            return self.cancel();
        }
        Vec::new()
    }

    /// Abort the active gesture without committing anything.
    pub fn cancel(&mut self) -> Vec<Action> {
        if self.manipulation.is_idle() {
            return Vec::new();
        }
        let previous = std::mem::take(&mut self.manipulation);
        debug!(?previous, "gesture cancelled");
        self.end_gesture()
    }

    // --- Commit ---

    fn finish_move(
        &mut self,
        token: TokenId,
        source: Zone,
        start_client: Point,
        release: Point,
        zones: &impl ZoneMeasure,
    ) -> Vec<Action> {
        let target = classify(zones, source.side, release);
        let travel = start_client.delta(release);
        let threshold = self.config.click_threshold_px;
        let is_click = travel.x.abs() < threshold && travel.y.abs() < threshold;
        let surface = Zone::surface(source.side);

        match (source.kind, target) {
            (ZoneKind::Bench, DropTarget::Surface) => {
                let Some(rect) = live_rect(zones, surface) else {
                    return Vec::new();
                };
                let tolerance = self.tolerance(&rect);
                let hit = find_nearest(to_percentage(release, &rect), self.roster.tokens(surface), tolerance);
                if let Some(surface_token) = hit.map(|t| t.id) {
                    if let Err(e) = self.roster.swap(token, surface_token) {
                        warn!(error = %e, token, surface_token, "swap failed; reverting");
                        return Vec::new();
                    }
                    debug!(bench_token = token, surface_token, "tokens swapped");
                    return vec![Action::Swapped { bench_token: token, surface_token }];
                }
                let position = to_percentage_clamped(release, &rect);
                self.transfer(token, source, surface, Some(position))
            }
            (ZoneKind::Surface, DropTarget::Bench) => self.transfer(token, source, Zone::bench(source.side), None),
            (ZoneKind::Surface, DropTarget::Surface) if !is_click => {
                let Some(rect) = live_rect(zones, surface) else {
                    return Vec::new();
                };
                let position = to_percentage_clamped(release, &rect);
                if !self.roster.set_position(token, position) {
                    warn!(token, "moved token is no longer on the surface");
                    return Vec::new();
                }
                debug!(token, ?position, "token moved");
                vec![Action::PositionChanged { token, position }]
            }
            (ZoneKind::Surface, _) if is_click => {
                debug!(token, "token activated");
                self.ui.selected = Some(token);
                vec![Action::TokenActivated { token }]
            }
            (ZoneKind::Bench, DropTarget::Bench) => Vec::new(),
            _ => {
                debug!(token, ?source, ?target, "drop outside zones; reverting");
                Vec::new()
            }
        }
    }

    fn transfer(&mut self, token: TokenId, from: Zone, to: Zone, position: Option<Point>) -> Vec<Action> {
        if let Err(e) = self.roster.transfer(token, to.kind, position) {
            warn!(error = %e, token, "transfer failed; reverting");
            return Vec::new();
        }
        debug!(token, ?from, ?to, "token transferred");
        vec![Action::Transferred { token, from, to, position }]
    }

    fn finish_arrow(&mut self, side: Side, start: Point, end: Point, zones: &impl ZoneMeasure) -> Vec<Action> {
        let (length, threshold) = match live_rect(zones, Zone::surface(side)) {
            Some(rect) => {
                let dx = (end.x - start.x) * rect.width / 100.0;
                let dy = (end.y - start.y) * rect.height / 100.0;
                (dx.hypot(dy), self.config.min_arrow_fraction * rect.diagonal())
            }
            None => (start.distance(end), self.config.min_arrow_fraction * 100.0_f64.hypot(100.0)),
        };
        if length <= threshold {
            debug!(length, threshold, "arrow too short; discarded");
            return Vec::new();
        }

        let id = self.arrows.add(start, end, self.config.arrow_color.clone());
        let Some(arrow) = self.arrows.get(&id).cloned() else {
            return Vec::new();
        };
        debug!(%id, "arrow added");
        vec![Action::ArrowAdded { arrow }]
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        self.ui.over_surface = false;
        vec![
            Action::ReleasePointer,
            Action::SetCursor { cursor: self.ui.mode.idle_cursor().to_string() },
            Action::RenderNeeded,
        ]
    }

    fn tolerance(&self, surface: &Rect) -> Tolerance {
        if self.config.tolerance_from_marker {
            hit_tolerance(self.config.compact, surface)
        } else {
            self.config.hit_tolerance
        }
    }

    fn surface_point(&self, side: Side, client: Point, zones: &impl ZoneMeasure) -> Option<Point> {
        live_rect(zones, Zone::surface(side)).and_then(|r| try_to_percentage(client, &r))
    }

    // --- Queries ---

    /// The currently selected token, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TokenId> {
        self.ui.selected
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.ui.mode
    }

    /// Where a token should be drawn right now: the live drag position while
    /// it is being moved, otherwise its stored position.
    #[must_use]
    pub fn display_position(&self, id: TokenId) -> Option<Point> {
        if let Manipulation::MovingToken { token, live: Some(live), .. } = self.manipulation {
            if token == id {
                return Some(live);
            }
        }
        self.roster.get(id).and_then(|t| t.position)
    }

    /// The in-progress arrow as `(start, end)`, for preview rendering.
    #[must_use]
    pub fn arrow_preview(&self) -> Option<(Point, Point)> {
        match self.manipulation {
            Manipulation::DrawingArrow { start, end, .. } => Some((start, end)),
            _ => None,
        }
    }

    /// Marker layouts for one side's surface, with the live drag applied.
    #[must_use]
    pub fn markers(&self, side: Side) -> Vec<MarkerLayout> {
        self.roster
            .tokens(Zone::surface(side))
            .iter()
            .filter_map(|token| {
                let mut layout = marker_layout(token, self.config.compact)?;
                if let Some(pos) = self.display_position(token.id) {
                    layout.left_pct = pos.x;
                    layout.top_pct = pos.y;
                }
                Some(layout)
            })
            .collect()
    }
}

/// Measure a zone, discarding rectangles that cannot be mapped against.
fn live_rect(zones: &impl ZoneMeasure, zone: Zone) -> Option<Rect> {
    zones.measure(zone).filter(|r| !r.is_degenerate())
}
