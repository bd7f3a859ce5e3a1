//! Roster model: tokens, the zones that hold them, and the in-memory store.
//!
//! Each side (home/away) owns two ordered token lists: the tokens placed on
//! the pitch surface and the tokens waiting on the bench. `Roster` keeps the
//! invariant that a token id lives in exactly one list across both sides.
//! The engine mutates positions and zones only when a gesture commits; the
//! external roster editor adds, edits, and removes tokens through the
//! `insert` / `update_details` / `remove` inputs.

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::coords::Point;
use crate::zones::{Side, Zone, ZoneKind};

/// Stable identifier for a token.
pub type TokenId = u32;

/// A positionable roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Unique identifier across both sides.
    pub id: TokenId,
    /// Shirt number shown inside the marker.
    pub number: u32,
    /// Full display name.
    pub name: String,
    /// Percentage position on the surface; `None` while benched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// Free-text note attached by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// True for tokens the user created, false for preset roster entries.
    #[serde(default)]
    pub custom: bool,
    /// Short label overriding the derived one under the marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Token {
    #[must_use]
    pub fn new(id: TokenId, number: u32, name: impl Into<String>) -> Self {
        Self { id, number, name: name.into(), position: None, note: None, custom: false, label: None }
    }

    /// Builder-style helper placing the token at a percentage position.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }
}

/// Editable, non-spatial token attributes. Only present fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` clears the note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Option<String>>,
    /// `Some(None)` clears the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Option<String>>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("duplicate token id: {0}")]
    DuplicateToken(TokenId),
    #[error("token not found: {0}")]
    TokenNotFound(TokenId),
    #[error("token {0} is not in the expected zone")]
    WrongZone(TokenId),
    #[error("token {0} has a non-finite position")]
    InvalidPosition(TokenId),
}

/// Normalize a stored surface position: missing means center, finite values
/// are clamped to `[0, 100]`, NaN or infinite coordinates are rejected.
fn surface_position(id: TokenId, position: Option<Point>) -> Result<Point, RosterError> {
    let Some(p) = position else {
        return Ok(Point::new(50.0, 50.0));
    };
    if !(p.x.is_finite() && p.y.is_finite()) {
        return Err(RosterError::InvalidPosition(id));
    }
    Ok(Point::new(p.x.clamp(0.0, 100.0), p.y.clamp(0.0, 100.0)))
}

#[derive(Debug, Clone, Default)]
struct SideTokens {
    surface: Vec<Token>,
    bench: Vec<Token>,
}

impl SideTokens {
    fn list(&self, kind: ZoneKind) -> &Vec<Token> {
        match kind {
            ZoneKind::Surface => &self.surface,
            ZoneKind::Bench => &self.bench,
        }
    }

    fn list_mut(&mut self, kind: ZoneKind) -> &mut Vec<Token> {
        match kind {
            ZoneKind::Surface => &mut self.surface,
            ZoneKind::Bench => &mut self.bench,
        }
    }
}

/// In-memory store of both sides' tokens.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    home: SideTokens,
    away: SideTokens,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn side(&self, side: Side) -> &SideTokens {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideTokens {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// Replace one side's tokens with a snapshot.
    ///
    /// Surface tokens without a position are placed at the center and
    /// out-of-range coordinates are clamped to `[0, 100]`; bench tokens lose
    /// any position they carry. Fails without modifying the roster if an id
    /// repeats within the snapshot or exists on the other side, or if a
    /// surface position is not finite.
    pub fn load(&mut self, side: Side, surface: Vec<Token>, bench: Vec<Token>) -> Result<(), RosterError> {
        let mut seen: HashSet<TokenId> = self
            .side(side.opposite())
            .surface
            .iter()
            .chain(&self.side(side.opposite()).bench)
            .map(|t| t.id)
            .collect();
        for token in surface.iter().chain(&bench) {
            if !seen.insert(token.id) {
                return Err(RosterError::DuplicateToken(token.id));
            }
        }

        let surface = surface
            .into_iter()
            .map(|mut t| {
                t.position = Some(surface_position(t.id, t.position)?);
                Ok(t)
            })
            .collect::<Result<Vec<_>, RosterError>>()?;
        let bench = bench
            .into_iter()
            .map(|mut t| {
                t.position = None;
                t
            })
            .collect();
        *self.side_mut(side) = SideTokens { surface, bench };
        Ok(())
    }

    /// Which zone currently holds `id`.
    #[must_use]
    pub fn locate(&self, id: TokenId) -> Option<Zone> {
        for side in [Side::Home, Side::Away] {
            for kind in [ZoneKind::Surface, ZoneKind::Bench] {
                if self.side(side).list(kind).iter().any(|t| t.id == id) {
                    return Some(Zone { side, kind });
                }
            }
        }
        None
    }

    /// Return a reference to a token by id.
    #[must_use]
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        let zone = self.locate(id)?;
        self.tokens(zone).iter().find(|t| t.id == id)
    }

    /// Tokens held by `zone`, in order.
    #[must_use]
    pub fn tokens(&self, zone: Zone) -> &[Token] {
        self.side(zone.side).list(zone.kind)
    }

    fn find_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        let zone = self.locate(id)?;
        self.side_mut(zone.side)
            .list_mut(zone.kind)
            .iter_mut()
            .find(|t| t.id == id)
    }

    /// Move a surface token to `position`. Returns false if `id` is not on a surface.
    pub fn set_position(&mut self, id: TokenId, position: Point) -> bool {
        match self.locate(id) {
            Some(Zone { kind: ZoneKind::Surface, .. }) => {}
            _ => return false,
        }
        let Some(token) = self.find_mut(id) else {
            return false;
        };
        token.position = Some(position);
        true
    }

    /// Move `id` into the other zone of its own side.
    ///
    /// Entering the surface assigns `position` (center if `None`); entering the
    /// bench drops the position and appends to the end of the bench.
    pub fn transfer(&mut self, id: TokenId, to: ZoneKind, position: Option<Point>) -> Result<(), RosterError> {
        let from = self.locate(id).ok_or(RosterError::TokenNotFound(id))?;
        if from.kind == to {
            return Ok(());
        }
        let list = self.side_mut(from.side).list_mut(from.kind);
        let Some(index) = list.iter().position(|t| t.id == id) else {
            return Err(RosterError::TokenNotFound(id));
        };
        let mut token = list.remove(index);
        token.position = match to {
            ZoneKind::Surface => Some(position.unwrap_or(Point::new(50.0, 50.0))),
            ZoneKind::Bench => None,
        };
        self.side_mut(from.side).list_mut(to).push(token);
        Ok(())
    }

    /// Exchange a benched token with a surface token.
    ///
    /// The benched token takes the surface token's slot and position; the
    /// surface token takes the benched token's slot on the bench.
    pub fn swap(&mut self, bench_id: TokenId, surface_id: TokenId) -> Result<(), RosterError> {
        let bench_zone = self.locate(bench_id).ok_or(RosterError::TokenNotFound(bench_id))?;
        let surface_zone = self.locate(surface_id).ok_or(RosterError::TokenNotFound(surface_id))?;
        if bench_zone.kind != ZoneKind::Bench {
            return Err(RosterError::WrongZone(bench_id));
        }
        if surface_zone.kind != ZoneKind::Surface {
            return Err(RosterError::WrongZone(surface_id));
        }

        let bench_index = self
            .tokens(bench_zone)
            .iter()
            .position(|t| t.id == bench_id)
            .ok_or(RosterError::TokenNotFound(bench_id))?;
        let surface_index = self
            .tokens(surface_zone)
            .iter()
            .position(|t| t.id == surface_id)
            .ok_or(RosterError::TokenNotFound(surface_id))?;

        let mut incoming = self.side_mut(bench_zone.side).bench.remove(bench_index);
        let mut outgoing = self.side_mut(surface_zone.side).surface.remove(surface_index);
        incoming.position = outgoing.position.take();
        self.side_mut(surface_zone.side).surface.insert(surface_index, incoming);
        self.side_mut(bench_zone.side).bench.insert(bench_index, outgoing);
        Ok(())
    }

    /// Add a new token to `zone`. Fails if the id is already in use or the
    /// surface position is not finite.
    pub fn insert(&mut self, zone: Zone, mut token: Token) -> Result<(), RosterError> {
        if self.locate(token.id).is_some() {
            return Err(RosterError::DuplicateToken(token.id));
        }
        token.position = match zone.kind {
            ZoneKind::Surface => Some(surface_position(token.id, token.position)?),
            ZoneKind::Bench => None,
        };
        self.side_mut(zone.side).list_mut(zone.kind).push(token);
        Ok(())
    }

    /// Apply edited attributes to a token. Zone and position are untouched.
    pub fn update_details(&mut self, id: TokenId, details: &TokenDetails) -> Result<(), RosterError> {
        let token = self.find_mut(id).ok_or(RosterError::TokenNotFound(id))?;
        if let Some(number) = details.number {
            token.number = number;
        }
        if let Some(ref name) = details.name {
            token.name.clone_from(name);
        }
        if let Some(ref note) = details.note {
            token.note.clone_from(note);
        }
        if let Some(ref label) = details.label {
            token.label.clone_from(label);
        }
        Ok(())
    }

    /// Remove a token from whichever zone holds it.
    pub fn remove(&mut self, id: TokenId) -> Option<Token> {
        let zone = self.locate(id)?;
        let list = self.side_mut(zone.side).list_mut(zone.kind);
        let index = list.iter().position(|t| t.id == id)?;
        Some(list.remove(index))
    }

    /// Verify that every id appears in exactly one zone.
    pub fn check_integrity(&self) -> Result<(), RosterError> {
        let mut seen = HashSet::new();
        for side in [Side::Home, Side::Away] {
            for kind in [ZoneKind::Surface, ZoneKind::Bench] {
                for token in self.side(side).list(kind) {
                    if !seen.insert(token.id) {
                        return Err(RosterError::DuplicateToken(token.id));
                    }
                }
            }
        }
        Ok(())
    }

    /// Total number of tokens across all zones.
    #[must_use]
    pub fn len(&self) -> usize {
        [&self.home, &self.away]
            .iter()
            .map(|s| s.surface.len() + s.bench.len())
            .sum()
    }

    /// Returns `true` if no side holds any token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
