//! Arrow annotations drawn on the surface.
//!
//! Arrows are immutable once created: the only edits are adding a new arrow
//! and removing one by id. They carry no link to tokens.

#[cfg(test)]
#[path = "annotation_test.rs"]
mod annotation_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coords::Point;

/// Unique identifier for an arrow.
pub type ArrowId = Uuid;

/// A directed segment in surface percentage coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub id: ArrowId,
    /// Tail of the arrow.
    pub start: Point,
    /// Head of the arrow.
    pub end: Point,
    /// CSS color string.
    pub color: String,
}

/// Ordered collection of arrows; draw order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    arrows: Vec<Arrow>,
}

impl Annotations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arrow with a fresh id and return that id.
    pub fn add(&mut self, start: Point, end: Point, color: impl Into<String>) -> ArrowId {
        let id = Uuid::new_v4();
        self.arrows.push(Arrow { id, start, end, color: color.into() });
        id
    }

    /// Remove an arrow, returning it. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &ArrowId) -> Option<Arrow> {
        let index = self.arrows.iter().position(|a| a.id == *id)?;
        Some(self.arrows.remove(index))
    }

    /// Replace all arrows with a snapshot. Later duplicates of an id are dropped.
    pub fn load(&mut self, arrows: Vec<Arrow>) {
        self.arrows.clear();
        for arrow in arrows {
            if self.get(&arrow.id).is_none() {
                self.arrows.push(arrow);
            }
        }
    }

    /// Remove every arrow, returning them in draw order.
    pub fn clear(&mut self) -> Vec<Arrow> {
        std::mem::take(&mut self.arrows)
    }

    #[must_use]
    pub fn get(&self, id: &ArrowId) -> Option<&Arrow> {
        self.arrows.iter().find(|a| a.id == *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arrow> {
        self.arrows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arrows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrows.is_empty()
    }
}
