//! Pointer interaction engine for a lineup board.
//!
//! Two rosters of tokens sit on a pitch diagram (the surface) or on a bench.
//! Users drag tokens around the surface, between surface and bench, and onto
//! each other to swap them, and draw arrows on the surface. This crate owns
//! the gesture state machine and the geometry behind it; the host page wires
//! DOM events in and persists the resulting [`engine::Action`]s.
//!
//! Compiled natively for tests and to WebAssembly for the browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Gesture handling and the testable [`engine::EngineCore`] |
//! | [`input`] | Modes, pointer samples, and the manipulation state |
//! | [`roster`] | Tokens and the per-side surface/bench store |
//! | [`annotation`] | Arrow annotations |
//! | [`coords`] | Pixel ↔ percentage coordinate mapping |
//! | [`zones`] | Zone rectangles and drop classification |
//! | [`hit`] | Hit-testing surface tokens for swaps |
//! | [`layout`] | Marker sizing and label policy |
//! | [`config`] | Engine tuning from host JSON |
//! | [`web`] | `wasm-bindgen` host binding |
//! | [`consts`] | Shared numeric constants (thresholds, sizes, cursors) |

pub mod annotation;
pub mod config;
pub mod consts;
pub mod coords;
pub mod engine;
pub mod hit;
pub mod input;
pub mod layout;
pub mod roster;
pub mod web;
pub mod zones;
