//! Durbar - rules engine for the struggle over eighteenth-century India
//!
//! Eight regions pass between native empires and the Company as crises
//! resolve. This crate is the rules core only: classification, strength
//! arithmetic, outcome cascades, elephant movement, and the event deck.
//! Rendering, scenario selection, and dice belong to the caller.

pub mod board;
pub mod core;
pub mod crisis;
pub mod deck;
pub mod scenario;
pub mod session;
