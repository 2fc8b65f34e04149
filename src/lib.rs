//! First-person momentum movement controller
//!
//! Walk, slide, dash and jump with velocity carried across state changes,
//! driven by a variable-rate input tick and a fixed-rate motion tick.

pub mod config;
pub mod game;
