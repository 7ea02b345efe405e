//! # bb_core - Baseball Game-State Reconstruction Engine
//!
//! Rebuilds an event-by-event snapshot of a baseball game's mutable state
//! (baserunners, batting order, fielders, pitchers, outs, score) from
//! free-text play descriptions, cross-checked against a structured
//! ground-truth feed keyed by at-bat.
//!
//! ## Pipeline
//! - `parser` turns one description into structured transitions
//! - `state` applies transitions under baseball-rule invariants
//! - `engine` replays events, synchronizes against ground truth at at-bat
//!   boundaries, and retroactively repairs rows the new evidence
//!   invalidates
//!
//! Each game owns its own state, roster, and row log; games can be
//! replayed in parallel with no shared mutable state.

pub mod engine;
pub mod error;
pub mod models;
pub mod parser;
pub mod state;

pub use engine::GameProcessor;
pub use error::{BbError, Result};
pub use models::{
    Base, BaseOccupancy, DecisionLog, DecisionRow, EventType, FieldPosition, GameData,
    GroundTruth, Half, PlayerId, PlayerMap, RawEvent, RosterChange, RunnerAction, COLUMNS,
};
pub use state::{GameState, RosterSnapshot, Team};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
