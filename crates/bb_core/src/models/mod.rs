//! Data model shared by the parser, state machine, and reconciliation engine.

pub mod actions;
pub mod decision;
pub mod events;
pub mod field;
pub mod game_data;
pub mod ground_truth;
pub mod player;

pub use actions::{CaughtStealingPlay, RosterChange, RunnerAction};
pub use decision::{DecisionLog, DecisionRow, COLUMNS};
pub use events::{EventType, RawEvent};
pub use field::{Base, FieldPosition, Half, TargetBase};
pub use game_data::{GameData, InningSummary, RawId};
pub use ground_truth::{BaseOccupancy, GroundTruth};
pub use player::{PlayerId, PlayerMap};
