//! Join building blocks
//!
//! - key: composite key normalization
//! - projector: row -> record projection
//! - grouping: ordered key -> records map
//! - hash_join: the two-input evaluator behind every join kind
//! - matrix: flattening and positional materialization

pub mod grouping;
pub mod hash_join;
pub mod key;
pub mod matrix;
pub mod projector;

pub use grouping::Grouping;
pub use hash_join::{AbsorbStats, HashJoinEvaluator, JoinInput, JoinKind};
pub use key::{build_key, is_blank_key, normalize_key_value, KeyCodec, KEY_SEPARATOR};
pub use matrix::{build_matrix, flatten};
pub use projector::{project, RowProjector};
