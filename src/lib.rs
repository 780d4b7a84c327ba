//! tablejoin
//!
//! Relational-style joins over in-memory tables, chained across any number
//! of steps.
//!
//! ## Core features
//! - INNER / LEFT OUTER / RIGHT OUTER / FULL OUTER joins on composite keys
//! - Key normalization: trimmed upper-cased text, dates by calendar day
//! - Per-step column selection, output ordering and default values
//! - Optional per-row post-processing
//! - Step outputs registered under an alias and reusable by later steps
//!
//! ## Architecture
//! - types: Value / Record / Table
//! - join: key codec, projector, grouping, hash join evaluator, matrix builder
//! - catalog: declared tables plus step aliases
//! - pipeline: join specs, validation, step-by-step executor
//!
//! ## Example
//! ```
//! use tablejoin::{join_tables_left_outer, FieldPair, JoinSpec, Table, Value};
//!
//! # fn main() -> tablejoin::Result<()> {
//! let users = Table::from_parts(
//!     "users",
//!     &["id", "name"],
//!     vec![vec![1.into(), "Alice".into()], vec![2.into(), "Bob".into()]],
//! )?;
//! let orders = Table::from_parts(
//!     "orders",
//!     &["order_id", "user_id", "amount"],
//!     vec![vec![101.into(), 1.into(), 100.into()]],
//! )?;
//!
//! let join = JoinSpec::new(
//!     "users",
//!     "orders",
//!     FieldPair::new(&["id"], &["user_id"]),
//!     FieldPair::new(&["name"], &["amount"]),
//!     "user_orders",
//!     None,
//!     Some(vec![Value::Null, Value::Integer(0)]),
//!     None,
//! )?;
//!
//! let rows = join_tables_left_outer(&[users, orders], &[join])?;
//! assert_eq!(rows[1], vec![Value::text("Bob"), Value::Integer(0)]);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod join;
pub mod pipeline;
pub mod types;

mod error;

pub use catalog::TableCatalog;
pub use config::JoinConfig;
pub use error::{JoinError, Result};
pub use join::{HashJoinEvaluator, JoinKind};
pub use pipeline::{
    join_tables_full_outer, join_tables_inner, join_tables_left_outer, join_tables_right_outer,
    FieldPair, JoinPipeline, JoinSide, JoinSpec, PostProcessor,
};
pub use types::{Matrix, Record, Row, Table, Timestamp, Value};
