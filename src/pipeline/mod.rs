//! Multi-step join pipeline
//!
//! - spec: join step descriptors
//! - validation: upfront structural checks
//! - executor: step-by-step reduction over declared tables and aliases

pub mod executor;
pub mod spec;
pub mod validation;

pub use executor::{
    join_tables_full_outer, join_tables_inner, join_tables_left_outer, join_tables_right_outer,
    JoinPipeline,
};
pub use spec::{FieldPair, JoinSide, JoinSpec, PostProcessor};
pub use validation::{validate_join_spec, validate_joins, validate_tables};
