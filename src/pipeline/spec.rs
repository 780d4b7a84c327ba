/// Join step descriptors
use crate::error::Result;
use crate::types::{Record, Value};
use std::fmt;

use super::validation::validate_join_spec;

/// Row post-processor, run once per joined record before materialization
pub type PostProcessor = Box<dyn Fn(&mut Record) -> anyhow::Result<()>>;

/// A left/right pair of column lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPair {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl FieldPair {
    pub fn new<L: AsRef<str>, R: AsRef<str>>(left: &[L], right: &[R]) -> Self {
        Self {
            left: left.iter().map(|s| s.as_ref().to_string()).collect(),
            right: right.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

/// One input of a join step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSide {
    /// Declared table name or alias of an earlier step
    pub table: String,
    /// Key columns, in key order
    pub joined_fields: Vec<String>,
    /// Columns carried into the joined record
    pub selected_fields: Vec<String>,
}

impl JoinSide {
    pub fn new(table: impl Into<String>, joined_fields: Vec<String>, selected_fields: Vec<String>) -> Self {
        Self {
            table: table.into(),
            joined_fields,
            selected_fields,
        }
    }
}

/// One step of a join pipeline
pub struct JoinSpec {
    pub left: JoinSide,
    pub right: JoinSide,
    /// Name under which this step's output is visible to later steps
    pub alias: String,
    /// Output columns, in output order
    pub fields_order: Vec<String>,
    /// Defaults parallel to `fields_order`
    pub default_values: Vec<Value>,
    pub post_processor: Option<PostProcessor>,
}

impl JoinSpec {
    /// Build and validate a join step.
    ///
    /// `fields_order` defaults to the left selected fields followed by the
    /// right ones; `default_values` defaults to one `Null` per output column.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        left_table: impl Into<String>,
        right_table: impl Into<String>,
        join_fields: FieldPair,
        select_fields: FieldPair,
        alias: impl Into<String>,
        fields_order: Option<Vec<String>>,
        default_values: Option<Vec<Value>>,
        post_processor: Option<PostProcessor>,
    ) -> Result<Self> {
        let fields_order = fields_order.unwrap_or_else(|| {
            select_fields
                .left
                .iter()
                .chain(&select_fields.right)
                .cloned()
                .collect()
        });
        let default_values = default_values.unwrap_or_else(|| vec![Value::Null; fields_order.len()]);

        let spec = Self {
            left: JoinSide::new(left_table, join_fields.left, select_fields.left),
            right: JoinSide::new(right_table, join_fields.right, select_fields.right),
            alias: alias.into(),
            fields_order,
            default_values,
            post_processor,
        };

        validate_join_spec(&spec)?;
        Ok(spec)
    }

    /// Shorthand for the common case: default order and defaults, no
    /// post-processor.
    pub fn simple(
        left_table: impl Into<String>,
        right_table: impl Into<String>,
        join_fields: FieldPair,
        select_fields: FieldPair,
        alias: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            left_table,
            right_table,
            join_fields,
            select_fields,
            alias,
            None,
            None,
            None,
        )
    }

    /// Replace the post-processor
    pub fn with_post_processor<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Record) -> anyhow::Result<()> + 'static,
    {
        self.post_processor = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for JoinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinSpec")
            .field("left", &self.left)
            .field("right", &self.right)
            .field("alias", &self.alias)
            .field("fields_order", &self.fields_order)
            .field("default_values", &self.default_values)
            .field("post_processor", &self.post_processor.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
