/// Multi-step join pipeline
///
/// Each step is an independent two-table reduction run in declaration
/// order. A step's output is registered under its alias (headers =
/// `fields_order`) so later steps can use it as either input; the last
/// step's output is the pipeline result.
use crate::catalog::TableCatalog;
use crate::config::JoinConfig;
use crate::error::{JoinError, Result};
use crate::join::{build_matrix, flatten, HashJoinEvaluator, JoinInput, JoinKind};
use crate::types::{Matrix, Table};
use tracing::{debug, info};

use super::spec::JoinSpec;
use super::validation::{check_side_fields, validate_joins, validate_tables};

/// Join pipeline executor
#[derive(Debug, Clone, Default)]
pub struct JoinPipeline {
    config: JoinConfig,
}

impl JoinPipeline {
    pub fn new(config: JoinConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JoinConfig {
        &self.config
    }

    /// Validate everything structural, then run every step.
    ///
    /// Fails on the first problem found; no partial result is returned.
    pub fn execute(&self, kind: JoinKind, tables: &[Table], joins: &[JoinSpec]) -> Result<Matrix> {
        self.config.validate()?;
        validate_tables(tables)?;
        validate_joins(tables.len(), joins)?;

        let mut catalog = TableCatalog::from_tables(tables)?;

        debug!(
            kind = %kind,
            tables = tables.len(),
            steps = joins.len(),
            "Starting join pipeline"
        );

        let mut output = Matrix::new();
        for (step, join) in joins.iter().enumerate() {
            let matrix = self.run_step(step, kind, &catalog, join)?;

            if step + 1 < joins.len() {
                catalog.register_alias(Table::new_unchecked(
                    join.alias.clone(),
                    join.fields_order.clone(),
                    matrix,
                ));
            } else {
                output = matrix;
            }
        }

        Ok(output)
    }

    fn run_step(
        &self,
        step: usize,
        kind: JoinKind,
        catalog: &TableCatalog<'_>,
        join: &JoinSpec,
    ) -> Result<Matrix> {
        let left = catalog.resolve(&join.left.table)?;
        let right = catalog.resolve(&join.right.table)?;
        check_side_fields(left, &join.left)?;
        check_side_fields(right, &join.right)?;

        let mut evaluator = HashJoinEvaluator::new(kind);
        let left_stats = evaluator.absorb(JoinInput::new(
            left,
            &join.left.joined_fields,
            &join.left.selected_fields,
        ))?;
        let right_stats = evaluator.absorb(JoinInput::new(
            right,
            &join.right.joined_fields,
            &join.right.selected_fields,
        ))?;

        let mut records = flatten(evaluator.finish());
        self.config.check_step_rows(&join.alias, records.len())?;

        if let Some(post_processor) = &join.post_processor {
            for record in records.iter_mut() {
                post_processor(record).map_err(|source| JoinError::PostProcessor {
                    alias: join.alias.clone(),
                    source,
                })?;
            }
        }

        let matrix = build_matrix(&records, &join.fields_order, &join.default_values)?;

        if self.config.log_step_summaries {
            info!(
                step,
                alias = %join.alias,
                kind = %kind,
                left = %left.name,
                right = %right.name,
                left_rows = left_stats.rows,
                right_rows = right_stats.rows,
                blank_keys = left_stats.blank_keys + right_stats.blank_keys,
                output_rows = matrix.len(),
                "Join step complete"
            );
        } else {
            debug!(
                step,
                alias = %join.alias,
                output_rows = matrix.len(),
                "Join step complete"
            );
        }

        Ok(matrix)
    }
}

/// INNER join across `tables` with default configuration
pub fn join_tables_inner(tables: &[Table], joins: &[JoinSpec]) -> Result<Matrix> {
    JoinPipeline::default().execute(JoinKind::Inner, tables, joins)
}

/// LEFT OUTER join across `tables` with default configuration
pub fn join_tables_left_outer(tables: &[Table], joins: &[JoinSpec]) -> Result<Matrix> {
    JoinPipeline::default().execute(JoinKind::LeftOuter, tables, joins)
}

/// RIGHT OUTER join across `tables` with default configuration
pub fn join_tables_right_outer(tables: &[Table], joins: &[JoinSpec]) -> Result<Matrix> {
    JoinPipeline::default().execute(JoinKind::RightOuter, tables, joins)
}

/// FULL OUTER join across `tables` with default configuration
pub fn join_tables_full_outer(tables: &[Table], joins: &[JoinSpec]) -> Result<Matrix> {
    JoinPipeline::default().execute(JoinKind::FullOuter, tables, joins)
}
