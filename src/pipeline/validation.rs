/// Structural validation of pipeline inputs
///
/// Everything here runs before the first join executes. Field existence is
/// checked per step by [`check_side_fields`], once the referenced table
/// (possibly an alias) has been materialized.
use crate::error::{JoinError, Result};
use crate::types::{is_valid_name, Table};
use ahash::AHashSet;
use tracing::warn;

use super::spec::{JoinSide, JoinSpec};

/// At least two tables, each well formed
pub fn validate_tables(tables: &[Table]) -> Result<()> {
    if tables.len() < 2 {
        return Err(JoinError::invalid(format!(
            "The number of tables is incorrect. There must be two or more, got {}",
            tables.len()
        )));
    }

    for (i, table) in tables.iter().enumerate() {
        table
            .validate()
            .map_err(|e| JoinError::invalid(format!("Table {}: {}", i, e.message())))?;
    }

    Ok(())
}

/// Join count against table count, then each join's shape
pub fn validate_joins(table_count: usize, joins: &[JoinSpec]) -> Result<()> {
    if joins.len() + 1 != table_count {
        return Err(JoinError::invalid(format!(
            "The number of joins must equal the number of tables minus one (tables: {}, joins: {})",
            table_count,
            joins.len()
        )));
    }

    for (i, join) in joins.iter().enumerate() {
        validate_join_spec(join)
            .map_err(|e| JoinError::invalid(format!("Join {}: {}", i, e.message())))?;
    }

    Ok(())
}

/// Shape of a single join step
pub fn validate_join_spec(spec: &JoinSpec) -> Result<()> {
    check_name("left.table", &spec.left.table)?;
    check_name("right.table", &spec.right.table)?;
    check_name("alias", &spec.alias)?;

    check_field_list("left", "joinFields", &spec.left.joined_fields, true)?;
    check_field_list("right", "joinFields", &spec.right.joined_fields, true)?;
    check_field_list("left", "selectFields", &spec.left.selected_fields, false)?;
    check_field_list("right", "selectFields", &spec.right.selected_fields, false)?;

    let left_selected: AHashSet<&str> = spec.left.selected_fields.iter().map(String::as_str).collect();
    if spec
        .right
        .selected_fields
        .iter()
        .any(|f| left_selected.contains(f.as_str()))
    {
        return Err(JoinError::invalid(
            "The 'left' and 'right' properties of the 'selectFields' parameter have names in common",
        ));
    }

    for (i, field) in spec.fields_order.iter().enumerate() {
        if !is_valid_name(field) {
            return Err(JoinError::invalid(format!(
                "Element {} of the 'fieldsOrder' parameter is not a valid name",
                i
            )));
        }
    }

    if spec.fields_order.len() != spec.default_values.len() {
        return Err(JoinError::invalid(format!(
            "The 'fieldsOrder' ({}) and 'defaultValues' ({}) parameters do not have the same number of elements",
            spec.fields_order.len(),
            spec.default_values.len()
        )));
    }

    if spec.left.joined_fields.len() != spec.right.joined_fields.len() {
        warn!(
            alias = %spec.alias,
            left = spec.left.joined_fields.len(),
            right = spec.right.joined_fields.len(),
            "Joined field counts differ; this join can never match"
        );
    }

    Ok(())
}

/// Every joined and selected field of `side` exists in `table`
pub fn check_side_fields(table: &Table, side: &JoinSide) -> Result<()> {
    for field in side.joined_fields.iter().chain(&side.selected_fields) {
        if !table.has_column(field) {
            return Err(JoinError::invalid(format!(
                "Field {} was not found in table '{}'",
                field, table.name
            )));
        }
    }
    Ok(())
}

fn check_name(param: &str, value: &str) -> Result<()> {
    if is_valid_name(value) {
        Ok(())
    } else {
        Err(JoinError::invalid(format!(
            "The '{}' parameter is not a valid name",
            param
        )))
    }
}

fn check_field_list(side: &str, param: &str, fields: &[String], required: bool) -> Result<()> {
    if required && fields.is_empty() {
        return Err(JoinError::invalid(format!(
            "Property '{}' of the '{}' parameter must include at least one field name",
            side, param
        )));
    }

    let mut seen = AHashSet::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        if !is_valid_name(field) {
            return Err(JoinError::invalid(format!(
                "Element {} of property '{}' of the '{}' parameter is not a valid name",
                i, side, param
            )));
        }
        if !seen.insert(field.as_str()) {
            return Err(JoinError::invalid(format!(
                "Property '{}' of the '{}' parameter contains repeated names",
                side, param
            )));
        }
    }

    Ok(())
}
