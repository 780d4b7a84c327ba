/// Table catalog for one pipeline run
///
/// Holds the declared input tables (borrowed, never mutated) and the alias
/// tables materialized by completed join steps.
use crate::error::{JoinError, Result};
use crate::types::Table;
use ahash::AHashMap;
use tracing::{debug, warn};

/// Name -> table lookup over declared tables and step aliases
#[derive(Debug, Default)]
pub struct TableCatalog<'a> {
    /// Declared tables in declaration order
    declared: Vec<&'a Table>,
    /// Declared table name -> position
    declared_index: AHashMap<String, usize>,
    /// Materialized step outputs in registration order
    aliases: Vec<Table>,
    /// Alias -> position (first registration wins)
    alias_index: AHashMap<String, usize>,
}

impl<'a> TableCatalog<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from the declared tables
    pub fn from_tables(tables: &'a [Table]) -> Result<Self> {
        let mut catalog = Self::new();
        for table in tables {
            catalog.declare(table)?;
        }
        Ok(catalog)
    }

    /// Declare an input table
    pub fn declare(&mut self, table: &'a Table) -> Result<()> {
        if self.declared_index.contains_key(&table.name) {
            return Err(JoinError::invalid(format!(
                "Table '{}' is declared more than once",
                table.name
            )));
        }

        self.declared_index
            .insert(table.name.clone(), self.declared.len());
        self.declared.push(table);
        Ok(())
    }

    /// Register a completed step's output under its alias
    pub fn register_alias(&mut self, table: Table) {
        let name = table.name.clone();

        if self.declared_index.contains_key(&name) {
            warn!(alias = %name, "Alias is shadowed by a declared table of the same name");
        } else if self.alias_index.contains_key(&name) {
            warn!(alias = %name, "Alias is shadowed by an earlier alias of the same name");
        } else {
            self.alias_index.insert(name.clone(), self.aliases.len());
        }

        debug!(
            alias = %name,
            rows = table.row_count(),
            columns = table.column_count(),
            "Registered alias table"
        );
        self.aliases.push(table);
    }

    /// Look up a name, declared tables first, then aliases
    fn lookup(&self, name: &str) -> Option<&Table> {
        if let Some(&idx) = self.declared_index.get(name) {
            return Some(self.declared[idx]);
        }
        self.alias_index.get(name).map(|&idx| &self.aliases[idx])
    }

    /// Resolve a table reference of a join step
    pub fn resolve(&self, name: &str) -> Result<&Table> {
        self.lookup(name).ok_or_else(|| {
            JoinError::invalid(format!(
                "The table '{}' does not correspond to a table name nor to the alias of a previous join",
                name
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, headers: &[&str]) -> Table {
        Table::from_parts(name, headers, vec![]).unwrap()
    }

    #[test]
    fn test_resolve_declared() {
        let tables = vec![table("users", &["id"]), table("orders", &["user_id"])];
        let catalog = TableCatalog::from_tables(&tables).unwrap();

        assert_eq!(catalog.resolve("orders").unwrap().headers, vec!["user_id"]);
        assert_eq!(catalog.resolve("users").unwrap().headers, vec!["id"]);
    }

    #[test]
    fn test_duplicate_declared_rejected() {
        let tables = vec![table("users", &["id"]), table("users", &["x"])];
        let err = TableCatalog::from_tables(&tables).unwrap_err();
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn test_unknown_reference() {
        let catalog = TableCatalog::new();
        let err = catalog.resolve("ghost").unwrap_err();
        assert!(err
            .to_string()
            .contains("does not correspond to a table name nor to the alias of a previous join"));
    }

    #[test]
    fn test_alias_registration_and_lookup() {
        let tables = vec![table("users", &["id"])];
        let mut catalog = TableCatalog::from_tables(&tables).unwrap();
        assert!(catalog.resolve("step1").is_err());

        catalog.register_alias(table("step1", &["id", "name"]));

        assert_eq!(catalog.resolve("step1").unwrap().headers, vec!["id", "name"]);
    }

    #[test]
    fn test_declared_table_wins_over_alias() {
        let tables = vec![table("users", &["id"])];
        let mut catalog = TableCatalog::from_tables(&tables).unwrap();
        catalog.register_alias(table("users", &["other"]));

        assert_eq!(catalog.resolve("users").unwrap().headers, vec!["id"]);
    }

    #[test]
    fn test_first_alias_wins() {
        let mut catalog = TableCatalog::new();
        catalog.register_alias(table("a", &["first"]));
        catalog.register_alias(table("a", &["second"]));

        assert_eq!(catalog.resolve("a").unwrap().headers, vec!["first"]);
    }
}
