//! Named table registry.

use hashbrown::HashMap;
use relq_core::{Error, Result};
use relq_storage::Table;

/// Maps result names to the tables registered under them.
///
/// Registering a name again replaces the earlier table.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: HashMap<String, Table>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::table_not_found(name))
    }

    /// Returns the table registered under `name` for index attachment.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::table_not_found(name))
    }

    /// Registers a table, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) -> Option<Table> {
        self.tables.insert(name.into(), table)
    }

    /// Returns true if a table is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Returns the number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no table is registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_storage::codec::parse_table;

    #[test]
    fn test_insert_and_get() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());

        catalog.insert("R", parse_table("a\n1\n").unwrap());
        assert!(catalog.contains("R"));
        assert_eq!(catalog.get("R").unwrap().len(), 1);
        assert_eq!(catalog.get("S").unwrap_err(), Error::table_not_found("S"));
    }

    #[test]
    fn test_insert_replaces() {
        let mut catalog = Catalog::new();
        catalog.insert("R", parse_table("a\n1\n").unwrap());
        let old = catalog.insert("R", parse_table("a\n1\n2\n").unwrap());

        assert_eq!(old.map(|t| t.len()), Some(1));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("R").unwrap().len(), 2);
    }

    #[test]
    fn test_get_mut_attaches_index() {
        let mut catalog = Catalog::new();
        catalog.insert("R", parse_table("a\n1\n").unwrap());
        catalog.get_mut("R").unwrap().build_hash_index("a").unwrap();
        assert!(catalog.get("R").unwrap().hash_index().is_some());
        assert!(catalog.get_mut("S").is_err());
    }
}
