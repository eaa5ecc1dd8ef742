//! Process-wide dialect registry.
//!
//! Providers are installed at initialization and looked up by engine name
//! once per call. Installing is an atomic replace of one slot; readers are
//! never exposed to a half-constructed provider because providers are
//! immutable before they enter the table.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::dialect::{Dialect, MySqlDialect, PostgresDialect, SqliteDialect};
use crate::error::{ForgeError, ForgeResult};

type DialectTable = HashMap<String, Arc<dyn Dialect>>;

static DIALECTS: OnceLock<RwLock<DialectTable>> = OnceLock::new();

fn table() -> &'static RwLock<DialectTable> {
    DIALECTS.get_or_init(|| RwLock::new(HashMap::new()))
}

fn read_table() -> RwLockReadGuard<'static, DialectTable> {
    match table().read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_table() -> RwLockWriteGuard<'static, DialectTable> {
    match table().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Install a provider under its own name, replacing any previous entry.
pub fn install(dialect: Arc<dyn Dialect>) {
    write_table().insert(dialect.name().to_string(), dialect);
}

/// Install the three built-in providers.
pub fn install_defaults() {
    install(Arc::new(PostgresDialect::new()));
    install(Arc::new(SqliteDialect::new()));
    install(Arc::new(MySqlDialect::new()));
}

/// Look up an installed provider by engine name.
pub fn lookup(name: &str) -> ForgeResult<Arc<dyn Dialect>> {
    read_table()
        .get(name)
        .cloned()
        .ok_or_else(|| ForgeError::UnknownDialect(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_is_typed_error() {
        let err = lookup("no-such-engine").unwrap_err();
        assert!(matches!(err, ForgeError::UnknownDialect(name) if name == "no-such-engine"));
    }

    #[test]
    fn test_install_and_lookup() {
        install_defaults();
        let dialect = lookup("sqlite").unwrap();
        assert_eq!(dialect.name(), "sqlite");

        // Replacement is atomic per slot: a second install wins.
        install(Arc::new(SqliteDialect::new()));
        assert_eq!(lookup("sqlite").unwrap().name(), "sqlite");
    }
}
