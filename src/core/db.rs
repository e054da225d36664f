use crate::core::error::RegistrarError;
use crate::core::schemas;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

pub fn db_connect(db_path: &str) -> Result<Connection, RegistrarError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(RegistrarError::Sqlite)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(RegistrarError::Sqlite)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(RegistrarError::Sqlite)?;
    Ok(conn)
}

pub fn registry_db_path(root: &Path) -> PathBuf {
    root.join(schemas::REGISTRY_DB_NAME)
}

pub fn initialize_registry_db(root: &Path) -> Result<(), RegistrarError> {
    let db_path = registry_db_path(root);
    let parent_dir = db_path
        .parent()
        .ok_or_else(|| RegistrarError::Validation("registry path has no parent".to_string()))?;
    fs::create_dir_all(parent_dir).map_err(RegistrarError::Io)?;

    let conn = db_connect(&db_path.to_string_lossy())?;
    conn.execute(schemas::REGISTRY_SCHEMA_CREDENTIALS, [])?;
    conn.execute(schemas::REGISTRY_SCHEMA_ADDRESSES, [])?;
    conn.execute(schemas::REGISTRY_SCHEMA_ENTITIES, [])?;
    conn.execute(schemas::REGISTRY_SCHEMA_INDEX_KIND, [])?;
    Ok(())
}

pub fn open_registry_db(root: &Path) -> Result<Connection, RegistrarError> {
    let db_path = registry_db_path(root);
    if !db_path.exists() {
        return Err(RegistrarError::NotFound(format!(
            "registry database not found at {}. Run `registrar init` first.",
            db_path.display()
        )));
    }
    db_connect(&db_path.to_string_lossy())
}
