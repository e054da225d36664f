//! Centralized SQLite schema definitions for the registry database.
//!
//! One database holds the three record tables:
//! 1. entities: the organization/person rows operators address by id.
//! 2. credentials: the login owned by exactly one entity.
//! 3. addresses: the postal address referenced by at most one entity.

pub const REGISTRY_DB_NAME: &str = "registry.db";

pub const REGISTRY_SCHEMA_CREDENTIALS: &str = "
    CREATE TABLE IF NOT EXISTS credentials (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        login TEXT NOT NULL,
        password TEXT NOT NULL,
        active TEXT NOT NULL DEFAULT 'Y'
    )
";

pub const REGISTRY_SCHEMA_ADDRESSES: &str = "
    CREATE TABLE IF NOT EXISTS addresses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        postal_code TEXT NOT NULL,
        country TEXT NOT NULL,
        region TEXT NOT NULL,
        locality TEXT NOT NULL,
        district TEXT NOT NULL,
        street TEXT NOT NULL,
        number INTEGER NOT NULL,
        complement TEXT
    )
";

pub const REGISTRY_SCHEMA_ENTITIES: &str = "
    CREATE TABLE IF NOT EXISTS entities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        kind TEXT NOT NULL,
        name TEXT NOT NULL,
        registration TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL,
        phone TEXT NOT NULL,
        categories TEXT NOT NULL,
        birth_date TEXT,
        status TEXT NOT NULL DEFAULT 'A',
        registered_at TEXT NOT NULL,
        credential_id INTEGER NOT NULL,
        address_id INTEGER,
        FOREIGN KEY(credential_id) REFERENCES credentials(id),
        FOREIGN KEY(address_id) REFERENCES addresses(id)
    )
";

pub const REGISTRY_SCHEMA_INDEX_KIND: &str =
    "CREATE INDEX IF NOT EXISTS idx_entities_kind ON entities(kind)";
