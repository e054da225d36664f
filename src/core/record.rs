//! Record model and persistence: joined reads over the three tables and the
//! interactive insertion flow that creates entity, credential, and address
//! together in one transaction.

use crate::core::acquire;
use crate::core::console::Console;
use crate::core::error::RegistrarError;
use crate::core::geocode::PostalLookup;
use chrono::Local;
use clap::ValueEnum;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use std::collections::BTreeMap;

pub static CATEGORY_LABELS: &[&str] = &[
    "Technology",
    "Education",
    "Health",
    "Finance",
    "Retail",
    "Services",
];

pub fn category_options() -> BTreeMap<i64, String> {
    CATEGORY_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| ((i + 1) as i64, label.to_string()))
        .collect()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Organization,
    Person,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Organization => "organization",
            EntityKind::Person => "person",
        }
    }

    /// Digit count of the national registration number for this kind.
    pub fn registration_len(self) -> usize {
        match self {
            EntityKind::Organization => 14,
            EntityKind::Person => 11,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CredentialRecord {
    pub id: i64,
    pub login: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub active: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddressRecord {
    pub id: i64,
    pub postal_code: String,
    pub country: String,
    pub region: String,
    pub locality: String,
    pub district: String,
    pub street: String,
    pub number: i64,
    pub complement: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityRecord {
    pub id: i64,
    pub kind: String,
    pub name: String,
    pub registration: String,
    pub email: String,
    pub phone: String,
    pub categories: String,
    pub birth_date: Option<String>,
    pub status: String,
    pub registered_at: String,
    pub credential: CredentialRecord,
    pub address: Option<AddressRecord>,
}

/// Foreign keys of one entity row, resolved before any coordinator opens a
/// transaction.
#[derive(Debug, Clone, Copy)]
pub struct EntityRefs {
    pub entity_id: i64,
    pub credential_id: i64,
    pub address_id: Option<i64>,
}

const RECORD_SELECT: &str = "
    SELECT e.id, e.kind, e.name, e.registration, e.email, e.phone,
           e.categories, e.birth_date, e.status, e.registered_at,
           c.id, c.login, c.password, c.active,
           a.id, a.postal_code, a.country, a.region, a.locality,
           a.district, a.street, a.number, a.complement
    FROM entities e
    JOIN credentials c ON c.id = e.credential_id
    LEFT JOIN addresses a ON a.id = e.address_id
";

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<EntityRecord> {
    let address = match row.get::<_, Option<i64>>(14)? {
        Some(id) => Some(AddressRecord {
            id,
            postal_code: row.get(15)?,
            country: row.get(16)?,
            region: row.get(17)?,
            locality: row.get(18)?,
            district: row.get(19)?,
            street: row.get(20)?,
            number: row.get(21)?,
            complement: row.get(22)?,
        }),
        None => None,
    };
    Ok(EntityRecord {
        id: row.get(0)?,
        kind: row.get(1)?,
        name: row.get(2)?,
        registration: row.get(3)?,
        email: row.get(4)?,
        phone: row.get(5)?,
        categories: row.get(6)?,
        birth_date: row.get(7)?,
        status: row.get(8)?,
        registered_at: row.get(9)?,
        credential: CredentialRecord {
            id: row.get(10)?,
            login: row.get(11)?,
            password: row.get(12)?,
            active: row.get(13)?,
        },
        address,
    })
}

pub fn entity_refs(conn: &Connection, entity_id: i64) -> Result<EntityRefs, RegistrarError> {
    conn.query_row(
        "SELECT credential_id, address_id FROM entities WHERE id = ?1",
        params![entity_id],
        |row| {
            Ok(EntityRefs {
                entity_id,
                credential_id: row.get(0)?,
                address_id: row.get(1)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| RegistrarError::NotFound(format!("no record with id {}", entity_id)))
}

pub fn load_record(conn: &Connection, entity_id: i64) -> Result<EntityRecord, RegistrarError> {
    let sql = format!("{} WHERE e.id = ?1", RECORD_SELECT);
    conn.query_row(&sql, params![entity_id], row_to_record)
        .optional()?
        .ok_or_else(|| RegistrarError::NotFound(format!("no record with id {}", entity_id)))
}

pub fn list_records(
    conn: &Connection,
    kind: Option<EntityKind>,
) -> Result<Vec<EntityRecord>, RegistrarError> {
    let records = match kind {
        Some(kind) => {
            let sql = format!("{} WHERE e.kind = ?1 ORDER BY e.id", RECORD_SELECT);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![kind.as_str()], row_to_record)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
        None => {
            let sql = format!("{} ORDER BY e.id", RECORD_SELECT);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], row_to_record)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
    };
    Ok(records)
}

/// Interactive insertion flow: acquires every field of a new record, then
/// writes address, credential, and entity in one transaction. Nothing is
/// persisted until every field has passed its validator.
pub fn add_record(
    conn: &mut Connection,
    console: &mut dyn Console,
    lookup: &dyn PostalLookup,
    kind: EntityKind,
) -> Result<EntityRecord, RegistrarError> {
    let name_prompt = match kind {
        EntityKind::Organization => "Organization name: ",
        EntityKind::Person => "Full name: ",
    };
    let name = acquire::acquire_nonempty_text(
        console,
        name_prompt,
        "Invalid input. The field cannot be empty.",
    )?;

    let registration_len = kind.registration_len();
    let registration = acquire::acquire_national_id(
        console,
        &format!("Registration number ({} digits): ", registration_len),
        &format!(
            "Invalid input. Enter a number with exactly {} digits.",
            registration_len
        ),
        registration_len,
    )?;

    let birth_date = match kind {
        EntityKind::Person => Some(
            acquire::acquire_date(
                console,
                "Birth date (dd/mm/yyyy): ",
                "Invalid date. Use the dd/mm/yyyy format.",
            )?
            .format("%d/%m/%Y")
            .to_string(),
        ),
        EntityKind::Organization => None,
    };

    let email = acquire::acquire_email(
        console,
        "E-mail: ",
        "Invalid e-mail format. Enter a valid address.",
    )?;
    let phone = acquire::acquire_nonempty_text(
        console,
        "Phone: ",
        "Invalid input. The field cannot be empty.",
    )?;

    let options = category_options();
    console.say("Categories:");
    for (key, label) in &options {
        console.say(&format!("  {} - {}", key, label));
    }
    let (categories, _) = acquire::acquire_multi_choice(
        console,
        "Categories (comma-separated numbers, or 'a' for all): ",
        "Invalid selection. Enter option numbers separated by commas, or 'a' for all.",
        &options,
    )?;

    let login = acquire::acquire_nonempty_text(
        console,
        "Login: ",
        "Invalid input. The field cannot be empty.",
    )?;
    let password = acquire::acquire_nonempty_text(
        console,
        "Password: ",
        "Invalid input. The field cannot be empty.",
    )?;

    let resolved = acquire::acquire_postal_address(
        console,
        "Postal code (e.g. 01310200): ",
        "Invalid postal code. Enter a valid 8-digit code.",
        lookup,
    )?;
    console.say(&format!(
        "Resolved: {}, {} - {}/{}",
        resolved.street, resolved.district, resolved.locality, resolved.region
    ));
    let number = acquire::acquire_integer(
        console,
        "House number: ",
        "Invalid input. Enter a whole number.",
    )?;
    let complement = acquire::acquire_optional_text(console, "Complement (Enter to skip): ")?;

    let registered_at = Local::now().format("%d/%m/%Y %H:%M").to_string();

    let tx = conn.transaction()?;
    let inserted = (|| -> Result<i64, RegistrarError> {
        let failed = |e: rusqlite::Error| RegistrarError::TransactionFailed(e.to_string());
        tx.execute(
            "INSERT INTO addresses (postal_code, country, region, locality, district, street, number, complement)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                resolved.postal_code,
                "BRA",
                resolved.region,
                resolved.locality,
                resolved.district,
                resolved.street,
                number,
                complement
            ],
        )
        .map_err(failed)?;
        let address_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO credentials (login, password, active) VALUES (?1, ?2, 'Y')",
            params![login, password],
        )
        .map_err(failed)?;
        let credential_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO entities (kind, name, registration, email, phone, categories,
                                   birth_date, status, registered_at, credential_id, address_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'A', ?8, ?9, ?10)",
            params![
                kind.as_str(),
                name,
                registration,
                email,
                phone,
                categories,
                birth_date,
                registered_at,
                credential_id,
                address_id
            ],
        )
        .map_err(failed)?;
        Ok(tx.last_insert_rowid())
    })();

    match inserted {
        Ok(entity_id) => {
            tx.commit()
                .map_err(|e| RegistrarError::TransactionFailed(e.to_string()))?;
            load_record(conn, entity_id)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}
