//! Cascading update coordinator.
//!
//! One call edits one registry field of one entity. The new value is
//! acquired before the transaction opens; the writes then land across the
//! entities/credentials/addresses tables together or not at all. The postal
//! composite is the widest case: five UPDATE statements against the address
//! row inside the same scope.

use crate::core::console::Console;
use crate::core::error::RegistrarError;
use crate::core::fields::{self, Access, FieldSpec, FieldValue, Table};
use crate::core::geocode::PostalLookup;
use crate::core::record::{self, EntityRecord};
use rusqlite::types::Value;
use rusqlite::{Connection, Transaction, params};

pub fn update_field(
    conn: &mut Connection,
    console: &mut dyn Console,
    lookup: &dyn PostalLookup,
    entity_id: i64,
    field_index: u32,
) -> Result<EntityRecord, RegistrarError> {
    let refs = record::entity_refs(conn, entity_id)?;
    let spec = fields::lookup(field_index)?;
    if matches!(spec.access, Access::Identifier) {
        return Err(RegistrarError::Immutable(field_index));
    }
    let target_row = match spec.table {
        Table::Entity => entity_id,
        Table::Credential => refs.credential_id,
        Table::Address => refs.address_id.ok_or_else(|| {
            RegistrarError::NotFound(format!("record {} has no address on file", entity_id))
        })?,
    };

    let value = fields::acquire_field_value(spec, console, lookup)?;

    let tx = conn.transaction()?;
    match apply_update(&tx, spec, &value, target_row) {
        Ok(()) => {
            tx.commit()
                .map_err(|e| RegistrarError::TransactionFailed(e.to_string()))?;
            record::load_record(conn, entity_id)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn column_values(spec: &FieldSpec, value: &FieldValue) -> Vec<(&'static str, Value)> {
    match value {
        FieldValue::Text(s) => vec![(spec.columns[0], Value::from(s.clone()))],
        FieldValue::Integer(n) => vec![(spec.columns[0], Value::Integer(*n))],
        FieldValue::Postal(a) => vec![
            ("postal_code", Value::from(a.postal_code.clone())),
            ("region", Value::from(a.region.clone())),
            ("locality", Value::from(a.locality.clone())),
            ("district", Value::from(a.district.clone())),
            ("street", Value::from(a.street.clone())),
        ],
    }
}

fn apply_update(
    tx: &Transaction<'_>,
    spec: &FieldSpec,
    value: &FieldValue,
    target_row: i64,
) -> Result<(), RegistrarError> {
    let table = spec.table.sql_name();
    for (column, value) in column_values(spec, value) {
        let sql = format!("UPDATE {} SET {} = ?1 WHERE id = ?2", table, column);
        let affected = tx
            .execute(&sql, params![value, target_row])
            .map_err(|e| RegistrarError::TransactionFailed(e.to_string()))?;
        if affected != 1 {
            return Err(RegistrarError::TransactionFailed(format!(
                "expected to change one {}.{} row, changed {}",
                table, column, affected
            )));
        }
    }
    Ok(())
}
