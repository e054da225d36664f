//! Cascading delete coordinator.
//!
//! Removes an entity together with its credential and address, or leaves
//! everything exactly as it was. The entity delete must match exactly one
//! row; dependents already absent are tolerated so a previously interrupted
//! cleanup can be finished.

use crate::core::error::RegistrarError;
use crate::core::record;
use rusqlite::{Connection, params};

pub fn delete_record(conn: &mut Connection, entity_id: i64) -> Result<(), RegistrarError> {
    let refs = record::entity_refs(conn, entity_id)?;

    let tx = conn.transaction()?;
    let outcome = (|| -> Result<(), RegistrarError> {
        let failed = |e: rusqlite::Error| RegistrarError::TransactionFailed(e.to_string());

        let affected = tx
            .execute("DELETE FROM entities WHERE id = ?1", params![entity_id])
            .map_err(failed)?;
        if affected != 1 {
            return Err(RegistrarError::PartialFailure(format!(
                "expected to remove one record, removed {}",
                affected
            )));
        }

        tx.execute(
            "DELETE FROM credentials WHERE id = ?1",
            params![refs.credential_id],
        )
        .map_err(failed)?;

        if let Some(address_id) = refs.address_id {
            tx.execute("DELETE FROM addresses WHERE id = ?1", params![address_id])
                .map_err(failed)?;
        }
        Ok(())
    })();

    match outcome {
        Ok(()) => tx
            .commit()
            .map_err(|e| RegistrarError::TransactionFailed(e.to_string())),
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}
