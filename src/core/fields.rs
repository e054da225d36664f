//! Static field registry: the one table mapping a stable field index to the
//! display label, owning table, target column(s), and validator used by the
//! cascading update coordinator.
//!
//! Indices are part of the operator-facing contract and never renumbered.
//! Identifier fields stay listed so catalogs can show them, but carry
//! `Access::Identifier` instead of a validator.

use crate::core::acquire;
use crate::core::console::Console;
use crate::core::error::RegistrarError;
use crate::core::geocode::{PostalLookup, ResolvedAddress};

pub const FIELD_MIN: u32 = 1;
pub const FIELD_MAX: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Entity,
    Credential,
    Address,
}

impl Table {
    pub fn sql_name(self) -> &'static str {
        match self {
            Table::Entity => "entities",
            Table::Credential => "credentials",
            Table::Address => "addresses",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    NonEmptyText,
    Email,
    Integer,
    DateTime,
    /// Two-state column toggled through a yes/no question.
    Flag {
        question: &'static str,
        yes: &'static str,
        no: &'static str,
    },
    /// One geocoder call populating every postal-derived column at once.
    PostalComposite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reserved immutable identifier; editing fails before any input is read.
    Identifier,
    Editable(ValidatorKind),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub index: u32,
    pub label: &'static str,
    pub table: Table,
    pub columns: &'static [&'static str],
    pub access: Access,
}

pub static FIELDS: [FieldSpec; 16] = [
    FieldSpec {
        index: 1,
        label: "Record id",
        table: Table::Entity,
        columns: &["id"],
        access: Access::Identifier,
    },
    FieldSpec {
        index: 2,
        label: "Name",
        table: Table::Entity,
        columns: &["name"],
        access: Access::Editable(ValidatorKind::NonEmptyText),
    },
    FieldSpec {
        index: 3,
        label: "Registration number",
        table: Table::Entity,
        columns: &["registration"],
        access: Access::Identifier,
    },
    FieldSpec {
        index: 4,
        label: "E-mail",
        table: Table::Entity,
        columns: &["email"],
        access: Access::Editable(ValidatorKind::Email),
    },
    FieldSpec {
        index: 5,
        label: "Registered at",
        table: Table::Entity,
        columns: &["registered_at"],
        access: Access::Editable(ValidatorKind::DateTime),
    },
    FieldSpec {
        index: 6,
        label: "Record status",
        table: Table::Entity,
        columns: &["status"],
        access: Access::Editable(ValidatorKind::Flag {
            question: "Is the record active? (y/n): ",
            yes: "A",
            no: "I",
        }),
    },
    FieldSpec {
        index: 7,
        label: "Login",
        table: Table::Credential,
        columns: &["login"],
        access: Access::Editable(ValidatorKind::NonEmptyText),
    },
    FieldSpec {
        index: 8,
        label: "Credential status",
        table: Table::Credential,
        columns: &["active"],
        access: Access::Editable(ValidatorKind::Flag {
            question: "Is the credential active? (y/n): ",
            yes: "Y",
            no: "N",
        }),
    },
    FieldSpec {
        index: 9,
        label: "Postal code",
        table: Table::Address,
        columns: &["postal_code", "region", "locality", "district", "street"],
        access: Access::Editable(ValidatorKind::PostalComposite),
    },
    FieldSpec {
        index: 10,
        label: "Country",
        table: Table::Address,
        columns: &["country"],
        access: Access::Editable(ValidatorKind::NonEmptyText),
    },
    FieldSpec {
        index: 11,
        label: "Region",
        table: Table::Address,
        columns: &["region"],
        access: Access::Editable(ValidatorKind::NonEmptyText),
    },
    FieldSpec {
        index: 12,
        label: "Locality",
        table: Table::Address,
        columns: &["locality"],
        access: Access::Editable(ValidatorKind::NonEmptyText),
    },
    FieldSpec {
        index: 13,
        label: "District",
        table: Table::Address,
        columns: &["district"],
        access: Access::Editable(ValidatorKind::NonEmptyText),
    },
    FieldSpec {
        index: 14,
        label: "Street",
        table: Table::Address,
        columns: &["street"],
        access: Access::Editable(ValidatorKind::NonEmptyText),
    },
    FieldSpec {
        index: 15,
        label: "House number",
        table: Table::Address,
        columns: &["number"],
        access: Access::Editable(ValidatorKind::Integer),
    },
    FieldSpec {
        index: 16,
        label: "Complement",
        table: Table::Address,
        columns: &["complement"],
        access: Access::Editable(ValidatorKind::NonEmptyText),
    },
];

pub fn lookup(index: u32) -> Result<&'static FieldSpec, RegistrarError> {
    FIELDS
        .iter()
        .find(|f| f.index == index)
        .ok_or(RegistrarError::InvalidField(index))
}

/// A value produced by a field's validator, ready to be written.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Postal(ResolvedAddress),
}

/// Run the validator mapped to `spec` and return the acquired value.
/// Blocks until the operator supplies valid input.
pub fn acquire_field_value(
    spec: &FieldSpec,
    console: &mut dyn Console,
    lookup: &dyn PostalLookup,
) -> Result<FieldValue, RegistrarError> {
    let kind = match spec.access {
        Access::Identifier => return Err(RegistrarError::Immutable(spec.index)),
        Access::Editable(kind) => kind,
    };
    let label = spec.label.to_lowercase();
    match kind {
        ValidatorKind::NonEmptyText => {
            let value = acquire::acquire_nonempty_text(
                console,
                &format!("New {}: ", label),
                "Invalid input. The field cannot be empty.",
            )?;
            Ok(FieldValue::Text(value))
        }
        ValidatorKind::Email => {
            let value = acquire::acquire_email(
                console,
                &format!("New {}: ", label),
                "Invalid e-mail format. Enter a valid address.",
            )?;
            Ok(FieldValue::Text(value))
        }
        ValidatorKind::Integer => {
            let value = acquire::acquire_integer(
                console,
                &format!("New {}: ", label),
                "Invalid input. Enter a whole number.",
            )?;
            Ok(FieldValue::Integer(value))
        }
        ValidatorKind::DateTime => {
            let value = acquire::acquire_datetime(
                console,
                &format!("New {} (dd/mm/yyyy hh:mm): ", label),
                "Invalid date. Use the dd/mm/yyyy hh:mm format, e.g. 15/11/2025 14:30.",
            )?;
            Ok(FieldValue::Text(value.format("%d/%m/%Y %H:%M").to_string()))
        }
        ValidatorKind::Flag { question, yes, no } => {
            let answer = acquire::acquire_yes_no(
                console,
                question,
                "Invalid input. Enter 'y' for yes or 'n' for no.",
            )?;
            let state = if answer { yes } else { no };
            Ok(FieldValue::Text(state.to_string()))
        }
        ValidatorKind::PostalComposite => {
            let address = acquire::acquire_postal_address(
                console,
                "New postal code (e.g. 01310200): ",
                "Invalid postal code. Enter a valid 8-digit code.",
                lookup,
            )?;
            Ok(FieldValue::Postal(address))
        }
    }
}
