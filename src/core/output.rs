//! Terminal rendering helpers for record and catalog output.
//!
//! Keeps command output bounded and readable; all persistence-facing code
//! stays free of formatting concerns.

use crate::core::fields::{Access, FIELDS};
use crate::core::record::EntityRecord;
use colored::Colorize;

const VALUE_PREVIEW_CHARS: usize = 40;
const LABEL_WIDTH: usize = 20;

/// Collapse whitespace and bound length for single-line display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Dotted display form of a national registration number:
/// 11 digits as 000.000.000-00, 14 digits as 00.000.000/0000-00.
/// Anything else is shown as entered.
pub fn format_registration(digits: &str) -> String {
    match digits.len() {
        11 => format!(
            "{}.{}.{}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..11]
        ),
        14 => format!(
            "{}.{}.{}/{}-{}",
            &digits[0..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..12],
            &digits[12..14]
        ),
        _ => digits.to_string(),
    }
}

fn field_row(label: &str, value: &str) {
    let padded = format!("{:<width$}", label, width = LABEL_WIDTH);
    println!(
        "  {} {}",
        padded.bright_white(),
        compact_line(value, VALUE_PREVIEW_CHARS)
    );
}

/// Vertical field/value table for one record.
pub fn render_record(record: &EntityRecord) {
    println!();
    field_row("Record id", &record.id.to_string());
    field_row("Kind", &record.kind);
    field_row("Name", &record.name);
    field_row("Registration number", &format_registration(&record.registration));
    field_row("E-mail", &record.email);
    field_row("Phone", &record.phone);
    field_row("Categories", &record.categories);
    if let Some(birth_date) = &record.birth_date {
        field_row("Birth date", birth_date);
    }
    field_row("Record status", &record.status);
    field_row("Registered at", &record.registered_at);
    field_row("Login", &record.credential.login);
    field_row("Credential status", &record.credential.active);
    match &record.address {
        Some(address) => {
            field_row("Postal code", &address.postal_code);
            field_row("Country", &address.country);
            field_row("Region", &address.region);
            field_row("Locality", &address.locality);
            field_row("District", &address.district);
            field_row("Street", &address.street);
            field_row("House number", &address.number.to_string());
            if let Some(complement) = &address.complement {
                field_row("Complement", complement);
            }
        }
        None => field_row("Address", "(none on file)"),
    }
    println!();
}

/// One line per record: id, kind, name, registration, status.
pub fn render_record_list(records: &[EntityRecord]) {
    if records.is_empty() {
        println!("No records found.");
        return;
    }
    let header = format!(
        "{:<6} {:<14} {:<30} {:<22} {}",
        "ID", "KIND", "NAME", "REGISTRATION", "STATUS"
    );
    println!("{}", header.bright_white().bold());
    for record in records {
        println!(
            "{:<6} {:<14} {:<30} {:<22} {}",
            record.id,
            record.kind,
            compact_line(&record.name, 28),
            format_registration(&record.registration),
            record.status
        );
    }
}

/// Field catalog: every registry index with its label and editability.
pub fn render_field_catalog() {
    println!("{}", "Available fields:".bright_white().bold());
    for spec in &FIELDS {
        match spec.access {
            Access::Identifier => println!(
                "  {:>2} - {} {}",
                spec.index,
                spec.label,
                "(identifier - not editable)".bright_black()
            ),
            Access::Editable(_) => println!("  {:>2} - {}", spec.index, spec.label),
        }
    }
}
