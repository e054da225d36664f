//! Validated field acquisition engine.
//!
//! Each `acquire_*` operation blocks on the console until it can return a
//! value satisfying its contract, re-prompting with the caller's error
//! message on every rejected line. Parsing is split out into pure `parse_*`
//! functions so rejection never recurses: the loop reports the reason and
//! resumes on the next line. Format errors never escape an acquisition call;
//! the only errors that do are console-level (`InputClosed`, I/O).

use crate::core::console::Console;
use crate::core::error::RegistrarError;
use crate::core::geocode::{PostalLookup, ResolvedAddress};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const DATE_FORMAT: &str = "%d/%m/%Y";
const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";
const EMAIL_PATTERN: &str = r"^[\w.+-]+@[\w.-]+\.\w+$";

/// A line that failed its format contract. Internal to the retry loop.
#[derive(Debug)]
struct FieldError;

fn retry_loop<T>(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
    mut parse: impl FnMut(&str) -> Result<T, FieldError>,
) -> Result<T, RegistrarError> {
    loop {
        let line = console.read_line(prompt)?;
        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(FieldError) => console.say(error_message),
        }
    }
}

fn parse_integer(line: &str) -> Result<i64, FieldError> {
    line.parse::<i64>().map_err(|_| FieldError)
}

fn parse_decimal(line: &str) -> Result<f64, FieldError> {
    line.replace(',', ".").parse::<f64>().map_err(|_| FieldError)
}

fn parse_digits(line: &str, len: usize) -> Result<String, FieldError> {
    let digits: String = line
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | '/' | ' '))
        .collect();
    if digits.len() == len && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(digits)
    } else {
        Err(FieldError)
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).unwrap())
}

pub fn acquire_integer(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
) -> Result<i64, RegistrarError> {
    retry_loop(console, prompt, error_message, parse_integer)
}

pub fn acquire_bounded_integer(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
    min: i64,
    max: i64,
) -> Result<i64, RegistrarError> {
    let ranged = format!("{} Enter a value between {} and {}.", error_message, min, max);
    retry_loop(console, prompt, &ranged, |line| {
        let value = parse_integer(line)?;
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(FieldError)
        }
    })
}

pub fn acquire_decimal(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
) -> Result<f64, RegistrarError> {
    retry_loop(console, prompt, error_message, parse_decimal)
}

pub fn acquire_nonempty_text(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
) -> Result<String, RegistrarError> {
    retry_loop(console, prompt, error_message, |line| {
        if line.is_empty() {
            Err(FieldError)
        } else {
            Ok(line.to_string())
        }
    })
}

/// Read one optional line: an empty line means "skip".
pub fn acquire_optional_text(
    console: &mut dyn Console,
    prompt: &str,
) -> Result<Option<String>, RegistrarError> {
    let line = console.read_line(prompt)?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

pub fn acquire_date(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
) -> Result<NaiveDate, RegistrarError> {
    retry_loop(console, prompt, error_message, |line| {
        NaiveDate::parse_from_str(line, DATE_FORMAT).map_err(|_| FieldError)
    })
}

pub fn acquire_datetime(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
) -> Result<NaiveDateTime, RegistrarError> {
    retry_loop(console, prompt, error_message, |line| {
        NaiveDateTime::parse_from_str(line, DATETIME_FORMAT).map_err(|_| FieldError)
    })
}

/// Case-insensitive yes/no: the first character of the line decides.
pub fn acquire_yes_no(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
) -> Result<bool, RegistrarError> {
    retry_loop(console, prompt, error_message, |line| {
        match line.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('y') => Ok(true),
            Some('n') => Ok(false),
            _ => Err(FieldError),
        }
    })
}

/// Pick one option from an integer-keyed set; returns the mapped label.
/// Delegates range checking to the bounded parser over the key span, then
/// re-prompts on keys that fall inside the span but are not present.
pub fn acquire_enumerated_choice(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
    options: &BTreeMap<i64, String>,
) -> Result<String, RegistrarError> {
    let min = *options
        .keys()
        .next()
        .ok_or_else(|| RegistrarError::Validation("empty option set".to_string()))?;
    let max = *options.keys().next_back().unwrap_or(&min);
    loop {
        let key = acquire_bounded_integer(console, prompt, error_message, min, max)?;
        match options.get(&key) {
            Some(label) => return Ok(label.clone()),
            None => console.say(error_message),
        }
    }
}

/// Pick one or more options as comma-separated keys, or `a` for all.
/// The whole line is rejected if any token is malformed or unknown.
/// Returns the joined display string and the labels in input order.
pub fn acquire_multi_choice(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
    options: &BTreeMap<i64, String>,
) -> Result<(String, Vec<String>), RegistrarError> {
    if options.is_empty() {
        return Err(RegistrarError::Validation("empty option set".to_string()));
    }
    let picked = retry_loop(console, prompt, error_message, |line| {
        if line.is_empty() {
            return Err(FieldError);
        }
        if line.eq_ignore_ascii_case("a") {
            return Ok(options.values().cloned().collect::<Vec<_>>());
        }
        let mut keys = Vec::new();
        for token in line.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            keys.push(parse_integer(token)?);
        }
        if keys.is_empty() {
            return Err(FieldError);
        }
        let mut labels = Vec::with_capacity(keys.len());
        for key in keys {
            match options.get(&key) {
                Some(label) => labels.push(label.clone()),
                None => return Err(FieldError),
            }
        }
        Ok(labels)
    })?;
    Ok((picked.join(", "), picked))
}

pub fn acquire_email(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
) -> Result<String, RegistrarError> {
    retry_loop(console, prompt, error_message, |line| {
        if email_regex().is_match(line) {
            Ok(line.to_string())
        } else {
            Err(FieldError)
        }
    })
}

/// National identifier: punctuation and spaces are stripped, the remainder
/// must be exactly `len` digits. Returns the bare digit string.
pub fn acquire_national_id(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
    len: usize,
) -> Result<String, RegistrarError> {
    retry_loop(console, prompt, error_message, |line| parse_digits(line, len))
}

/// Postal code entry plus geocoding: the 8-digit code is resolved through
/// the lookup collaborator. An unknown code and a transport failure are
/// both treated as invalid input and re-prompt.
pub fn acquire_postal_address(
    console: &mut dyn Console,
    prompt: &str,
    error_message: &str,
    lookup: &dyn PostalLookup,
) -> Result<ResolvedAddress, RegistrarError> {
    loop {
        let line = console.read_line(prompt)?;
        let code = match parse_digits(line.trim(), 8) {
            Ok(code) => code,
            Err(FieldError) => {
                console.say(error_message);
                continue;
            }
        };
        match lookup.lookup(&code) {
            Ok(address) => return Ok(address),
            Err(_) => console.say(error_message),
        }
    }
}
