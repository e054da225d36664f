use registrar::core::acquire::{
    acquire_bounded_integer, acquire_date, acquire_datetime, acquire_decimal, acquire_email,
    acquire_enumerated_choice, acquire_integer, acquire_multi_choice, acquire_national_id,
    acquire_nonempty_text, acquire_optional_text, acquire_postal_address, acquire_yes_no,
};
use registrar::core::console::ScriptedConsole;
use registrar::core::error::RegistrarError;
use registrar::core::geocode::{PostalLookup, ResolvedAddress, StaticLookup};
use std::collections::BTreeMap;

fn paulista_lookup() -> StaticLookup {
    let mut lookup = StaticLookup::new();
    lookup.insert(ResolvedAddress {
        postal_code: "01310200".to_string(),
        street: "Av. Paulista".to_string(),
        district: "Bela Vista".to_string(),
        locality: "São Paulo".to_string(),
        region: "SP".to_string(),
    });
    lookup
}

#[test]
fn integer_terminates_on_first_valid_token() {
    let mut console = ScriptedConsole::new(&["abc", "", "12.5", "42"]);
    let value = acquire_integer(&mut console, "Number: ", "Invalid input.").unwrap();
    assert_eq!(value, 42);
    assert_eq!(console.messages.len(), 3);
    assert_eq!(console.prompts.len(), 4);
}

#[test]
fn integer_surfaces_input_closed_when_script_runs_dry() {
    let mut console = ScriptedConsole::new(&["abc"]);
    let err = acquire_integer(&mut console, "Number: ", "Invalid input.").unwrap_err();
    assert!(matches!(err, RegistrarError::InputClosed));
}

#[test]
fn bounded_integer_reports_the_range() {
    let mut console = ScriptedConsole::new(&["0", "17", "5"]);
    let value =
        acquire_bounded_integer(&mut console, "Field: ", "Invalid input.", 1, 16).unwrap();
    assert_eq!(value, 5);
    assert_eq!(console.messages.len(), 2);
    assert!(console.messages[0].contains("between 1 and 16"));
}

#[test]
fn decimal_accepts_comma_or_dot_separator() {
    let mut console = ScriptedConsole::new(&["1,75"]);
    assert_eq!(
        acquire_decimal(&mut console, "Height: ", "Invalid input.").unwrap(),
        1.75
    );

    let mut console = ScriptedConsole::new(&["tall", "2.5"]);
    assert_eq!(
        acquire_decimal(&mut console, "Height: ", "Invalid input.").unwrap(),
        2.5
    );
}

#[test]
fn nonempty_text_rejects_whitespace_only_lines() {
    let mut console = ScriptedConsole::new(&["   ", "", "Acme Labs"]);
    let value =
        acquire_nonempty_text(&mut console, "Name: ", "The field cannot be empty.").unwrap();
    assert_eq!(value, "Acme Labs");
    assert_eq!(console.messages.len(), 2);
}

#[test]
fn optional_text_returns_none_on_empty_line() {
    let mut console = ScriptedConsole::new(&[""]);
    assert_eq!(acquire_optional_text(&mut console, "Complement: ").unwrap(), None);

    let mut console = ScriptedConsole::new(&["Apt 12"]);
    assert_eq!(
        acquire_optional_text(&mut console, "Complement: ").unwrap(),
        Some("Apt 12".to_string())
    );
}

#[test]
fn date_rejects_malformed_and_empty_with_same_message() {
    let mut console = ScriptedConsole::new(&["", "31/02/2024", "15/11/2025"]);
    let date = acquire_date(&mut console, "Date: ", "Invalid date.").unwrap();
    assert_eq!(date.format("%d/%m/%Y").to_string(), "15/11/2025");
    assert_eq!(console.messages, vec!["Invalid date.", "Invalid date."]);
}

#[test]
fn datetime_parses_the_fixed_format() {
    let mut console = ScriptedConsole::new(&["15/11/2025", "15/11/2025 14:30"]);
    let value = acquire_datetime(&mut console, "When: ", "Invalid date.").unwrap();
    assert_eq!(value.format("%d/%m/%Y %H:%M").to_string(), "15/11/2025 14:30");
    assert_eq!(console.messages.len(), 1);
}

#[test]
fn yes_no_decides_on_the_first_character() {
    let mut console = ScriptedConsole::new(&["maybe", "YES"]);
    assert!(acquire_yes_no(&mut console, "Active? ", "Invalid input.").unwrap());

    let mut console = ScriptedConsole::new(&["nope"]);
    assert!(!acquire_yes_no(&mut console, "Active? ", "Invalid input.").unwrap());
}

#[test]
fn enumerated_choice_returns_the_mapped_label() {
    let options: BTreeMap<i64, String> =
        [(1, "Organization".to_string()), (2, "Person".to_string())].into();
    let mut console = ScriptedConsole::new(&["9", "2"]);
    let label =
        acquire_enumerated_choice(&mut console, "Kind: ", "Invalid input.", &options).unwrap();
    assert_eq!(label, "Person");
}

#[test]
fn enumerated_choice_reprompts_on_gaps_in_the_key_set() {
    let options: BTreeMap<i64, String> =
        [(1, "Low".to_string()), (3, "High".to_string())].into();
    let mut console = ScriptedConsole::new(&["2", "3"]);
    let label =
        acquire_enumerated_choice(&mut console, "Level: ", "Invalid input.", &options).unwrap();
    assert_eq!(label, "High");
}

#[test]
fn multi_choice_rejects_the_whole_line_on_one_bad_token() {
    let options: BTreeMap<i64, String> = [
        (1, "Technology".to_string()),
        (2, "Education".to_string()),
        (3, "Health".to_string()),
    ]
    .into();
    let mut console = ScriptedConsole::new(&["1, x", "1,9", "1,3"]);
    let (joined, labels) =
        acquire_multi_choice(&mut console, "Categories: ", "Invalid selection.", &options).unwrap();
    assert_eq!(joined, "Technology, Health");
    assert_eq!(labels, vec!["Technology", "Health"]);
    assert_eq!(console.messages.len(), 2);
}

#[test]
fn multi_choice_wildcard_selects_every_option() {
    let options: BTreeMap<i64, String> = [
        (1, "Technology".to_string()),
        (2, "Education".to_string()),
        (3, "Health".to_string()),
    ]
    .into();
    let mut console = ScriptedConsole::new(&["A"]);
    let (joined, labels) =
        acquire_multi_choice(&mut console, "Categories: ", "Invalid selection.", &options).unwrap();
    assert_eq!(joined, "Technology, Education, Health");
    assert_eq!(labels.len(), 3);
}

#[test]
fn email_requires_local_domain_and_tld() {
    let mut console = ScriptedConsole::new(&["not-an-email", "ops@acme", "ops@acme.com.br"]);
    let value = acquire_email(&mut console, "E-mail: ", "Invalid e-mail.").unwrap();
    assert_eq!(value, "ops@acme.com.br");
    assert_eq!(console.messages.len(), 2);
}

#[test]
fn national_id_strips_punctuation_and_checks_length() {
    let mut console = ScriptedConsole::new(&["123", "529.982.247-25"]);
    let value = acquire_national_id(&mut console, "CPF: ", "Invalid input.", 11).unwrap();
    assert_eq!(value, "52998224725");

    let mut console = ScriptedConsole::new(&["12.345.678/0001-95"]);
    let value = acquire_national_id(&mut console, "CNPJ: ", "Invalid input.", 14).unwrap();
    assert_eq!(value, "12345678000195");
}

#[test]
fn postal_address_reprompts_until_a_known_code() {
    let lookup = paulista_lookup();
    let mut console = ScriptedConsole::new(&["123", "99999999", "01310-200"]);
    let address =
        acquire_postal_address(&mut console, "Postal code: ", "Invalid code.", &lookup).unwrap();
    assert_eq!(address.street, "Av. Paulista");
    assert_eq!(address.postal_code, "01310200");
    assert_eq!(console.messages.len(), 2);
}

#[test]
fn postal_lookup_is_idempotent_for_a_reachable_code() {
    let lookup = paulista_lookup();
    let first = lookup.lookup("01310200").unwrap();
    let second = lookup.lookup("01310200").unwrap();
    assert_eq!(first, second);
}

#[test]
fn transport_failure_reprompts_like_an_unknown_code() {
    let client =
        registrar::core::geocode::ViaCepClient::with_base_url("http://127.0.0.1:9").unwrap();
    let err = client.lookup("01310200").unwrap_err();
    assert!(matches!(
        err,
        registrar::core::geocode::LookupError::Transport(_)
    ));

    // Inside the acquisition loop the failure only costs a retry; with the
    // script exhausted the cancellation sentinel surfaces.
    let mut console = ScriptedConsole::new(&["01310200"]);
    let err =
        acquire_postal_address(&mut console, "Postal code: ", "Invalid code.", &client).unwrap_err();
    assert!(matches!(err, RegistrarError::InputClosed));
    assert_eq!(console.messages.len(), 1);
}

#[test]
fn malformed_prefixes_always_end_on_the_single_valid_token() {
    let sequences: &[&[&str]] = &[
        &["42"],
        &["x", "42"],
        &["", "  ", "nine", "42"],
        &["4 2", "42,", "42"],
    ];
    for lines in sequences {
        let mut console = ScriptedConsole::new(lines);
        let value = acquire_integer(&mut console, "N: ", "Invalid input.").unwrap();
        assert_eq!(value, 42);
        assert!(console.inputs_exhausted());
    }
}
