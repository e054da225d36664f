//! Registrar: interactive record management for organizations and people.
//!
//! Operators create and maintain Organization/Person records backed by a
//! local SQLite registry. Every value entering the system passes through a
//! validated acquisition step (retry-until-valid prompts), and every
//! mutation runs through a cascading coordinator that keeps the entity,
//! credential, and address tables consistent: one-field-at-a-time edits and
//! whole-record deletions land across all three tables together or not at
//! all. Postal addresses are resolved from an 8-digit code through the
//! ViaCEP lookup service.
//!
//! # Layout
//!
//! - [`core::acquire`]: blocking, retry-until-valid input parsers
//! - [`core::fields`]: static field registry (index -> table/column/validator)
//! - [`core::update`] / [`core::delete`]: cascading transaction coordinators
//! - [`core::record`]: joined reads and the interactive insertion flow
//!
//! # Examples
//!
//! ```bash
//! # Initialize the registry in the current directory
//! registrar init
//!
//! # Register an organization interactively
//! registrar add organization
//!
//! # Edit field 2 (name) of record 7
//! registrar update --id 7 --field 2
//!
//! # Remove record 3 and its credential and address
//! registrar delete --id 3
//! ```

pub mod core;

use crate::core::error::RegistrarError;
use crate::core::record::EntityKind;
use crate::core::{acquire, console, db, delete, export, fields, geocode, output, record, update};

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const DATA_DIR: &str = ".registrar";

#[derive(Parser, Debug)]
#[clap(
    name = "registrar",
    version = env!("CARGO_PKG_VERSION"),
    about = "Interactive record management for organizations and people"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct InitCli {
    /// Directory to initialize (defaults to current working directory).
    #[clap(short, long)]
    dir: Option<PathBuf>,
    /// Re-run initialization even if a registry already exists.
    #[clap(long)]
    force: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the registry database
    #[clap(name = "init", visible_alias = "i")]
    Init(InitCli),

    /// Register a new organization or person
    #[clap(name = "add", visible_alias = "a")]
    Add {
        /// Record kind; prompted interactively when omitted.
        #[clap(value_enum)]
        kind: Option<EntityKind>,
    },

    /// List records
    #[clap(name = "list", visible_alias = "l")]
    List {
        /// Restrict to one record kind.
        #[clap(long, value_enum)]
        kind: Option<EntityKind>,
    },

    /// Show one record in full
    #[clap(name = "show", visible_alias = "s")]
    Show {
        #[clap(long)]
        id: i64,
    },

    /// Edit one field of a record
    #[clap(name = "update", visible_alias = "u")]
    Update {
        #[clap(long)]
        id: i64,
        /// Field index from `registrar fields`; prompted when omitted.
        #[clap(long)]
        field: Option<u32>,
    },

    /// Remove a record with its credential and address
    #[clap(name = "delete", visible_alias = "d")]
    Delete {
        #[clap(long)]
        id: i64,
        /// Skip the confirmation question.
        #[clap(long)]
        yes: bool,
    },

    /// Export all records to a JSON file
    #[clap(name = "export")]
    Export {
        #[clap(long, default_value = "records.json")]
        out: PathBuf,
    },

    /// List the editable field indices
    #[clap(name = "fields")]
    Fields,
}

fn find_registrar_root(start_dir: &Path) -> Result<PathBuf, RegistrarError> {
    let mut current_dir = PathBuf::from(start_dir);
    loop {
        if current_dir.join(DATA_DIR).exists() {
            return Ok(current_dir);
        }
        if !current_dir.pop() {
            return Err(RegistrarError::NotFound(
                "'.registrar' directory not found in current or parent directories. Run `registrar init` first.".to_string(),
            ));
        }
    }
}

fn run_init(init: InitCli) -> Result<(), RegistrarError> {
    let target_dir = match init.dir {
        Some(d) => d,
        None => std::env::current_dir()?,
    };
    std::fs::create_dir_all(&target_dir).map_err(RegistrarError::Io)?;
    let target_dir = std::fs::canonicalize(&target_dir).map_err(RegistrarError::Io)?;

    let registrar_root = target_dir.join(DATA_DIR);
    if registrar_root.exists() && !init.force {
        println!(
            "{} Registry already initialized at {}. Use {} to re-run.",
            "✓".bright_green(),
            registrar_root.display(),
            "--force".bright_cyan()
        );
        return Ok(());
    }

    let store_root = registrar_root.join("data");
    std::fs::create_dir_all(&store_root).map_err(RegistrarError::Io)?;

    let db_path = db::registry_db_path(&store_root);
    if db_path.exists() {
        println!(
            "    {} {} {}",
            "✓".bright_green(),
            "registry.db".bright_white(),
            "(preserved - existing data kept)".bright_black()
        );
    } else {
        db::initialize_registry_db(&store_root)?;
        println!("    {} {}", "●".bright_green(), "registry.db".bright_white());
    }

    println!(
        "{} Registry ready at {}",
        "✓".bright_green(),
        store_root.display()
    );
    Ok(())
}

fn prompt_entity_kind(console: &mut dyn console::Console) -> Result<EntityKind, RegistrarError> {
    let options: BTreeMap<i64, String> =
        [(1, "Organization".to_string()), (2, "Person".to_string())].into();
    console.say("Record kind:");
    for (key, label) in &options {
        console.say(&format!("  {} - {}", key, label));
    }
    let picked = acquire::acquire_enumerated_choice(
        console,
        "Kind: ",
        "Invalid input.",
        &options,
    )?;
    Ok(match picked.as_str() {
        "Person" => EntityKind::Person,
        _ => EntityKind::Organization,
    })
}

pub fn run() -> Result<(), RegistrarError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init(init) => run_init(init),
        command => {
            let current_dir = std::env::current_dir()?;
            let project_root = find_registrar_root(&current_dir)?;
            let store_root = project_root.join(DATA_DIR).join("data");
            let mut conn = db::open_registry_db(&store_root)?;
            let mut console = console::Terminal;

            match command {
                Command::Add { kind } => {
                    let lookup = geocode::ViaCepClient::new()?;
                    let kind = match kind {
                        Some(kind) => kind,
                        None => prompt_entity_kind(&mut console)?,
                    };
                    let inserted = record::add_record(&mut conn, &mut console, &lookup, kind)?;
                    println!(
                        "{} Record {} registered.",
                        "✓".bright_green(),
                        inserted.id
                    );
                    output::render_record(&inserted);
                }
                Command::List { kind } => {
                    let records = record::list_records(&conn, kind)?;
                    output::render_record_list(&records);
                }
                Command::Show { id } => {
                    let found = record::load_record(&conn, id)?;
                    output::render_record(&found);
                }
                Command::Update { id, field } => {
                    let lookup = geocode::ViaCepClient::new()?;
                    let field_index = match field {
                        Some(index) => index,
                        None => {
                            output::render_field_catalog();
                            acquire::acquire_bounded_integer(
                                &mut console,
                                "Field number to update: ",
                                "Invalid input.",
                                i64::from(fields::FIELD_MIN),
                                i64::from(fields::FIELD_MAX),
                            )? as u32
                        }
                    };
                    let updated =
                        update::update_field(&mut conn, &mut console, &lookup, id, field_index)?;
                    println!("{} Record {} updated.", "✓".bright_green(), id);
                    output::render_record(&updated);
                }
                Command::Delete { id, yes } => {
                    if !yes {
                        let confirmed = acquire::acquire_yes_no(
                            &mut console,
                            &format!(
                                "Remove record {} with its credential and address? (y/n): ",
                                id
                            ),
                            "Invalid input. Enter 'y' for yes or 'n' for no.",
                        )?;
                        if !confirmed {
                            println!("Nothing removed.");
                            return Ok(());
                        }
                    }
                    delete::delete_record(&mut conn, id)?;
                    println!(
                        "{} Record {} removed with its credential and address.",
                        "✓".bright_green(),
                        id
                    );
                }
                Command::Export { out } => {
                    let records = record::list_records(&conn, None)?;
                    let count = export::export_json(&records, &out)?;
                    println!(
                        "{} Exported {} record(s) to {}",
                        "✓".bright_green(),
                        count,
                        out.display()
                    );
                }
                Command::Fields => {
                    output::render_field_catalog();
                }
                Command::Init(_) => unreachable!(),
            }
            Ok(())
        }
    }
}
