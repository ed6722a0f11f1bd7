//! CareSvc command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto the service dialog flow in `caresvc_core`.
//! - Report notices on stdout; rejected input and failures go to stderr
//!   with exit code 1.

mod config;

use anyhow::{bail, Context};
use caresvc_core::db::open_db;
use caresvc_core::{
    init_logging, parse_price, InMemoryServiceRepository, JsonFileServiceRepository, Notice,
    ServiceCandidate, ServiceForm, ServiceId, ServiceRecord, ServiceRepository, ServiceStore,
    SqliteServiceRepository, StoreOrigin, SubmitOutcome,
};
use clap::{Parser, Subcommand};
use config::{AppConfig, Backend, GlobalArgs};
use log::info;
use std::process::ExitCode;

type CliForm<'r> = ServiceForm<Box<dyn ServiceRepository + 'r>>;

/// Lines produced by one command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    /// Command applied; printed to stdout.
    Done(Vec<String>),
    /// Input refused (validation or stale edit); printed to stderr.
    Rejected(Vec<String>),
}

#[derive(Debug, Parser)]
#[command(name = "caresvc")]
#[command(about = "Manage the healthcare service catalog", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List services in catalog order
    List {
        /// Print the stored JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a new service
    Add {
        name: String,
        description: String,
        /// Price, e.g. 49.99
        price: String,
    },
    /// Edit fields of an existing service
    Edit {
        id: ServiceId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    /// Delete a service by id
    Delete { id: ServiceId },
    /// Replace the catalog with the default services
    Reset,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(Reply::Done(lines)) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Ok(Reply::Rejected(lines)) => {
            for line in lines {
                eprintln!("{line}");
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Reply> {
    let config = AppConfig::resolve(&cli.global)?;
    if config.logging_enabled {
        // Logging is best-effort; the command still runs without it.
        if let Err(err) = init_logging(&config.log_level, config.log_dir()) {
            eprintln!("warning: logging disabled: {err}");
        }
    }
    info!(
        "event=cli_command module=cli status=start backend={:?} data_dir={}",
        config.backend,
        config.data_dir.display()
    );

    match config.backend {
        Backend::Sqlite => {
            std::fs::create_dir_all(&config.data_dir).with_context(|| {
                format!("cannot create data dir `{}`", config.data_dir.display())
            })?;
            let conn = open_db(config.db_path()).context("database open failed")?;
            execute(Box::new(SqliteServiceRepository::new(&conn)), &cli.command)
        }
        Backend::Json => execute(
            Box::new(JsonFileServiceRepository::in_dir(&config.data_dir)),
            &cli.command,
        ),
        Backend::Memory => execute(Box::new(InMemoryServiceRepository::new()), &cli.command),
    }
}

fn execute(repo: Box<dyn ServiceRepository + '_>, command: &Command) -> anyhow::Result<Reply> {
    let store = ServiceStore::open_default(repo).context("store open failed")?;
    let mut lines = Vec::new();
    if let StoreOrigin::DefaultsRecovered(reason) = store.origin() {
        lines.push(format!("stored services were unreadable ({reason}); restored defaults"));
    }
    let mut form: CliForm<'_> = ServiceForm::new(store);

    match command {
        Command::List { json } => {
            if *json {
                let encoded = serde_json::to_string_pretty(form.store().services())
                    .context("failed to encode services")?;
                lines.push(encoded);
            } else {
                lines.extend(form.store().services().iter().map(render_row));
            }
        }
        Command::Add {
            name,
            description,
            price,
        } => {
            form.open_create();
            let candidate = ServiceCandidate::from_form_input(name, description, price);
            return submit(&mut form, &candidate, lines);
        }
        Command::Edit {
            id,
            name,
            description,
            price,
        } => {
            if !form.open_edit(*id) {
                bail!("service {id} not found");
            }
            let mut candidate = form.initial_candidate();
            if let Some(name) = name {
                candidate.name = Some(name.clone());
            }
            if let Some(description) = description {
                candidate.description = Some(description.clone());
            }
            if let Some(price) = price {
                candidate.price = parse_price(price);
            }
            return submit(&mut form, &candidate, lines);
        }
        Command::Delete { id } => {
            let (_, notice) = form.delete(*id).context("delete failed")?;
            lines.push(render_notice(&notice));
        }
        Command::Reset => {
            let mut store = form.into_store();
            store.reset_to_defaults().context("reset failed")?;
            lines.push(format!("restored {} default services", store.len()));
        }
    }

    Ok(Reply::Done(lines))
}

fn submit(
    form: &mut CliForm<'_>,
    candidate: &ServiceCandidate,
    mut lines: Vec<String>,
) -> anyhow::Result<Reply> {
    match form.submit(candidate).context("save failed")? {
        SubmitOutcome::Saved { record, notice } => {
            lines.push(render_notice(&notice));
            lines.push(render_row(&record));
            Ok(Reply::Done(lines))
        }
        SubmitOutcome::Rejected { errors, notice } => {
            lines.extend(
                errors
                    .violations()
                    .map(|(field, message)| format!("{}: {message}", field.as_str())),
            );
            lines.push(render_notice(&notice));
            Ok(Reply::Rejected(lines))
        }
        SubmitOutcome::Stale { notice, .. } => {
            lines.push(render_notice(&notice));
            Ok(Reply::Rejected(lines))
        }
    }
}

fn render_row(record: &ServiceRecord) -> String {
    format!(
        "{:>14}  {}  ${}  {}",
        record.id, record.name, record.price, record.description
    )
}

fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Success(message) => format!("ok: {message}"),
        Notice::Error(message) => format!("error: {message}"),
        Notice::Info(message) => format!("info: {message}"),
    }
}
