mod display;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use docverse_core::{
    ConsultationFilter, LoadState, MemoryLocation, QueryUpdate, Session, SortKey, SpecialtySet,
    parse_details_path,
};
use docverse_sync::{DEFAULT_ENDPOINT, DataSource, Lookup, Snapshot, SourceConfig};
use tracing::Level;

#[derive(Parser)]
#[command(name = "docverse", version, about = "Browse the doctor directory")]
struct Cli {
    /// Remote directory feed (JSON array of doctor records).
    #[arg(long, env = "DOCVERSE_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    /// Fallback snapshot file; the bundled snapshot is used when omitted.
    #[arg(long, env = "DOCVERSE_SNAPSHOT", global = true)]
    snapshot: Option<PathBuf>,

    /// Skip the remote feed and read the snapshot only.
    #[arg(long, global = true)]
    offline: bool,

    /// Debug-level logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List doctors matching a query.
    List {
        #[command(flatten)]
        query: QueryArgs,
        /// Print the visible doctors as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the URL for a query without loading the directory.
    Url {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Autocomplete doctor names.
    Suggest { text: String },
    /// Show one doctor by id or details path (e.g. `/doctor/111416`).
    Show {
        target: String,
        #[arg(long)]
        json: bool,
    },
    /// List every specialty in the directory.
    Specialties,
}

#[derive(Args)]
struct QueryArgs {
    /// Starting URL query string, e.g. `sort=fees&specialty=Dentist`.
    #[arg(long, default_value = "")]
    query: String,

    /// Search doctor names.
    #[arg(long)]
    search: Option<String>,

    /// "Video Consult" or "In Clinic".
    #[arg(long)]
    consultation: Option<ConsultationFilter>,

    /// Replace the selected specialties (repeatable).
    #[arg(long = "specialty")]
    specialties: Vec<String>,

    /// "fees" (ascending) or "experience" (descending).
    #[arg(long)]
    sort: Option<SortKey>,
}

impl QueryArgs {
    fn update(&self) -> QueryUpdate {
        QueryUpdate {
            search_text: self.search.clone(),
            consultation: self.consultation,
            specialties: (!self.specialties.is_empty())
                .then(|| self.specialties.iter().cloned().collect::<SpecialtySet>()),
            sort: self.sort,
        }
    }

    fn session(&self) -> Session<MemoryLocation> {
        let mut session = Session::new(MemoryLocation::new("/", &self.query));
        let update = self.update();
        if !update.is_empty() {
            session.update(update);
        }
        session
    }
}

impl Cli {
    fn source_config(&self) -> SourceConfig {
        SourceConfig {
            endpoint: (!self.offline).then(|| self.endpoint.clone()),
            snapshot: self
                .snapshot
                .clone()
                .map_or(Snapshot::Bundled, Snapshot::File),
        }
    }
}

/// Load the directory into `session`, failing when no data is available.
async fn load_into(
    source: &DataSource,
    session: &mut Session<MemoryLocation>,
) -> anyhow::Result<()> {
    let ticket = session.begin_load();
    let result = source.load().await;
    if let Ok(directory) = &result {
        tracing::info!(
            origin = directory.origin.as_str(),
            loaded_at = %directory.loaded_at.to_rfc3339(),
            "directory loaded"
        );
    }
    session.finish_load(ticket, result.map(|d| d.doctors));
    if let LoadState::Failed(msg) = session.load_state() {
        bail!("failed to load doctors: {msg}");
    }
    Ok(())
}

fn parse_target(target: &str) -> anyhow::Result<u64> {
    parse_details_path(target)
        .or_else(|| target.trim().parse().ok())
        .with_context(|| format!("not a doctor id or details path: {target:?}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("docverse v{}", env!("CARGO_PKG_VERSION"));

    let source = DataSource::from_config(&cli.source_config());

    match &cli.command {
        Command::List { query, json } => {
            let mut session = query.session();
            load_into(&source, &mut session).await?;
            let visible = session.visible().unwrap_or_default();
            if *json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                display::print_query_summary(
                    &session.location().href(),
                    &session.query().specialties,
                );
                display::print_listing(&visible);
            }
        }
        Command::Url { query } => {
            println!("{}", query.session().location().href());
        }
        Command::Suggest { text } => {
            let mut session = Session::new(MemoryLocation::default());
            load_into(&source, &mut session).await?;
            display::print_lines(session.suggestions(text));
        }
        Command::Show { target, json } => {
            let id = parse_target(target)?;
            match source.resolve(id, None).await.context("loading doctor details")? {
                Lookup::Found(doctor) if *json => {
                    println!("{}", serde_json::to_string_pretty(&doctor)?);
                }
                Lookup::Found(doctor) => display::print_doctor_card(&doctor),
                Lookup::NotFound(id) => display::print_not_found(id),
            }
        }
        Command::Specialties => {
            let mut session = Session::new(MemoryLocation::default());
            load_into(&source, &mut session).await?;
            display::print_lines(session.available_specialties());
        }
    }

    Ok(())
}
