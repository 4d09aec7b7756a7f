use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use hospital_admin_core::{
    session::seed_database, to_12h, AdminSession, CoreConfig, DynPage, EntityKind, IdScheme,
    Patch, SortSpec, Storage,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hospital-admin")]
#[command(about = "Hospital admin record lists")]
struct Cli {
    /// SQLite file to keep records in (overrides HOSPITAL_ADMIN_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Identifier scheme for new records: sequential or uuid
    #[arg(long, global = true)]
    id_scheme: Option<IdScheme>,

    /// Start from empty lists instead of mock records
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List record kinds with their facets and statuses
    Kinds,
    /// Show the records of one kind
    List {
        kind: EntityKind,
        /// Case-insensitive text to search for
        #[arg(long)]
        search: Option<String>,
        /// Facet filter as facet=value (repeatable, value "all" disables it)
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
        /// Facet to sort by
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Print one record as JSON
    Show { kind: EntityKind, id: String },
    /// Create a record from a JSON object
    Create { kind: EntityKind, json: String },
    /// Merge a JSON object of changed fields into a record
    Update {
        kind: EntityKind,
        id: String,
        json: String,
    },
    /// Change a record's status
    Status {
        kind: EntityKind,
        id: String,
        status: String,
    },
    /// Delete a record
    Delete {
        kind: EntityKind,
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Convert a 24-hour time (HH:MM) to 12-hour display
    #[command(name = "to-12h")]
    To12h { time: String },
    /// Write mock records into the database file
    Seed,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (facet, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected facet=value, got '{raw}'"))?;
    if facet.trim().is_empty() {
        return Err(format!("missing facet name in '{raw}'"));
    }
    Ok((facet.trim().to_string(), value.to_string()))
}

/// Environment configuration with command-line overrides applied.
fn resolve_config(cli: &Cli, base: CoreConfig) -> CoreConfig {
    let mut config = base;
    if let Some(path) = &cli.db {
        config = config.with_storage(Storage::Sqlite(path.clone()));
    }
    if let Some(scheme) = cli.id_scheme {
        config = config.with_id_scheme(scheme);
    }
    if cli.no_seed {
        config = config.with_seed(false);
    }
    config
}

fn page_mut(session: &mut AdminSession, kind: EntityKind) -> anyhow::Result<&mut (dyn DynPage + 'static)> {
    session
        .page_mut(kind)
        .ok_or_else(|| anyhow!("no page for {kind}"))
}

fn print_notifications(page: &mut dyn DynPage, out: &mut impl Write) -> anyhow::Result<()> {
    for n in page.drain_notifications() {
        writeln!(out, "[{:?}] {}: {}", n.level, n.title, n.description)?;
    }
    Ok(())
}

fn run(cli: Cli, config: CoreConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::To12h { time } => {
            writeln!(out, "{}", to_12h(&time)?)?;
        }
        Commands::Seed => {
            if config.db_path().is_none() {
                bail!("seed needs a database file: pass --db or set HOSPITAL_ADMIN_DB");
            }
            let written = seed_database(&config).context("seeding database")?;
            for (kind, count) in written {
                writeln!(out, "{kind}: {count} records written")?;
            }
        }
        Commands::Kinds => {
            let session = AdminSession::open(&config)?;
            for kind in session.kinds() {
                if let Some(page) = session.page(kind) {
                    writeln!(
                        out,
                        "{kind} ({}): facets [{}], statuses [{}]",
                        kind.id_prefix(),
                        page.facets().join(", "),
                        page.statuses().join(", ")
                    )?;
                }
            }
        }
        Commands::List {
            kind,
            search,
            filters,
            sort,
            desc,
        } => {
            let mut session = AdminSession::open(&config)?;
            let page = page_mut(&mut session, kind)?;
            if let Some(term) = search {
                page.set_search(&term);
            }
            for (facet, value) in &filters {
                page.set_filter(facet, value)?;
            }
            let sort = sort.map(|facet| {
                if desc {
                    SortSpec::descending(&facet)
                } else {
                    SortSpec::ascending(&facet)
                }
            });
            page.set_sort(sort)?;

            let records = page.visible()?;
            for record in &records {
                writeln!(out, "{}", serde_json::to_string(record)?)?;
            }
            writeln!(out, "{} of {} {kind}", records.len(), page.total()?)?;
        }
        Commands::Show { kind, id } => {
            let mut session = AdminSession::open(&config)?;
            let page = page_mut(&mut session, kind)?;
            let record = page
                .get_json(&id)?
                .ok_or_else(|| anyhow!("{kind} {id} not found"))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
        }
        Commands::Create { kind, json } => {
            let record = serde_json::from_str(&json).context("parsing record JSON")?;
            let mut session = AdminSession::open(&config)?;
            let page = page_mut(&mut session, kind)?;
            let result = page.create_json(record);
            print_notifications(page, out)?;
            writeln!(out, "{}", result?)?;
        }
        Commands::Update { kind, id, json } => {
            let patch = Patch::from_json(&json)?;
            let mut session = AdminSession::open(&config)?;
            let page = page_mut(&mut session, kind)?;
            let result = page.update_json(&id, patch);
            print_notifications(page, out)?;
            writeln!(out, "{}", serde_json::to_string(&result?)?)?;
        }
        Commands::Status { kind, id, status } => {
            let mut session = AdminSession::open(&config)?;
            let page = page_mut(&mut session, kind)?;
            let result = page.set_status_str(&id, &status);
            print_notifications(page, out)?;
            result?;
        }
        Commands::Delete { kind, id, yes } => {
            let mut session = AdminSession::open(&config)?;
            let page = page_mut(&mut session, kind)?;
            let prompt = match page.request_delete(&id) {
                Ok(prompt) => prompt,
                Err(e) => {
                    print_notifications(page, out)?;
                    return Err(e.into());
                }
            };
            if yes {
                page.confirm_delete(&id)?;
            } else {
                page.cancel_delete(&id);
                writeln!(out, "{prompt}")?;
                writeln!(out, "Re-run with --yes to delete.")?;
            }
            print_notifications(page, out)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hospital_admin_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli, CoreConfig::from_env()?);
    tracing::debug!(db = ?config.db_path(), id_scheme = %config.id_scheme(), "resolved configuration");

    let stdout = std::io::stdout();
    run(cli, config, &mut stdout.lock())
}
