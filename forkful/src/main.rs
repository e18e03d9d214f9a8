//! forkful - browse and drive a recipe session from the terminal
//!
//! Every invocation starts a fresh in-memory session from seed data.
//! Read-only subcommands print one view; `session` reads commands from
//! stdin and applies them to a single store until EOF.

mod output;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libforkful::logging::{LogFormat, LoggingConfig};
use libforkful::{Config, ForkfulError, NotFoundError, Store};

use crate::output::{Format, Printer};

#[derive(Parser, Debug)]
#[command(name = "forkful")]
#[command(version)]
#[command(about = "Browse, search and drive a recipe-sharing session")]
#[command(long_about = r#"Browse, search and drive a recipe-sharing session.

Each run loads seed data into a fresh in-memory store. Nothing is saved
between runs; use `forkful session` to apply several changes in one run.

EXAMPLES:
    # Everything, in feed order
    forkful list

    # Case-insensitive text search, any-of tag filter
    forkful search pizza
    forkful search --tag dessert --tag vegan

    # Home feed views
    forkful trending
    forkful latest --format json

    # Recipe detail and profiles
    forkful show r1
    forkful profile u2

    # Apply commands, one JSON object per line
    echo '{"type":"toggle_like","recipe_id":"r1"}' | forkful session

CONFIGURATION:
    Configuration file: ~/.config/forkful/config.toml
    Override with FORKFUL_CONFIG. Logging honours FORKFUL_LOG_LEVEL and
    RUST_LOG.

EXIT CODES:
    0 - Success
    1 - Configuration or seed data error
    3 - Invalid input
    4 - Recipe or user not found
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Seed data file (JSON); overrides the configured seed
    #[arg(long, global = true, value_name = "FILE")]
    seed: Option<String>,

    /// Session user id; overrides the configured user
    #[arg(long, global = true, value_name = "USER_ID")]
    user: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json", "jsonl"])]
    format: String,

    /// Log format for stderr: text, json or pretty
    #[arg(long, global = true, env = "FORKFUL_LOG_FORMAT", default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json", "pretty"])]
    log_format: String,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all recipes in feed order
    List,

    /// Search recipes by text and tags
    Search {
        /// Text matched against title, description and author name
        #[arg(default_value = "")]
        query: String,

        /// Only recipes carrying this tag (repeatable, any-of)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },

    /// Most-liked recipes
    Trending {
        /// Number of recipes to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// All recipes, newest first
    Latest,

    /// Recipe detail with comments
    Show {
        recipe_id: String,
    },

    /// User profile with their recipes
    Profile {
        user_id: String,
    },

    /// Known tags
    Tags,

    /// Read JSON-line commands from stdin and apply them in one session
    Session,
}

fn main() {
    let cli = Cli::parse();

    let log_format = cli.log_format.parse().unwrap_or(LogFormat::Text);
    LoggingConfig::from_env(log_format, cli.verbose).init();

    tracing::debug!("forkful started with args: {:?}", cli);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = build_store(&cli)?;
    let format: Format = cli.format.parse()?;
    let mut printer = Printer::new(std::io::stdout().lock(), format);

    match cli.command {
        Commands::List => printer.recipes(&store, store.recipes().iter().collect())?,
        Commands::Search { query, tags } => {
            printer.recipes(&store, store.search_recipes(&query, &tags))?
        }
        Commands::Trending { limit } => {
            let limit = limit.unwrap_or(store.settings().trending_limit);
            printer.recipes(&store, libforkful::store::views::trending(store.recipes(), limit))?
        }
        Commands::Latest => printer.recipes(&store, store.latest())?,
        Commands::Show { recipe_id } => {
            let recipe = store
                .recipe(&recipe_id)
                .ok_or_else(|| ForkfulError::from(NotFoundError::Recipe(recipe_id.clone())))?;
            printer.recipe_detail(&store, recipe)?
        }
        Commands::Profile { user_id } => printer.profile(&store, &user_id)?,
        Commands::Tags => printer.tags(store.tags())?,
        Commands::Session => {
            let stdin = std::io::stdin();
            let summary = session::run(store, stdin.lock(), printer.into_inner())?;
            tracing::info!(
                applied = summary.applied,
                failed = summary.failed,
                "Session finished"
            );
        }
    }

    Ok(())
}

fn build_store(cli: &Cli) -> Result<Store> {
    let mut config = Config::load().context("Failed to load configuration")?;

    if let Some(seed) = &cli.seed {
        config.seed.path = Some(seed.clone());
    }
    if let Some(user) = &cli.user {
        config.session.user_id = Some(user.clone());
    }

    Store::from_config(&config).context("Failed to load seed data")
}

fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<ForkfulError>()
        .map(ForkfulError::exit_code)
        .unwrap_or(1)
}
