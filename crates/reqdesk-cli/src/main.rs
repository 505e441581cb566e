// Rust guideline compliant 2026-10-14

//! Reqdesk CLI Application
//!
//! Command-line interface for the Reqdesk service request store.

use clap::Parser;
use reqdesk_app::{AppError, Changes, ErrorEnvelope, ListOptions, Submission, WorkspaceContext};
use reqdesk_cli::{commands, create_formatter, should_use_color};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "rqd",
    version,
    about = "Reqdesk: municipal service request tracking",
    long_about = "Reqdesk files citizen service requests, gives each a tracking code, and keeps them indexed by submission time, urgency and similarity.",
    after_help = "Examples:\n  rqd init\n  rqd submit --location \"Main St\" --category Roads --description \"Pothole\" --priority 1\n  rqd update REQ-2026-123456 --status in-progress --assign crew-4\n  rqd list --status submitted --category roads\n  rqd list --category roads --related\n  rqd related REQ-2026-123456\n  rqd top --limit 5\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize a Reqdesk workspace
    Init,

    /// Submit a new service request
    Submit {
        /// Where the problem is
        #[arg(long)]
        location: String,

        /// Kind of problem, such as Roads or Water
        #[arg(long)]
        category: String,

        /// What is wrong
        #[arg(long, default_value = "")]
        description: String,

        /// Priority (1 = most urgent, 5 = least)
        #[arg(long)]
        priority: Option<u8>,

        /// Attachment reference (repeatable)
        #[arg(long = "attachment")]
        attachments: Vec<String>,
    },

    /// Update an existing request
    Update {
        /// Tracking code or record id
        key: String,

        /// New status (submitted, under-review, in-progress, on-hold, resolved, closed)
        #[arg(long)]
        status: Option<String>,

        /// New priority (1-5)
        #[arg(long)]
        priority: Option<u8>,

        /// Status notes; pass an empty string to clear
        #[arg(long)]
        notes: Option<String>,

        /// Assignee; pass an empty string to clear
        #[arg(long)]
        assign: Option<String>,

        /// Estimated completion (YYYY-MM-DD or RFC 3339); pass an empty string to clear
        #[arg(long)]
        eta: Option<String>,
    },

    /// Show a request by tracking code or id
    Show {
        /// Tracking code or record id
        key: String,
    },

    /// List requests
    List {
        /// Only requests with this status, newest first
        #[arg(long)]
        status: Option<String>,

        /// Only requests of this category (any case), newest first
        #[arg(long)]
        category: Option<String>,

        /// Only category requests related to the first one filed
        #[arg(long, requires = "category", conflicts_with = "status")]
        related: bool,
    },

    /// List the distinct categories filed so far
    Categories,

    /// List the most urgent requests
    Top {
        /// How many to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List the requests most similar to one request
    Related {
        /// Tracking code or record id
        key: String,

        /// How many to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the minimum spanning forest of related requests
    Backbone,

    /// Check the snapshot and indices for problems
    Doctor {
        /// Rewrite the snapshot from the repaired store
        #[arg(long)]
        fix: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = WorkspaceContext::discover(cli.root.as_deref())
        .and_then(|workspace| workspace.load_config())
        .ok();

    init_tracing(cli.log_level.as_deref(), config.as_ref().map(|c| c.log_level.as_str()));

    let json = match cli.format {
        Some(OutputFormat::Json) => true,
        Some(OutputFormat::Table) => false,
        None => {
            cli.json
                || config
                    .as_ref()
                    .is_some_and(|c| c.output_format == reqdesk_core::OutputFormat::Json)
        }
    };
    let use_color = !cli.no_color && should_use_color();

    if let Err(error) = run(cli, json, use_color) {
        if json {
            let envelope = ErrorEnvelope::from_error(&to_app_error(error));
            match serde_json::to_string_pretty(&envelope) {
                Ok(body) => println!("{}", body),
                Err(_) => eprintln!("{}", envelope.message),
            }
        } else {
            let formatter = create_formatter(false, use_color);
            eprintln!("{}", formatter.format_error(&format!("{:#}", error)));
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, json: bool, use_color: bool) -> anyhow::Result<()> {
    let formatter = create_formatter(json, use_color);
    let formatter = formatter.as_ref();
    let root = cli.root.as_deref();

    match cli.command {
        Commands::Init => commands::init::execute(root, formatter),
        Commands::Submit {
            location,
            category,
            description,
            priority,
            attachments,
        } => commands::submit::execute(
            root,
            Submission {
                location,
                category,
                description,
                priority,
                attachments,
            },
            formatter,
        ),
        Commands::Update {
            key,
            status,
            priority,
            notes,
            assign,
            eta,
        } => commands::update::execute(
            root,
            &key,
            Changes {
                status,
                priority,
                notes,
                assigned_to: assign,
                eta,
            },
            formatter,
        ),
        Commands::Show { key } => commands::show::execute(root, &key, formatter),
        Commands::List {
            status,
            category,
            related,
        } => commands::list::execute(
            root,
            &ListOptions {
                status,
                category,
                related,
            },
            formatter,
        ),
        Commands::Categories => commands::categories::execute(root, formatter),
        Commands::Top { limit } => commands::top::execute(root, limit, formatter),
        Commands::Related { key, limit } => commands::related::execute(root, &key, limit, formatter),
        Commands::Backbone => commands::backbone::execute(root, formatter),
        Commands::Doctor { fix } => commands::doctor::execute(root, fix, formatter),
    }
}

/// Installs the stderr log subscriber.
///
/// The level comes from `--log-level`, then `REQDESK_LOG_LEVEL` (already
/// folded into the loaded config), then the config file, then `warn`.
fn init_tracing(flag: Option<&str>, configured: Option<&str>) {
    let level = flag
        .or(configured)
        .and_then(|value| value.parse::<Level>().ok())
        .or_else(|| {
            std::env::var("REQDESK_LOG_LEVEL")
                .ok()
                .and_then(|value| value.parse::<Level>().ok())
        })
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn to_app_error(error: anyhow::Error) -> AppError {
    match error.downcast::<AppError>() {
        Ok(app) => app,
        Err(error) => match error.downcast::<reqdesk_core::Error>() {
            Ok(core) => AppError::Core(core),
            Err(error) => match error.downcast::<std::io::Error>() {
                Ok(io) => AppError::Io(io),
                Err(other) => AppError::InvalidInput(format!("{:#}", other)),
            },
        },
    }
}
