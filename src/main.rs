//! college-connect: terminal client for the College-Connect placement dashboard

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser, Subcommand};
use owo_colors::OwoColorize;

use college_connect::api::HttpBackend;
use college_connect::config::Config;
use college_connect::logging::{init_logging, Verbosity};
use college_connect::theme::{Theme, ThemeContext};
use college_connect::ui::{self, Console};

mod commands;

#[derive(Parser)]
#[command(name = "college-connect")]
#[command(about = "Browse and manage college placement records", long_about = ui::banner())]
#[command(version)]
struct Cli {
    /// Path to a config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config and environment)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Color theme: light or dark
    #[arg(long, global = true)]
    theme: Option<String>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every record; optionally edit or delete one by id
    View {
        /// Sort by: college, company, role, ctc (default: college)
        #[arg(long, short)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Edit the row with this id
        #[arg(long, conflicts_with = "delete")]
        edit: Option<i64>,

        /// Delete the row with this id
        #[arg(long)]
        delete: Option<i64>,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// Search records by college, company, role or several criteria
    Search {
        /// Search term for college, company or role mode (prompts if omitted)
        term: Option<String>,

        /// Mode: college, company, role or multi (default: college)
        #[arg(long, short)]
        by: Option<String>,

        /// College name criterion (multi mode)
        #[arg(long)]
        college: Option<String>,

        /// Company name criterion (multi mode)
        #[arg(long)]
        company: Option<String>,

        /// Role criterion (multi mode)
        #[arg(long)]
        role: Option<String>,

        /// Sort by: college, company, role, ctc
        #[arg(long, short)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Add a placement record (prompts for missing required fields)
    Add {
        #[arg(long)]
        college: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        role: Option<String>,

        /// Cost-to-company, a positive decimal
        #[arg(long)]
        ctc: Option<String>,

        #[arg(long)]
        hr_name: Option<String>,

        /// LinkedIn id of the HR contact
        #[arg(long)]
        linkedin: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Contact phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Find a college's records, then update or delete one
    Edit {
        /// College name (prompts if omitted)
        college: Option<String>,

        /// Delete the chosen record instead of editing it
        #[arg(long)]
        delete: bool,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// Upload a CSV file of records
    Upload {
        /// CSV file to upload
        file: PathBuf,

        /// MIME type to declare (default: inferred from the extension)
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Show placement analytics
    Analytics {
        /// Size of the top lists (default: ui.top_n from config)
        #[arg(short = 'n', long)]
        top: Option<u32>,
    },

    /// Save all records as CSV
    Download {
        /// Output file (default: data_export_<timestamp>.csv)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print autocomplete suggestions for a field
    Suggest {
        /// Field: college, company or role
        field: String,

        /// Text typed so far
        term: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_from(cli.config)
        .context("Failed to load configuration")?
        .with_base_url(cli.api_url)?;
    if let Some(theme) = cli.theme {
        config.ui.theme = Theme::parse(&theme)
            .with_context(|| format!("Unknown theme '{theme}'. Use light or dark"))?;
    }
    tracing::debug!("Using backend at {}", config.base_url());

    let mut theme = ThemeContext::new(config.ui.theme);
    let console = Console::attach(&mut theme);
    let backend = HttpBackend::new(&config)?;

    let ctx = commands::Context {
        backend: &backend,
        config: &config,
        console: &console,
    };

    let result = match cli.command {
        Commands::View {
            sort,
            desc,
            edit,
            delete,
            yes,
        } => {
            let options = commands::view::ViewOptions {
                sort,
                desc,
                edit,
                delete,
                yes,
            };
            commands::view::execute(&ctx, options)
        }

        Commands::Search {
            term,
            by,
            college,
            company,
            role,
            sort,
            desc,
        } => {
            let options = commands::search::SearchOptions {
                by,
                term,
                college,
                company,
                role,
                sort,
                desc,
            };
            commands::search::execute(&ctx, options)
        }

        Commands::Add {
            college,
            company,
            role,
            ctc,
            hr_name,
            linkedin,
            email,
            phone,
        } => {
            let options = commands::add::AddOptions {
                college,
                company,
                role,
                ctc,
                hr_name,
                linkedin,
                email,
                phone,
            };
            commands::add::execute(&ctx, options)
        }

        Commands::Edit {
            college,
            delete,
            yes,
        } => {
            let options = commands::edit::EditOptions {
                college,
                delete,
                yes,
            };
            commands::edit::execute(&ctx, options)
        }

        Commands::Upload { file, content_type } => {
            let options = commands::upload::UploadOptions { file, content_type };
            commands::upload::execute(&ctx, options)
        }

        Commands::Analytics { top } => commands::analytics::execute(&ctx, top),

        Commands::Download { output } => commands::download::execute(&ctx, output),

        Commands::Suggest { field, term } => commands::suggest::execute(&ctx, &field, &term),
    };

    console.detach(&mut theme);
    result
}
