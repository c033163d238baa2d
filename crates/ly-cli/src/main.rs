//! CLI frontend for Liu Yao (六爻) readings.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ly",
    about = "Liu Yao (六爻): cast, chart and read hexagrams",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Day and month a reading is taken under.
#[derive(Args)]
struct When {
    /// Day stem-branch, e.g. 甲子 (default: from --date, else today)
    #[arg(long)]
    day: Option<String>,

    /// Gregorian date to take the day pillar from, e.g. 2024-03-15
    #[arg(long)]
    date: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Toss three coins per line and chart the result
    Cast {
        /// Six explicit tosses, bottom first, e.g. 110,111,000,...
        #[arg(short, long, value_delimiter = ',')]
        lines: Vec<String>,

        /// RNG seed for reproducible tosses
        #[arg(short, long)]
        seed: Option<u64>,

        #[command(flatten)]
        when: When,
    },

    /// Annotate a hexagram with stem-branches, kinships and spirits
    Chart {
        /// Six digits bottom first (e.g. 010001) or a name (e.g. 山水蒙)
        hexagram: String,

        /// Moving lines, 1-based, e.g. 1,4
        #[arg(short, long, value_delimiter = ',')]
        moving: Vec<usize>,

        #[command(flatten)]
        when: When,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run a full reading
    Analyze {
        /// Six digits bottom first (e.g. 010001) or a name (e.g. 山水蒙)
        hexagram: String,

        /// Moving lines, 1-based, e.g. 1,4
        #[arg(short, long, value_delimiter = ',')]
        moving: Vec<usize>,

        /// Question category: career, wealth, marriage, study, safety,
        /// health, siblings, parents, children, general
        #[arg(short, long, default_value = "general")]
        category: String,

        /// Querent gender (only used for marriage)
        #[arg(short, long)]
        gender: Option<String>,

        /// Month branch, e.g. 寅
        #[arg(long)]
        month: String,

        #[command(flatten)]
        when: When,

        /// Commentary corpus (Markdown) to decorate the reading with
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Scores and judgment only, no per-line reports
        #[arg(long)]
        brief: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Look up hexagram and line texts in a commentary corpus
    Text {
        /// Hexagram name, e.g. 坤为地
        name: String,

        /// Classical line name, e.g. 初六
        line: Option<String>,

        /// Commentary corpus (Markdown)
        #[arg(long)]
        corpus: PathBuf,
    },

    /// Show the star (神煞) table for a day and month
    Stars {
        /// Month branch, e.g. 寅
        #[arg(long)]
        month: String,

        #[command(flatten)]
        when: When,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Cast { lines, seed, when } => commands::cast::run(&lines, seed, &when),
        Commands::Chart {
            hexagram,
            moving,
            when,
            json,
        } => commands::chart::run(&hexagram, &moving, &when, json),
        Commands::Analyze {
            hexagram,
            moving,
            category,
            gender,
            month,
            when,
            corpus,
            brief,
            json,
        } => commands::analyze::run(&commands::analyze::Request {
            hexagram: &hexagram,
            moving: &moving,
            category: &category,
            gender: gender.as_deref(),
            month: &month,
            when: &when,
            corpus: corpus.as_deref(),
            brief,
            json,
        }),
        Commands::Text { name, line, corpus } => {
            commands::text::run(&corpus, &name, line.as_deref())
        }
        Commands::Stars { month, when } => commands::stars::run(&month, &when),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
