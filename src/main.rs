use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sweep::cleaner::{self, prompt, Answer, Config, ConfigSource, Deleter, DirWalker, Stats};

#[derive(Parser)]
#[command(name = "sweep")]
#[command(about = "Finds build artifacts and dependency folders and deletes them one by one", long_about = None)]
struct Cli {
    /// Directory to sweep (defaults to the current directory)
    path: Option<PathBuf>,

    /// Rules file with [[sweep]] tables (overrides .sweep.toml and the user config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Entry name to skip at every level, on top of .git, .hg and .svn (repeatable)
    #[arg(short, long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,

    /// Go through the prompts but never delete anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Delete every candidate without asking
    #[arg(short, long, conflicts_with = "list")]
    yes: bool,

    /// Only print candidates and their sizes
    #[arg(short, long)]
    list: bool,
}

fn main() -> ExitCode {
    // RUST_LOG controls diagnostics, stdout stays for the prompts
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), render_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = match cli.path {
        Some(path) => path,
        None => std::env::current_dir().context("could not get current working directory")?,
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("could not resolve {}", root.display()))?;

    println!("{}", root.display());

    let config = Config::load(cli.config.as_deref(), &root)?;
    match &config.source {
        ConfigSource::File(path) => debug!(path = %path.display(), rules = config.predicates.len(), "using config file"),
        ConfigSource::Default => debug!(rules = config.predicates.len(), "using built-in rules"),
    }

    let mut ignore = cleaner::default_ignore();
    ignore.extend(cli.ignore);

    let walker = DirWalker::new(root.clone(), config.predicates, ignore);
    let deleter = Deleter::new(cli.dry_run);
    let mut stats = Stats::new().with_dry_run(cli.dry_run);

    let mut input = io::stdin().lock();
    let mut output = io::stdout();

    for candidate in walker {
        let candidate = candidate?;
        stats.record_candidate();
        let size = cleaner::estimate_size(&candidate);

        if cli.list {
            println!("{:>12}  {}", cleaner::format_size(size), candidate.display());
            continue;
        }

        let answer = if cli.yes {
            Answer::Yes
        } else {
            let question = prompt::delete_question(&candidate, size);
            prompt::ask(&mut input, &mut output, &question).context("could not read answer")?
        };

        match answer {
            Answer::Yes => {
                deleter.delete(&candidate)?;
                stats.record_deleted(size);
                let verb = if deleter.is_dry_run() { "would delete" } else { "deleted" };
                println!("{} {}", verb.green(), candidate.display());
            }
            Answer::No => stats.record_skipped(),
            Answer::Quit => break,
        }
    }

    println!("{}", stats.to_string().as_str().dimmed());
    Ok(())
}

/// The error followed by each underlying cause on its own line.
fn render_error(err: &anyhow::Error) -> String {
    let mut rendered = err.to_string();
    for cause in err.chain().skip(1) {
        rendered.push_str(&format!("\n  caused by: {}", cause));
    }
    rendered
}
