mod render;

use anyhow::{Context, Result, bail};
use clap::Parser;
use gapfill_config::Config;
use gapfill_engine::io;
use std::path::{Path, PathBuf};
use std::process;

/// Show fill-in-the-gap exercise files as plain text.
#[derive(Debug, Parser)]
#[command(name = "gapfill", version)]
struct Cli {
    /// Exercise file or directory of exercise files. Defaults to the
    /// configured exercises path.
    path: Option<PathBuf>,

    /// Print the parsed document as JSON instead of the quiz
    #[arg(long)]
    dump: bool,

    /// Fill every gap with its answer and show the resulting score
    #[arg(long, conflicts_with = "dump")]
    answers: bool,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

/// Returns `false` if any exercise file failed to load.
fn run(cli: &Cli) -> Result<bool> {
    let path = match &cli.path {
        Some(path) if !path.is_dir() => {
            show_file(cli, path)?;
            return Ok(true);
        }
        Some(path) => path.clone(),
        None => configured_exercises_dir()?,
    };

    let files = io::scan_exercise_files(&path)?;
    if files.is_empty() {
        log::warn!("no .{} files in {}", io::EXERCISE_EXTENSION, path.display());
    }

    let mut all_ok = true;
    for file in files {
        println!("== {}", file.display());
        if let Err(e) = show_file(cli, &file) {
            eprintln!("Error: {e:#}");
            all_ok = false;
        }
    }
    Ok(all_ok)
}

/// The configured `exercises_path`, which must be a directory.
fn configured_exercises_dir() -> Result<PathBuf> {
    let config_path = Config::config_path();
    let Some(config) = Config::load().context("Failed to load config file")? else {
        bail!(
            "No exercises path provided and no config file found.\n\
             Pass a path, or create {} containing: exercises_path = \"...\"",
            config_path.display()
        );
    };

    io::validate_exercises_dir(&config.exercises_path)
        .with_context(|| format!("exercises_path in {}", config_path.display()))?;
    Ok(config.exercises_path)
}

fn show_file(cli: &Cli, path: &Path) -> Result<()> {
    if cli.dump {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let document = gapfill_syntax::parse(&source)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    let mut loaded = io::load_file(path)?;
    for warning in &loaded.warnings {
        eprintln!("Warning: {warning}");
    }
    if cli.answers {
        render::fill_answers(&mut loaded.quiz);
    }

    let stdout = std::io::stdout();
    render::write_quiz(&loaded.quiz, &mut stdout.lock())?;
    Ok(())
}
