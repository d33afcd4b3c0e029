//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `deskmate_core` linkage with a deterministic ping/version check.
//! - Run the text analyzers over a local file for quick manual checks.
//! - Inspect the task collection stored in a SQLite key-value database.
//!
//! Usage:
//! - `deskmate_cli`
//! - `deskmate_cli summarize <file> [max_sentences]`
//! - `deskmate_cli sentiment <file>`
//! - `deskmate_cli tasks <db_path>`
//!
//! Environment:
//! - `DESKMATE_CONFIG`: JSON config file; defaults apply when unset.
//! - `DESKMATE_LOG_DIR`: enables rolling file logs in this directory.

use deskmate_core::db::open_db;
use deskmate_core::{
    analyze, init_logging, summarize, CoreConfig, Emotion, SqliteKeyValueStore, SystemClock,
    TaskStore, TimeRandomIdGenerator,
};
use std::process::ExitCode;

const CONFIG_ENV: &str = "DESKMATE_CONFIG";
const LOG_DIR_ENV: &str = "DESKMATE_LOG_DIR";
const USAGE: &str =
    "usage: deskmate_cli [summarize <file> [max_sentences] | sentiment <file> | tasks <db_path>]";

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let args = args.iter().map(String::as_str).collect::<Vec<_>>();

    let outcome = load_config().and_then(|config| run(&config, &args));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<CoreConfig, String> {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => CoreConfig::from_file(&path).map_err(|err| err.to_string())?,
        None => CoreConfig::default(),
    };
    if let Some(log_dir) = std::env::var_os(LOG_DIR_ENV) {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }
    Ok(config)
}

fn run(config: &CoreConfig, args: &[&str]) -> Result<(), String> {
    match args {
        [] => {
            println!("deskmate_core ping={}", deskmate_core::ping());
            println!("deskmate_core version={}", deskmate_core::core_version());
            Ok(())
        }
        ["summarize", path] => run_summarize(path, config.summary_max_sentences),
        ["summarize", path, budget] => match budget.parse::<usize>() {
            Ok(budget) => run_summarize(path, budget),
            Err(err) => Err(format!("invalid max_sentences `{budget}`: {err}")),
        },
        ["sentiment", path] => run_sentiment(path),
        ["tasks", db_path] => run_tasks(db_path, &config.tasks_key),
        _ => Err(USAGE.to_string()),
    }
}

fn read_text(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|err| format!("failed to read `{path}`: {err}"))
}

fn run_summarize(path: &str, budget: usize) -> Result<(), String> {
    let result = summarize(&read_text(path)?, budget);
    println!("{}", result.to_report());
    Ok(())
}

fn run_sentiment(path: &str) -> Result<(), String> {
    let result = analyze(&read_text(path)?);
    println!("label={}", result.label.as_str());
    println!("score={:.4}", result.score);
    println!("confidence={:.2}", result.confidence);
    for emotion in Emotion::ALL {
        println!("{}={:.2}", emotion.as_str(), result.emotions.get(emotion));
    }
    Ok(())
}

fn run_tasks(db_path: &str, key: &str) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| err.to_string())?;
    let store = TaskStore::with_key(
        SqliteKeyValueStore::new(&conn),
        TimeRandomIdGenerator,
        SystemClock,
        key,
    );

    let stats = store.stats();
    println!(
        "total={} completed={} pending={}",
        stats.total, stats.completed, stats.pending
    );
    for task in store.tasks() {
        println!(
            "[{}] {} ({}) {}",
            if task.completed { "x" } else { " " },
            task.id,
            task.priority.as_str(),
            task.title
        );
    }
    Ok(())
}
