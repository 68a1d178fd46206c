use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use h2h_backend::config::AppConfig;
use h2h_backend::fs_store::FsStore;
use h2h_backend::h2h;

fn main() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let data_dir = match parse_data_dir_arg(&args) {
        Some(dir) => dir,
        None => AppConfig::from_env()?.data_dir,
    };

    let positional = positional_args(&args);
    let [league_id, home, away] = positional.as_slice() else {
        return Err(anyhow!(
            "usage: h2h_report [--data-dir <dir>] <league_id> <home> <away>"
        ));
    };

    let store = FsStore::new(data_dir);
    let analysis = h2h::analyze_h2h(&store, league_id, home, away)
        .with_context(|| format!("h2h {home} vs {away} in {league_id}"))?;
    let json = serde_json::to_string_pretty(&analysis).context("serialize h2h analysis")?;
    println!("{json}");
    Ok(())
}

fn parse_data_dir_arg(args: &[String]) -> Option<PathBuf> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--data-dir=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--data-dir" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}

fn positional_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--data-dir" {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        out.push(arg.clone());
    }
    out
}
