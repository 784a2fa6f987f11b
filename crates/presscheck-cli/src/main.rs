// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Presscheck — Newsprint print-readiness checker
//
// Entry point. Initialises logging, parses arguments, loads the policy
// thresholds, and prints one report per file as text or JSON.

mod preview;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;

use presscheck_analyzer::{analyze_batch, analyze_path};
use presscheck_core::human_errors::humanize_error;
use presscheck_core::{AnalysisOutcome, PolicyConfig, Result};

use preview::Preview;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();

    let config = match load_config(matches.get_one::<PathBuf>("config")) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "policy configuration rejected");
            eprint!("{}", render::failure("configuration", &humanize_error(&e)));
            return ExitCode::FAILURE;
        }
    };

    if matches.get_flag("print-config") {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "could not serialize configuration");
                return ExitCode::FAILURE;
            }
        }
        if !matches.contains_id("files") {
            return ExitCode::SUCCESS;
        }
    }

    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();

    let all_ok = if matches.get_flag("json") {
        run_json(&files, &config, matches.get_flag("preview"))
    } else {
        run_text(&files, &config, matches.get_flag("preview"))
    };

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_cli() -> Command {
    Command::new("presscheck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check PDF, JPEG, TIFF and EPS files for newsprint print readiness")
        .long_about(
            "Reads each file's own metadata (page boxes, density tags, colour model, \
             ICC profile, font sizes) and reports whether it is ready for newsprint, \
             with the issues found and how to fix them.",
        )
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .help("Files to check (.pdf, .jpg, .jpeg, .tif, .tiff, .eps)")
                .value_parser(clap::value_parser!(PathBuf))
                .num_args(1..)
                .required_unless_present("print-config"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print one JSON outcome per file instead of text reports")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("JSON file with policy thresholds (missing keys use the defaults)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .help("Print the effective policy thresholds as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("preview")
                .long("preview")
                .help("Attach a base64 preview payload for JPEG and PDF files")
                .action(ArgAction::SetTrue),
        )
}

fn load_config(path: Option<&PathBuf>) -> Result<PolicyConfig> {
    match path {
        Some(path) => {
            let config = PolicyConfig::from_file(path)?;
            tracing::info!(path = %path.display(), "policy configuration loaded");
            Ok(config)
        }
        None => Ok(PolicyConfig::default()),
    }
}

// -- Output -------------------------------------------------------------------

/// One element of the `--json` array.
#[derive(Serialize)]
struct JsonEntry<'a> {
    path: String,
    #[serde(flatten)]
    outcome: &'a AnalysisOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<Preview>,
}

fn run_json(files: &[PathBuf], config: &PolicyConfig, with_preview: bool) -> bool {
    let items = analyze_batch(files, config);
    let entries: Vec<JsonEntry<'_>> = items
        .iter()
        .map(|item| JsonEntry {
            path: item.path.display().to_string(),
            outcome: &item.outcome,
            preview: (with_preview && item.outcome.success).then(|| preview_or_none(&item.path)),
        })
        .collect();

    match serde_json::to_string_pretty(&entries) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "could not serialize results");
            return false;
        }
    }
    items.iter().all(|item| item.outcome.success)
}

fn run_text(files: &[PathBuf], config: &PolicyConfig, with_preview: bool) -> bool {
    let mut all_ok = true;
    for (i, path) in files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match analyze_path(path, config) {
            Ok(report) => {
                print!("{}", render::report(&report));
                if with_preview {
                    let preview = preview_or_none(path);
                    if let Some(data) = preview.data {
                        println!("Preview:      {data}");
                    }
                }
            }
            Err(e) => {
                all_ok = false;
                print!("{}", render::failure(&path.display().to_string(), &humanize_error(&e)));
            }
        }
    }
    all_ok
}

fn preview_or_none(path: &Path) -> Preview {
    preview::load(path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "preview unavailable");
        Preview::none()
    })
}
