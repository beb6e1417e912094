// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// restamp: scan and rewrite strings shown in PDF content streams.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::Mode;

#[derive(Parser)]
#[command(
    name = "restamp",
    version,
    about = "Scan and rewrite strings shown in PDF content streams"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which pages show a matching string
    Scan {
        /// Path to the PDF to scan
        input_file: PathBuf,

        /// The string (or pattern) to look for
        #[arg(short, long)]
        find: String,

        /// How the pattern is compared against shown strings
        #[arg(short, long, value_enum, default_value = "equals")]
        mode: Mode,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Replace a shown string throughout the document
    Replace {
        /// Path to the PDF to rewrite
        input_file: PathBuf,

        /// The string (or pattern) to look for
        #[arg(short, long)]
        find: String,

        /// The fixed replacement text
        #[arg(short, long)]
        replace: String,

        /// How the pattern is compared against shown strings
        #[arg(short, long, value_enum, default_value = "equals")]
        mode: Mode,

        /// Stop rewriting each page after its first match
        #[arg(long)]
        stop_after_first: bool,

        /// Where to write the rewritten PDF
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: PathBuf,
    },
    /// Apply a JSON rule file of replacements
    Apply {
        /// Path to the PDF to rewrite
        input_file: PathBuf,

        /// JSON rule file: an array of {mode, find, replace} objects
        #[arg(short = 'R', long = "rules", value_name = "FILE")]
        rules: PathBuf,

        /// Where to write the rewritten PDF
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: PathBuf,
    },
    /// Show page count and document metadata
    Info {
        /// Path to the PDF to inspect
        input_file: PathBuf,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Drop volatile metadata entries (dates, producer)
    Scrub {
        /// Path to the PDF to scrub
        input_file: PathBuf,

        /// Where to write the scrubbed PDF
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    tracing::debug!("restamp starting");

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            input_file,
            find,
            mode,
            output,
        } => commands::scan::run(input_file, &find, mode, &output),
        Commands::Replace {
            input_file,
            find,
            replace,
            mode,
            stop_after_first,
            out,
        } => commands::replace::run(input_file, &find, &replace, mode, stop_after_first, &out),
        Commands::Apply {
            input_file,
            rules,
            out,
        } => commands::apply::run(input_file, &rules, &out),
        Commands::Info { input_file, output } => commands::info::run(input_file, &output),
        Commands::Scrub { input_file, out } => commands::scrub::run(input_file, &out),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
