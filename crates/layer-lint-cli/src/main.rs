//! layer-lint CLI.
//!
//! Usage:
//! ```bash
//! layer-lint init [--force]
//! layer-lint reset
//! layer-lint path
//! layer-lint classify --name UserController --package com.example.web
//! layer-lint check-call CONTROLLER DAO
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use layer_lint_core::RuleStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

/// Rule-driven layer classification and call validation
#[derive(Parser)]
#[command(name = "layer-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a rules file (default: the per-user layer-rules.json)
    #[arg(short, long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the external rules file from the bundled default if absent
    Init {
        /// Overwrite an existing rules file
        #[arg(long)]
        force: bool,
    },

    /// Overwrite the external rules file with the bundled default
    Reset,

    /// Print the external rules file path and whether it exists
    Path,

    /// Classify a class descriptor into a layer
    Classify {
        /// Simple class name (e.g., UserController)
        #[arg(long)]
        name: String,

        /// Enclosing package name (e.g., com.example.web)
        #[arg(long, default_value = "")]
        package: String,

        /// Fully qualified name (default: package.name)
        #[arg(long)]
        qualified: Option<String>,

        /// Annotation qualified name (repeatable)
        #[arg(long = "annotation")]
        annotations: Vec<String>,
    },

    /// Validate a call edge between two layers
    CheckCall {
        /// Caller layer (e.g., CONTROLLER)
        from: String,

        /// Callee layer (e.g., DAO)
        to: String,

        /// Caller class name, used in the violation message
        #[arg(long, default_value = "CallerClass")]
        from_class: String,

        /// Callee class name, used in the violation message
        #[arg(long, default_value = "CalleeClass")]
        to_class: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let store = Arc::new(match cli.rules {
        Some(path) => RuleStore::new(path),
        None => RuleStore::from_default_location(),
    });
    tracing::debug!(
        "using rules file {}",
        store.external_config_path().display()
    );

    match cli.command {
        Commands::Init { force } => commands::init::run(&store, force),
        Commands::Reset => commands::reset::run(&store),
        Commands::Path => {
            commands::path::run(&store);
            Ok(())
        }
        Commands::Classify {
            name,
            package,
            qualified,
            annotations,
        } => {
            commands::classify::run(store, &name, &package, qualified, annotations);
            Ok(())
        }
        Commands::CheckCall {
            from,
            to,
            from_class,
            to_class,
        } => {
            let valid = commands::check_call::run(store, &from, &to, &from_class, &to_class)?;
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
