//! hostadm command line front end.
//!
//! Drives the administration pages from a terminal: list pages, show a
//! page's current state, or apply KEY=VALUE changes through the full
//! validate and merge cycle.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use hostadm_app::registry::standard_pages;
use hostadm_app::{input, render};
use hostadm_core::logging::{init_tracing, AuditLog, LogLevel};
use hostadm_core::plugin::{DryRunSwitch, PageSession};
use hostadm_core::store::{SettingsStore, SystemPasswd};

/// Administer this host from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: Options,
}

#[derive(Parser, Debug, Clone)]
struct Options {
    /// Path to the settings store
    #[arg(long, global = true, default_value = "/etc/hostadm/settings.toml")]
    config: PathBuf,

    /// Preview changes without applying anything
    #[arg(long, global = true, default_value = "false")]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    /// Directory for log files and the audit trail
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the administration pages
    List,

    /// Show the current state of a page
    Show {
        /// Page name, as printed by `list`
        page: String,

        /// Dump the page model as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Apply KEY=VALUE changes to a page
    Apply {
        /// Page name, as printed by `list`
        page: String,

        /// Field assignments, e.g. ssh.pwauth=true
        #[arg(required = true, value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.options.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let _guard = init_tracing(level, args.options.log_dir.as_deref());

    run(args)
}

fn run(args: Args) -> Result<()> {
    let options = &args.options;
    debug!(config = %options.config.display(), dry_run = options.dry_run, "starting");

    let dry_run = DryRunSwitch::new(options.dry_run);
    let mut registry = standard_pages(&options.config, Arc::new(SystemPasswd), dry_run.clone());

    match &args.command {
        Commands::List => {
            for page in registry.pages() {
                println!("{}", page.name());
            }
            Ok(())
        }

        Commands::Show { page, json } => {
            let plugin = registry
                .remove(page)
                .ok_or_else(|| anyhow!("no such page: '{}'", page))?;
            let session = PageSession::open(plugin, dry_run)
                .with_context(|| format!("failed to open page '{}'", page))?;

            if *json {
                println!("{}", serde_json::to_string_pretty(session.model())?);
            } else {
                print!(
                    "{}",
                    render::render_page(session.plugin().name(), session.layout(), &session.tracker())
                );
            }
            Ok(())
        }

        Commands::Apply { page, set } => {
            // First run against a live system: seed the store so the
            // operator gets a commented settings file to inspect.
            if !options.dry_run {
                SettingsStore::new(&options.config)
                    .load_or_create()
                    .with_context(|| {
                        format!("cannot use settings store {}", options.config.display())
                    })?;
            }

            let audit = options
                .log_dir
                .as_ref()
                .map(|dir| AuditLog::open(dir, None))
                .transpose()
                .context("failed to open audit trail")?;

            let plugin = registry
                .remove(page)
                .ok_or_else(|| anyhow!("no such page: '{}'", page))?;
            let mut session = PageSession::open(plugin, dry_run)
                .with_context(|| format!("failed to open page '{}'", page))?;

            let changes = input::parse_assignments(session.layout(), set)?;

            if let Err(err) = session.update(changes) {
                if let Some(audit) = &audit {
                    audit.rejected(page, &err.to_string());
                }
                return Err(err).context("changes rejected");
            }

            match session.merge() {
                Ok(summary) => {
                    if let Some(audit) = &audit {
                        audit.applied(&summary.page, &summary.changed_keys, summary.dry_run);
                    }
                    if summary.changed_keys.is_empty() {
                        println!("Nothing to change.");
                    } else if summary.dry_run {
                        println!("Dry run, would apply: {}", summary.changed_keys.join(", "));
                    } else {
                        println!("Applied: {}", summary.changed_keys.join(", "));
                    }
                    Ok(())
                }
                Err(err) => {
                    if let Some(audit) = &audit {
                        audit.rejected(page, &err.to_string());
                    }
                    Err(err).context("merge failed")
                }
            }
        }
    }
}
