//! Rolegate CLI
//!
//! Inspect the role table, run permission checks, and preview activity icons
//! and development proxy routing.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rolegate_config::{ConfigLoader, RolegateConfig};
use rolegate_dashboard::{DevProxy, icon_for};
use rolegate_rbac::{ModuleActionGrant, PermissionResolver};
use rolegate_types::{Action, PermissionId};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "rolegate")]
#[command(version, about = "Rolegate permission inspection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project directory holding rolegate.toml
    #[arg(short, long, global = true)]
    project_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the role table as JSON
    Table {
        /// Only print this role's permissions
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Check whether a role may perform an action on a module
    Check {
        #[arg(short, long)]
        role: String,

        #[arg(short, long)]
        module: String,

        /// Action to check (any case)
        #[arg(short, long, default_value = "read")]
        action: Action,
    },

    /// Check module/action grants, e.g. --grant ORDER=read,update
    CheckGrants {
        #[arg(short, long = "grant", value_parser = parse_grant)]
        grants: Vec<ModuleActionGrant>,

        #[arg(short, long)]
        module: String,

        /// Action to check; defaults to read
        #[arg(short, long)]
        action: Option<String>,
    },

    /// Check flat permission identifiers
    CheckId {
        #[arg(short, long = "granted")]
        granted: Vec<String>,

        /// Required identifier; omit when nothing is required
        #[arg(short, long)]
        required: Option<String>,
    },

    /// Show the icon for an activity type
    Icon { activity_type: String },

    /// Show where the development proxy sends a request
    Route {
        method: String,
        path: String,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(dir) = &cli.project_dir {
        loader = loader.with_project_dir(dir);
    }
    let config = loader.load().context("Failed to load configuration")?;

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config
            .logging
            .level
            .parse()
            .context("Invalid logging level")?
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    debug!(project = %config.project.name, "Configuration loaded");

    match cli.command {
        Commands::Table { role } => print_table(&config, role.as_deref()),
        Commands::Check {
            role,
            module,
            action,
        } => {
            let resolver = resolver(&config)?;
            let outcome = resolver.enforce_role(&role, &module, action);
            Ok(report(outcome.map_err(anyhow::Error::from)))
        }
        Commands::CheckGrants {
            grants,
            module,
            action,
        } => {
            let resolver = resolver(&config)?;
            let allowed = resolver.has_permission_by_module(Some(&grants), &module, action.as_deref());
            Ok(verdict(allowed))
        }
        Commands::CheckId { granted, required } => {
            let resolver = resolver(&config)?;
            let granted: Vec<PermissionId> = granted.into_iter().map(PermissionId::from).collect();
            let required = required.map(PermissionId::from);
            let allowed = resolver.has_permission_by_identifier(&granted, required.as_ref());
            Ok(verdict(allowed))
        }
        Commands::Icon { activity_type } => {
            println!("{}", icon_for(&activity_type).name());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Route { method, path } => {
            let proxy = DevProxy::from_config(&config.proxy);
            match proxy.forward(&method, &path) {
                Some(target) => {
                    println!("{} -> {} [{}]", target.path, target.url, target.label);
                    if let Some(host) = &target.host_header {
                        println!("Host: {host}");
                    }
                }
                None => println!("{path} is served locally"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn resolver(config: &RolegateConfig) -> Result<PermissionResolver> {
    let table = config
        .rbac
        .role_table()
        .context("Failed to load role table")?;
    let resolver = PermissionResolver::new(Arc::new(table));
    Ok(if config.rbac.audit {
        resolver
    } else {
        resolver.without_audit()
    })
}

fn print_table(config: &RolegateConfig, role: Option<&str>) -> Result<ExitCode> {
    let table = config
        .rbac
        .role_table()
        .context("Failed to load role table")?;
    let json = match role {
        Some(role) => serde_json::to_string_pretty(table.permissions_for(role))?,
        None => serde_json::to_string_pretty(&table)?,
    };
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}

fn report(outcome: Result<()>) -> ExitCode {
    match outcome {
        Ok(()) => verdict(true),
        Err(err) => {
            eprintln!("{err}");
            verdict(false)
        }
    }
}

fn verdict(allowed: bool) -> ExitCode {
    if allowed {
        println!("allowed");
        ExitCode::SUCCESS
    } else {
        println!("denied");
        ExitCode::FAILURE
    }
}

/// Parses `MODULE=action,action` into a grant.
fn parse_grant(s: &str) -> std::result::Result<ModuleActionGrant, String> {
    let (module, actions) = s
        .split_once('=')
        .ok_or_else(|| format!("expected MODULE=action[,action...], got {s:?}"))?;
    if module.is_empty() {
        return Err(format!("missing module in {s:?}"));
    }
    let actions = actions.split(',').filter(|a| !a.is_empty());
    ModuleActionGrant::try_from_strs(module, actions).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_grant() {
        let grant = parse_grant("ORDER=read,UPDATE").unwrap();
        assert!(grant.allows("ORDER", Action::Read));
        assert!(grant.allows("ORDER", Action::Update));
        assert!(!grant.allows("ORDER", Action::Delete));

        let empty = parse_grant("USER=").unwrap();
        assert!(empty.actions.is_empty());
    }

    #[test]
    fn test_parse_grant_errors() {
        assert!(parse_grant("ORDER").is_err());
        assert!(parse_grant("=read").is_err());
        assert!(parse_grant("ORDER=read,approve").unwrap_err().contains("approve"));
    }

    #[test]
    fn test_check_parses_action_any_case() {
        let cli = Cli::try_parse_from([
            "rolegate", "check", "--role", "vendor", "--module", "USER", "--action", "Read",
        ])
        .unwrap();
        match cli.command {
            Commands::Check { action, .. } => assert_eq!(action, Action::Read),
            _ => panic!("Expected check command"),
        }
    }

    #[test]
    fn test_check_id_without_requirement() {
        let cli = Cli::try_parse_from(["rolegate", "check-id", "--granted", "USER_READ"]).unwrap();
        match cli.command {
            Commands::CheckId { granted, required } => {
                assert_eq!(granted, ["USER_READ"]);
                assert_eq!(required, None);
            }
            _ => panic!("Expected check-id command"),
        }
    }
}
