//! Subcommand handlers

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Subcommand};
use momentum_domain::{
    EmployeeKind, NewAssignment, RemovalTarget, ResponsibleActorChange, ResponsibleActorsUpdate,
};
use momentum_infra::{config, MomentumClientManager};
use serde::Serialize;
use tracing::info;

#[derive(Subcommand)]
pub enum ActorsCommand {
    /// Add a caseworker or private contact
    Add {
        citizen_id: String,
        actor_id: String,
        /// Responsibility name, e.g. "Jobkonsulent" or "Bisidder"
        responsibility: String,
        /// Add as the primary caseworker
        #[arg(long)]
        primary: bool,
        /// Force the private-contact bucket
        #[arg(long)]
        private: bool,
        /// Print the reconciled payload without sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove entries by responsibility name or actor id
    Remove {
        citizen_id: String,
        #[command(flatten)]
        target: RemovalArgs,
        /// Print the reconciled payload without sending it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct RemovalArgs {
    /// Responsibility name to drop
    #[arg(long)]
    name: Option<String>,
    /// Actor id to drop
    #[arg(long)]
    actor: Option<String>,
}

impl RemovalArgs {
    fn into_target(self) -> anyhow::Result<RemovalTarget> {
        match (self.name, self.actor) {
            (Some(name), None) => Ok(RemovalTarget::ResponsibilityName(name)),
            (None, Some(actor)) => Ok(RemovalTarget::ActorId(actor)),
            _ => bail!("pass exactly one of --name or --actor"),
        }
    }
}

pub fn connect(config_path: Option<PathBuf>) -> anyhow::Result<MomentumClientManager> {
    let config = match config_path {
        Some(path) => config::load_from_file(Some(path)),
        None => config::load(),
    }
    .context("failed to load Momentum configuration")?;

    MomentumClientManager::from_config(&config).context("failed to build Momentum client")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

pub async fn citizen(manager: &MomentumClientManager, cpr: &str) -> anyhow::Result<()> {
    match manager.citizens().find_by_cpr(cpr).await? {
        Some(citizen) => print_json(&citizen),
        None => bail!("no citizen found for the given CPR number"),
    }
}

pub async fn tasks(manager: &MomentumClientManager, citizen_id: &str) -> anyhow::Result<()> {
    let tasks = manager.tasks().for_citizen(citizen_id).await?;
    info!(count = tasks.len(), "fetched tasks");
    print_json(&tasks)
}

pub async fn units(manager: &MomentumClientManager, term: &str) -> anyhow::Result<()> {
    let units = manager.companies().search_production_units(Vec::new(), term).await?;
    info!(count = units.len(), "fetched production units");
    print_json(&units)
}

pub async fn tag(manager: &MomentumClientManager, title: &str) -> anyhow::Result<()> {
    match manager.tags().tag_by_title(title).await? {
        Some(tag) => print_json(&tag),
        None => bail!("no tag titled '{title}'"),
    }
}

pub async fn actors(manager: &MomentumClientManager, action: ActorsCommand) -> anyhow::Result<()> {
    let (citizen_id, change, dry_run) = match action {
        ActorsCommand::Add { citizen_id, actor_id, responsibility, primary, private, dry_run } => {
            let mut assignment = NewAssignment::named(actor_id, responsibility);
            if primary {
                assignment = assignment.with_kind(EmployeeKind::Primary);
            }
            if private {
                assignment = assignment.with_private_contact(true);
            }
            (citizen_id, ResponsibleActorChange::Add(assignment), dry_run)
        }
        ActorsCommand::Remove { citizen_id, target, dry_run } => {
            (citizen_id, ResponsibleActorChange::Remove(target.into_target()?), dry_run)
        }
    };

    let citizens = manager.citizens();
    let update: ResponsibleActorsUpdate = if dry_run {
        citizens.preview_responsible_actors(&citizen_id, &change).await?
    } else {
        citizens
            .update_responsible_actors(&citizen_id, &change)
            .await?
            .with_context(|| format!("citizen {citizen_id} not found"))?
    };
    print_json(&update)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::{Cli, Commands};

    #[test]
    fn parses_lookup_subcommands() {
        let cli = Cli::parse_from(["momentum", "citizen", "010190-1234"]);
        assert!(matches!(cli.command, Commands::Citizen { ref cpr } if cpr == "010190-1234"));

        let cli = Cli::parse_from(["momentum", "tasks", "c-1"]);
        assert!(matches!(cli.command, Commands::Tasks { ref citizen_id } if citizen_id == "c-1"));

        let cli = Cli::parse_from(["momentum", "tag", "Emnebank"]);
        assert!(matches!(cli.command, Commands::Tag { ref title } if title == "Emnebank"));
    }

    #[test]
    fn units_term_defaults_to_wildcard() {
        let cli = Cli::parse_from(["momentum", "units"]);
        assert!(matches!(cli.command, Commands::Units { ref term } if term == "*"));

        let cli = Cli::parse_from(["momentum", "units", "--term", "Aarhus"]);
        assert!(matches!(cli.command, Commands::Units { ref term } if term == "Aarhus"));
    }

    #[test]
    fn global_config_flag_follows_subcommand() {
        let cli = Cli::parse_from(["momentum", "tasks", "c-1", "--config", "momentum.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("momentum.toml")));
    }

    #[test]
    fn parses_actor_removal_by_name() {
        let cli = Cli::parse_from(["momentum", "actors", "remove", "c-1", "--name", "Jobkonsulent"]);
        let Commands::Actors { action: ActorsCommand::Remove { citizen_id, target, dry_run } } =
            cli.command
        else {
            panic!("expected actors remove");
        };
        assert_eq!(citizen_id, "c-1");
        assert!(!dry_run);
        assert_eq!(
            target.into_target().unwrap(),
            RemovalTarget::ResponsibilityName("Jobkonsulent".into())
        );
    }

    #[test]
    fn removal_requires_exactly_one_key() {
        assert!(Cli::try_parse_from(["momentum", "actors", "remove", "c-1"]).is_err());
        assert!(Cli::try_parse_from([
            "momentum", "actors", "remove", "c-1", "--name", "x", "--actor", "y"
        ])
        .is_err());
    }

    #[test]
    fn parses_primary_add_with_global_flags() {
        let cli = Cli::parse_from([
            "momentum",
            "actors",
            "add",
            "c-1",
            "L",
            "Leder",
            "--primary",
            "--dry-run",
            "--json-logs",
        ]);
        assert!(cli.json_logs);
        assert!(matches!(
            cli.command,
            Commands::Actors { action: ActorsCommand::Add { primary: true, private: false, dry_run: true, .. } }
        ));
    }
}
