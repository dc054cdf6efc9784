//! Command handlers for CLI subcommands.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use teambrain_agent::OpenRouterAssistant;
use teambrain_api::types::FindAvailabilityRequest;
use teambrain_api::{ApiConfig, AppState, CorsPolicy, SyncMode};
use teambrain_core::{config, find_common_slots, Availability};
use teambrain_models::{MemberBusySet, MemberId, TeamId};
use teambrain_persistence::{AvailabilityStore, TeamStore};
use teambrain_relay::{FetchPolicy, RelayClient};

use crate::cli::{Commands, TeamCommand, UserCommand};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Input for the offline `slots` command: a search window plus every
/// member's busy times.
#[derive(Debug, Deserialize)]
pub struct SlotsInput {
    #[serde(flatten)]
    pub search: FindAvailabilityRequest,
    #[serde(default)]
    pub busy: MemberBusySet,
}

/// Execute a CLI command.
pub fn execute(command: Commands, state_dir: &Path) -> Result<()> {
    let store = TeamStore::new(config::data_dir(state_dir));

    match command {
        Commands::Serve {
            host,
            port,
            cors_origins,
            cached,
            timeout_secs,
        } => {
            let api_config = ApiConfig::new(host, port, CorsPolicy::from_origins(cors_origins));
            let mode = if cached { SyncMode::Cached } else { SyncMode::Live };
            let policy = FetchPolicy::default().with_timeout(Duration::from_secs(timeout_secs));
            cmd_serve(api_config, state_dir, mode, policy)
        }
        Commands::User(cmd) => {
            let availability = AvailabilityStore::new(config::data_dir(state_dir));
            cmd_user(&store, &availability, cmd)
        }
        Commands::Team(cmd) => cmd_team(&store, cmd),
        Commands::Slots { input, json } => cmd_slots(&input, json),
    }
}

fn cmd_serve(api_config: ApiConfig, state_dir: &Path, mode: SyncMode, policy: FetchPolicy) -> Result<()> {
    let relay = Arc::new(RelayClient::from_env()?);
    info!(relay_url = %relay.url(), ?mode, "Starting server");

    let mut state = AppState::open(
        api_config.clone(),
        &config::data_dir(state_dir),
        relay,
        mode,
        policy,
    );
    match OpenRouterAssistant::from_env() {
        Ok(assistant) => state = state.with_assistant(Arc::new(assistant)),
        Err(e) => warn!(error = %e, "Assistant disabled"),
    }

    println!("Team Brain listening on http://{}", api_config.bind_address());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(teambrain_api::serve(api_config, state))?;
    Ok(())
}

fn cmd_user(store: &TeamStore, availability: &AvailabilityStore, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::Create { name, email } => {
            let member = store.create_member(&name, &email)?;
            println!("Created member '{}' ({})", member.name, member.id);
            println!("  API key: {}", member.api_key);
        }
        UserCommand::SetRelayKey { member, key } => {
            let member = store.set_relay_key(&MemberId::from(member), key)?;
            if member.has_relay() {
                println!("Linked assistant for '{}'", member.name);
            } else {
                println!("Unlinked assistant for '{}'", member.name);
            }
        }
        UserCommand::Show { member } => {
            let member = store.load_member(&MemberId::from(member))?;
            println!("{} ({})", member.name, member.id);
            if !member.email.is_empty() {
                println!("  Email: {}", member.email);
            }
            println!(
                "  Assistant: {}",
                if member.has_relay() { "linked" } else { "not linked" }
            );
            println!("  Teams:");
            for team in store.member_teams(&member.id)? {
                println!("    {}  {}", team.id, team.name);
            }
            println!("  Reported availability:");
            for report in availability.list_for_member(&member.id)? {
                println!(
                    "    {} to {}: {} busy, synced {}",
                    report.date_range.start_date,
                    report.date_range.end_date,
                    report.busy.len(),
                    report.synced_at.format("%Y-%m-%d %H:%M UTC")
                );
            }
        }
        UserCommand::List => {
            let members = store.list_members()?;
            if members.is_empty() {
                println!("No members.");
            }
            for member in members {
                println!(
                    "{}  {}{}",
                    member.id,
                    member.name,
                    if member.has_relay() { "" } else { "  (no assistant)" }
                );
            }
        }
    }
    Ok(())
}

fn cmd_team(store: &TeamStore, command: TeamCommand) -> Result<()> {
    match command {
        TeamCommand::Create { name, member } => {
            let team = store.create_team(&name, &MemberId::from(member))?;
            println!("Created team '{}' ({})", team.name, team.id);
            println!("  Invite code: {}", team.invite_code);
        }
        TeamCommand::Join { code, member } => {
            let team = store.join_team(&code, &MemberId::from(member))?;
            println!("Joined team '{}' ({})", team.name, team.id);
        }
        TeamCommand::Show { team } => {
            let team = store.load_team(&TeamId::from(team))?;
            println!("{} ({})", team.name, team.id);
            println!("  Invite code: {}", team.invite_code);
            println!("  Members:");
            for membership in &team.members {
                let name = store
                    .load_member_optional(&membership.member_id)?
                    .map(|m| m.name)
                    .unwrap_or_else(|| "<unknown>".to_string());
                println!("    {}  {} ({:?})", membership.member_id, name, membership.role);
            }
        }
        TeamCommand::List { member } => {
            let teams = match member {
                Some(id) => store.member_teams(&MemberId::from(id))?,
                None => store.list_teams()?,
            };
            if teams.is_empty() {
                println!("No teams.");
            }
            for team in teams {
                println!("{}  {}  ({} members)", team.id, team.name, team.members.len());
            }
        }
    }
    Ok(())
}

fn cmd_slots(input: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .map_err(|e| format!("cannot read {}: {}", input.display(), e))?;
    let parsed: SlotsInput = serde_json::from_str(&text)?;
    let availability = compute_slots(parsed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&availability)?);
    } else {
        println!("{}", availability.message);
    }
    Ok(())
}

/// Resolves common slots for an offline input.
pub fn compute_slots(input: SlotsInput) -> Result<Availability> {
    let request = input.search.into_request(TeamId::from("local"));
    Ok(find_common_slots(&input.busy, &request)?)
}
