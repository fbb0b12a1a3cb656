//! Session management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use hirevault_auth::SessionStore;
use hirevault_core::config::AppConfig;
use hirevault_core::error::AppError;
use hirevault_core::traits::{Clock, SystemClock};
use hirevault_entity::session::Session;

use crate::output::{self, OutputFormat};

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// List a user's sessions, newest first
    List {
        /// User ID
        user_id: i64,
    },
    /// Block a session so its refresh token stops working
    Block {
        /// Session ID
        id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Session display row
#[derive(Debug, Serialize, Tabled)]
struct SessionRow {
    /// Session ID
    id: String,
    /// State
    state: &'static str,
    /// Client IP
    client_ip: String,
    /// User agent
    user_agent: String,
    /// Created
    created_at: String,
    /// Expires
    expires_at: String,
}

impl SessionRow {
    fn new(session: &Session, clock: &dyn Clock) -> Self {
        let state = if session.is_blocked {
            "blocked"
        } else if session.is_usable_at(clock.now()) {
            "active"
        } else {
            "expired"
        };
        Self {
            id: session.id.to_string(),
            state,
            client_ip: session.client_ip.clone(),
            user_agent: session.user_agent.clone(),
            created_at: session.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            expires_at: session.expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute session commands
pub async fn execute(
    args: &SessionArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let repositories = super::open_repositories(&config).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = SessionStore::new(Arc::clone(&repositories.sessions), Arc::clone(&clock));

    match &args.command {
        SessionCommand::List { user_id } => {
            let sessions = store.list_for_user(*user_id).await?;
            let rows: Vec<SessionRow> = sessions
                .iter()
                .map(|s| SessionRow::new(s, clock.as_ref()))
                .collect();
            output::print_list(&rows, format);
        }
        SessionCommand::Block { id, force } => {
            let session_id = uuid::Uuid::parse_str(id)
                .map_err(|e| AppError::validation(format!("Invalid UUID: {e}")))?;

            let Some(session) = store.find_by_id(session_id).await? else {
                return Err(AppError::not_found(format!("Session {session_id} not found")));
            };
            if session.is_blocked {
                output::print_warning(&format!("Session {session_id} is already blocked"));
                return Ok(());
            }

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Block session {session_id} of user {} ({}, {})?",
                        session.user_id, session.client_ip, session.user_agent
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            store.block(session_id).await?;
            output::print_success(&format!("Session {session_id} blocked"));
        }
    }

    Ok(())
}
