//! Switchboard Teams
//!
//! Organization team operations declared on the `switchboard` runtime:
//! list, get, create, update and delete. Each operation has its own closed
//! error enum, so callers match on exactly the failures it can produce.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use switchboard::OperationError;
//! use switchboard_teams::{GetTeamError, TeamRef, TeamsApi};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let teams = TeamsApi::from_env("https://api.example.com")?;
//!
//! match teams.get_team(&TeamRef::new("acme", "infra")).await {
//!     Ok(team) => println!("{} ({:?})", team.name, team.privacy),
//!     Err(OperationError::Declared(GetTeamError::NotFound { team_slug, .. })) => {
//!         println!("no team named {team_slug}");
//!     }
//!     Err(other) => return Err(other.into()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`types`] - Team resources and operation inputs
//! - [`errors`] - Per-operation error enums
//! - [`operations`] - Declarations and the [`TeamsApi`] facade

pub mod errors;
pub mod operations;
pub mod types;

pub use errors::{
    CreateTeamError, DeleteTeamError, GetTeamError, ListTeamsError, SetupError, UpdateTeamError,
};
pub use operations::{API_VERSION, TOKEN_ENV_VARS, TeamOperations, TeamsApi};
pub use types::{CreateTeam, ListTeams, Privacy, Team, TeamRef, UpdateTeam};
