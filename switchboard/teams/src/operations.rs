//! Team operation declarations and the [`TeamsApi`] facade.

use switchboard::{
    Api, AuthStrategy, Client, Credentials, DescriptorError, ErrorVariant, FieldKind, InputSchema,
    JsonFormat, Operation, OperationDescriptor, OperationError, ReqwestTransport, RestMethod,
    Transport, VoidFormat, WireCode,
};
use tracing::debug;

use crate::errors::{
    CreateTeamError, DeleteTeamError, GetTeamError, ListTeamsError, SetupError, UpdateTeamError,
};
use crate::types::{CreateTeam, ListTeams, Team, TeamRef, UpdateTeam};

/// Environment variables checked, in order, for the API token.
pub const TOKEN_ENV_VARS: &[&str] = &["TEAMS_API_TOKEN", "API_TOKEN"];

/// API version every team operation is declared against.
pub const API_VERSION: &str = "2024-06-01";
const API_VERSION_HEADER: &str = "X-Api-Version";

const TEAMS_PATH: &str = "/organizations/{organization}/teams";
const TEAM_PATH: &str = "/organizations/{organization}/teams/{team_slug}";

/// The registered team operations.
#[derive(Debug, Clone)]
pub struct TeamOperations {
    pub list: Operation<ListTeams, JsonFormat<Vec<Team>>, ListTeamsError>,
    pub get: Operation<TeamRef, JsonFormat<Team>, GetTeamError>,
    pub create: Operation<CreateTeam, JsonFormat<Team>, CreateTeamError>,
    pub update: Operation<UpdateTeam, JsonFormat<Team>, UpdateTeamError>,
    pub delete: Operation<TeamRef, VoidFormat, DeleteTeamError>,
    api: Api,
}

impl TeamOperations {
    /// Declares and registers every team operation.
    ///
    /// ## Errors
    ///
    /// Returns a [`DescriptorError`] if a declaration is invalid. This only
    /// happens if the declarations below are edited incorrectly.
    pub fn new() -> Result<Self, DescriptorError> {
        let mut api = Api::new("Teams");

        let list = api.register(
            versioned(
                OperationDescriptor::<ListTeams, JsonFormat<Vec<Team>>, ListTeamsError>::builder(),
            )
            .id("ListTeams")
            .method(RestMethod::Get)
            .path(TEAMS_PATH)
            .path_param("organization")
            .input(
                InputSchema::new()
                    .required("organization", FieldKind::String)
                    .optional("per_page", FieldKind::Integer)
                    .optional("page", FieldKind::Integer),
            )
            .description("Lists the teams of an organization")
            .error(ErrorVariant::new("NotFound", WireCode::NotFound))
            .error(ErrorVariant::new("Forbidden", WireCode::Forbidden))
            .build()?,
        )?;

        let get = api.register(
            versioned(
                OperationDescriptor::<TeamRef, JsonFormat<Team>, GetTeamError>::builder(),
            )
            .id("GetTeam")
            .method(RestMethod::Get)
            .path(TEAM_PATH)
            .path_params(["organization", "team_slug"])
            .input(team_ref_schema())
            .description("Gets a team by slug")
            .error(ErrorVariant::new("NotFound", WireCode::NotFound))
            .error(ErrorVariant::new("Forbidden", WireCode::Forbidden))
            .build()?,
        )?;

        let create = api.register(
            versioned(
                OperationDescriptor::<CreateTeam, JsonFormat<Team>, CreateTeamError>::builder(),
            )
            .id("CreateTeam")
            .method(RestMethod::Post)
            .path(TEAMS_PATH)
            .path_param("organization")
            .input(
                InputSchema::new()
                    .required("organization", FieldKind::String)
                    .required("name", FieldKind::String)
                    .optional("description", FieldKind::String)
                    .optional("privacy", FieldKind::String)
                    .optional("maintainers", FieldKind::Array),
            )
            .description("Creates a team in an organization")
            .error(ErrorVariant::new("NotFound", WireCode::NotFound))
            .error(ErrorVariant::new("Forbidden", WireCode::Forbidden))
            .error(ErrorVariant::new(
                "Unprocessable",
                WireCode::UnprocessableEntity,
            ))
            .build()?,
        )?;

        let update = api.register(
            versioned(
                OperationDescriptor::<UpdateTeam, JsonFormat<Team>, UpdateTeamError>::builder(),
            )
            .id("UpdateTeam")
            .method(RestMethod::Patch)
            .path(TEAM_PATH)
            .path_params(["organization", "team_slug"])
            .input(
                team_ref_schema()
                    .optional("name", FieldKind::String)
                    .optional("description", FieldKind::String)
                    .optional("privacy", FieldKind::String),
            )
            .description("Updates a team")
            .error(ErrorVariant::new("NotFound", WireCode::NotFound))
            .error(ErrorVariant::new("Forbidden", WireCode::Forbidden))
            .error(ErrorVariant::new(
                "Unprocessable",
                WireCode::UnprocessableEntity,
            ))
            .build()?,
        )?;

        let delete = api.register(
            versioned(
                OperationDescriptor::<TeamRef, VoidFormat, DeleteTeamError>::builder(),
            )
            .id("DeleteTeam")
            .method(RestMethod::Delete)
            .path(TEAM_PATH)
            .path_params(["organization", "team_slug"])
            .input(team_ref_schema())
            .description("Deletes a team")
            .error(ErrorVariant::new("NotFound", WireCode::NotFound))
            .error(ErrorVariant::new("Forbidden", WireCode::Forbidden))
            .build()?,
        )?;

        debug!(operations = api.len(), "registered team operations");

        Ok(Self {
            list,
            get,
            create,
            update,
            delete,
            api,
        })
    }

    /// The catalog the operations were registered in.
    pub fn api(&self) -> &Api {
        &self.api
    }
}

fn versioned<Id, M, P, I, F, E>(
    builder: switchboard::DescriptorBuilder<Id, M, P, I, F, E>,
) -> switchboard::DescriptorBuilder<Id, M, P, I, F, E> {
    builder.header(API_VERSION_HEADER, API_VERSION)
}

fn team_ref_schema() -> InputSchema {
    InputSchema::new()
        .required("organization", FieldKind::String)
        .required("team_slug", FieldKind::String)
}

/// Team operations bound to a client.
///
/// Build once at startup and share: every method takes `&self`.
///
/// ## Examples
///
/// ```rust,no_run
/// use switchboard_teams::{CreateTeam, Privacy, TeamsApi};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let teams = TeamsApi::from_env("https://api.example.com")?;
/// let team = teams
///     .create_team(&CreateTeam::new("acme", "Infra").privacy(Privacy::Closed))
///     .await?;
/// println!("created {}", team.slug);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TeamsApi<T = ReqwestTransport> {
    client: Client<T>,
    operations: TeamOperations,
}

impl TeamsApi<ReqwestTransport> {
    /// Connects to `base_url` with a bearer token read from the first set
    /// variable of [`TOKEN_ENV_VARS`].
    ///
    /// ## Errors
    ///
    /// Returns [`SetupError::Credential`] if the URL is invalid or no token
    /// variable is set.
    pub fn from_env(base_url: &str) -> Result<Self, SetupError> {
        let credentials = Credentials::from_env(
            base_url,
            &AuthStrategy::BearerToken { header: None },
            TOKEN_ENV_VARS,
        )?;
        Self::new(credentials)
    }

    /// Uses the given credentials with a default transport.
    pub fn new(credentials: Credentials) -> Result<Self, SetupError> {
        Ok(Self {
            client: Client::new(credentials)?,
            operations: TeamOperations::new()?,
        })
    }
}

impl<T: Transport> TeamsApi<T> {
    pub fn with_client(client: Client<T>) -> Result<Self, SetupError> {
        Ok(Self {
            client,
            operations: TeamOperations::new()?,
        })
    }

    pub fn client(&self) -> &Client<T> {
        &self.client
    }

    pub fn operations(&self) -> &TeamOperations {
        &self.operations
    }

    pub async fn list_teams(
        &self,
        input: &ListTeams,
    ) -> Result<Vec<Team>, OperationError<ListTeamsError>> {
        self.operations.list.call(&self.client, input).await
    }

    pub async fn get_team(&self, input: &TeamRef) -> Result<Team, OperationError<GetTeamError>> {
        self.operations.get.call(&self.client, input).await
    }

    pub async fn create_team(
        &self,
        input: &CreateTeam,
    ) -> Result<Team, OperationError<CreateTeamError>> {
        self.operations.create.call(&self.client, input).await
    }

    pub async fn update_team(
        &self,
        input: &UpdateTeam,
    ) -> Result<Team, OperationError<UpdateTeamError>> {
        self.operations.update.call(&self.client, input).await
    }

    pub async fn delete_team(&self, input: &TeamRef) -> Result<(), OperationError<DeleteTeamError>> {
        self.operations.delete.call(&self.client, input).await
    }
}
