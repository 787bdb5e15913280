//! Team resources and the inputs of each team operation.

use serde::{Deserialize, Serialize};

/// Who can see a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privacy {
    /// Visible only to organization owners and team members.
    Secret,
    /// Visible to every member of the organization.
    Closed,
}

/// A team as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub privacy: Privacy,
}

/// Input of `ListTeams`. Paging fields travel as query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListTeams {
    pub organization: String,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl ListTeams {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            per_page: None,
            page: None,
        }
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// Identifies one team. Input of `GetTeam` and `DeleteTeam`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRef {
    pub organization: String,
    pub team_slug: String,
}

impl TeamRef {
    pub fn new(organization: impl Into<String>, team_slug: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            team_slug: team_slug.into(),
        }
    }
}

/// Input of `CreateTeam`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTeam {
    pub organization: String,
    pub name: String,
    pub description: Option<String>,
    pub privacy: Option<Privacy>,
    /// Logins of the initial maintainers.
    pub maintainers: Option<Vec<String>>,
}

impl CreateTeam {
    pub fn new(organization: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            name: name.into(),
            description: None,
            privacy: None,
            maintainers: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn privacy(mut self, privacy: Privacy) -> Self {
        self.privacy = Some(privacy);
        self
    }

    pub fn maintainers<S: Into<String>>(mut self, logins: impl IntoIterator<Item = S>) -> Self {
        self.maintainers = Some(logins.into_iter().map(Into::into).collect());
        self
    }
}

/// Input of `UpdateTeam`. Only the fields that are set are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateTeam {
    pub organization: String,
    pub team_slug: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub privacy: Option<Privacy>,
}

impl UpdateTeam {
    pub fn new(organization: impl Into<String>, team_slug: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            team_slug: team_slug.into(),
            name: None,
            description: None,
            privacy: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn privacy(mut self, privacy: Privacy) -> Self {
        self.privacy = Some(privacy);
        self
    }
}
