//! Team entity and related types

use serde::Serialize;

use super::validation::{
    validate_assignment_email, validate_team_identifier, validate_team_name, TeamValidationError,
};

/// Numeric identifier assigned by the store
pub type TeamId = i64;

/// Membership of one volunteer in one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    #[serde(rename = "TeamID")]
    team_id: TeamId,
    #[serde(rename = "volunteeremail")]
    volunteer_email: String,
}

impl Assignment {
    /// Create an assignment of `volunteer_email` to the team with `team_id`
    pub fn new(
        team_id: TeamId,
        volunteer_email: impl Into<String>,
    ) -> Result<Self, TeamValidationError> {
        let volunteer_email = volunteer_email.into();
        validate_assignment_email(&volunteer_email)?;

        Ok(Self {
            team_id,
            volunteer_email,
        })
    }

    /// Rebuild an assignment from stored values without validation
    pub fn from_stored(team_id: TeamId, volunteer_email: String) -> Self {
        Self {
            team_id,
            volunteer_email,
        }
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn volunteer_email(&self) -> &str {
        &self.volunteer_email
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    id: TeamId,
    identifier: String,
    name: String,
    #[serde(rename = "volunteeremails")]
    assignments: Vec<Assignment>,
}

impl Team {
    /// Create a team that has not been persisted yet
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, TeamValidationError> {
        let identifier = identifier.into();
        let name = name.into();
        validate_team_identifier(&identifier)?;
        validate_team_name(&name)?;

        Ok(Self {
            id: 0,
            identifier,
            name,
            assignments: Vec::new(),
        })
    }

    /// Rebuild a team from stored values without validation
    pub fn from_stored(id: TeamId, identifier: String, name: String) -> Self {
        Self {
            id,
            identifier,
            name,
            assignments: Vec::new(),
        }
    }

    /// Set the store-assigned identifier (builder pattern)
    pub fn with_id(mut self, id: TeamId) -> Self {
        self.id = id;
        self
    }

    /// Attach the loaded assignment list (builder pattern)
    pub fn with_assignments(mut self, assignments: Vec<Assignment>) -> Self {
        self.assignments = assignments;
        self
    }

    // Getters

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Check if a volunteer is assigned to this team
    pub fn has_volunteer(&self, email: &str) -> bool {
        self.assignments
            .iter()
            .any(|a| a.volunteer_email() == email)
    }
}
