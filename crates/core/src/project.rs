//! Project records and the field lookup used by rule evaluation.
//!
//! A [`Project`] is a typed record for the rest of the system. Rules name the
//! attribute they inspect by its wire name (`targetField`), so
//! [`Project::field`] maps those names onto the typed fields and falls back to
//! any extra keys the store returned.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::RecordId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Project statuses counted as "active" on the project statistics card.
pub const ACTIVE_PROJECT_STATUSES: &[&str] = &["active", "execution"];

/// Wire names of the typed project attributes, in record order.
pub const PROJECT_FIELDS: &[&str] = &[
    "id",
    "projectCode",
    "projectName",
    "projectManager",
    "pmEmail",
    "projectStatus",
    "projectStage",
    "startDate",
    "endDate",
    "description",
    "nominations",
];

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A project as stored in the `projects` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    #[serde(default)]
    pub project_code: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub project_manager: Option<String>,
    #[serde(default)]
    pub pm_email: Option<String>,
    #[serde(default)]
    pub project_status: Option<String>,
    #[serde(default)]
    pub project_stage: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nominations: Option<String>,
    /// Health is derived at read time; a stored value is swallowed here so it
    /// never shadows the computed one.
    #[serde(default, rename = "healthStatus", skip_serializing)]
    pub stored_health_status: Option<serde_json::Value>,
    /// Keys the store returned that have no typed field.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Project {
    /// Look up an attribute by its wire name.
    ///
    /// Returns `None` when the attribute is absent or JSON `null`. Extra keys
    /// holding non-string JSON values are rendered with their JSON text.
    pub fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let typed = match name {
            "id" => Some(self.id.as_str()),
            "projectCode" => self.project_code.as_deref(),
            "projectName" => self.project_name.as_deref(),
            "projectManager" => self.project_manager.as_deref(),
            "pmEmail" => self.pm_email.as_deref(),
            "projectStatus" => self.project_status.as_deref(),
            "projectStage" => self.project_stage.as_deref(),
            "startDate" => self.start_date.as_deref(),
            "endDate" => self.end_date.as_deref(),
            "description" => self.description.as_deref(),
            "nominations" => self.nominations.as_deref(),
            _ => return self.extra_field(name),
        };
        typed.map(Cow::Borrowed)
    }

    fn extra_field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.extra.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Display name used in audit descriptions and notifications.
    pub fn display_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or("")
    }

    /// Whether the project counts as active for statistics.
    pub fn is_active(&self) -> bool {
        self.project_status
            .as_deref()
            .is_some_and(|s| ACTIVE_PROJECT_STATUSES.contains(&s))
    }
}

// ---------------------------------------------------------------------------
// Health status
// ---------------------------------------------------------------------------

/// Read-time health of a project, derived from its non-resolved issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// A project annotated with its derived health, as returned by list/get.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithHealth {
    #[serde(flatten)]
    pub project: Project,
    pub health_status: HealthStatus,
}

// ---------------------------------------------------------------------------
// Input DTO
// ---------------------------------------------------------------------------

/// Operator input for creating or replacing a project.
///
/// Text fields are trimmed; blank optional fields are stored as absent.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[validate(length(min = 1, message = "projectCode is required"))]
    pub project_code: String,
    #[validate(length(min = 1, message = "projectName is required"))]
    pub project_name: String,
    #[serde(default)]
    pub project_manager: Option<String>,
    #[serde(default)]
    #[validate(email(message = "pmEmail must be a valid e-mail address"))]
    pub pm_email: Option<String>,
    #[serde(default)]
    pub project_status: Option<String>,
    #[serde(default)]
    pub project_stage: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nominations: Option<String>,
}

impl ProjectInput {
    /// Trim all text and drop blank optional values.
    pub fn normalized(self) -> Self {
        Self {
            project_code: self.project_code.trim().to_string(),
            project_name: self.project_name.trim().to_string(),
            project_manager: non_blank(self.project_manager),
            pm_email: non_blank(self.pm_email),
            project_status: non_blank(self.project_status),
            project_stage: non_blank(self.project_stage),
            start_date: non_blank(self.start_date),
            end_date: non_blank(self.end_date),
            description: non_blank(self.description),
            nominations: non_blank(self.nominations),
        }
    }

    /// Build the record to persist under `id`.
    pub fn into_project(self, id: RecordId) -> Project {
        Project {
            id,
            project_code: Some(self.project_code),
            project_name: Some(self.project_name),
            project_manager: self.project_manager,
            pm_email: self.pm_email,
            project_status: self.project_status,
            project_stage: self.project_stage,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description,
            nominations: self.nominations,
            stored_health_status: None,
            extra: serde_json::Map::new(),
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
