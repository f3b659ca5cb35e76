//! Hygiene rules: severity and condition kinds, the stored record, and the
//! operator input DTO.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::project::non_blank;
use crate::types::RecordId;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

// ---------------------------------------------------------------------------
// Condition kinds
// ---------------------------------------------------------------------------

/// The predicate a rule applies to its target field.
///
/// Stored values outside the four known kinds deserialize to
/// [`RuleCondition::Unrecognized`], which never reports a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCondition {
    FieldEmpty,
    FieldOutdated,
    FieldInvalid,
    MissingRequired,
    #[default]
    #[serde(other)]
    Unrecognized,
}

impl RuleCondition {
    /// Condition kinds an operator may assign.
    pub const ASSIGNABLE: &'static [RuleCondition] = &[
        Self::FieldEmpty,
        Self::FieldOutdated,
        Self::FieldInvalid,
        Self::MissingRequired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FieldEmpty => "field_empty",
            Self::FieldOutdated => "field_outdated",
            Self::FieldInvalid => "field_invalid",
            Self::MissingRequired => "missing_required",
            Self::Unrecognized => "unrecognized",
        }
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A rule as stored in the `hygiene_rules` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HygieneRule {
    pub id: RecordId,
    #[serde(default)]
    pub rule_name: String,
    #[serde(default)]
    pub rule_category: String,
    pub rule_severity: Severity,
    #[serde(default)]
    pub rule_description: Option<String>,
    #[serde(default)]
    pub rule_condition: RuleCondition,
    #[serde(default)]
    pub target_field: String,
    #[serde(default)]
    pub expected_value: Option<String>,
    #[serde(default)]
    pub correction_action: Option<String>,
    /// Rules without an explicit flag do not participate in checks.
    #[serde(default)]
    pub enabled: bool,
}

impl HygieneRule {
    /// The comparison value for `field_invalid`, if one is configured.
    ///
    /// An empty string counts as unset.
    pub fn expected(&self) -> Option<&str> {
        self.expected_value.as_deref().filter(|v| !v.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Input DTO
// ---------------------------------------------------------------------------

/// Operator input for creating or replacing a rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleInput {
    pub rule_name: String,
    #[serde(default)]
    pub rule_category: String,
    pub rule_severity: Severity,
    #[serde(default)]
    pub rule_description: Option<String>,
    pub rule_condition: RuleCondition,
    pub target_field: String,
    #[serde(default)]
    pub expected_value: Option<String>,
    #[serde(default)]
    pub correction_action: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl RuleInput {
    /// Trim text, reject unusable rules, and build the record to persist.
    pub fn into_rule(self, id: RecordId) -> Result<HygieneRule, CoreError> {
        let rule_name = self.rule_name.trim().to_string();
        if rule_name.is_empty() {
            return Err(CoreError::Validation("ruleName is required".into()));
        }
        validate_condition(self.rule_condition)?;
        let target_field = self.target_field.trim().to_string();
        if target_field.is_empty() {
            return Err(CoreError::Validation("targetField is required".into()));
        }

        Ok(HygieneRule {
            id,
            rule_name,
            rule_category: self.rule_category.trim().to_string(),
            rule_severity: self.rule_severity,
            rule_description: non_blank(self.rule_description),
            rule_condition: self.rule_condition,
            target_field,
            expected_value: non_blank(self.expected_value),
            correction_action: non_blank(self.correction_action),
            enabled: self.enabled,
        })
    }
}

/// Only the four known condition kinds may be written.
pub fn validate_condition(condition: RuleCondition) -> Result<(), CoreError> {
    if RuleCondition::ASSIGNABLE.contains(&condition) {
        Ok(())
    } else {
        let valid: Vec<&str> = RuleCondition::ASSIGNABLE.iter().map(|c| c.as_str()).collect();
        Err(CoreError::Validation(format!(
            "Unknown rule condition. Valid conditions: {}",
            valid.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
