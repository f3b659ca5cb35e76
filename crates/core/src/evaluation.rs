//! Rule evaluation: does one project currently violate one rule?
//!
//! Evaluation is a pure function of the project, the rule and an
//! [`EvaluationContext`] carrying the evaluation instant. It never fails:
//! rules that cannot be evaluated (unknown condition, blank target field)
//! report no violation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::project::Project;
use crate::rule::{HygieneRule, RuleCondition};
use crate::types::{Date, Timestamp};

/// A date field older than this many whole days is outdated.
pub const DEFAULT_OUTDATED_THRESHOLD_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Inputs to evaluation that do not come from the project or the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    pub now: Timestamp,
    pub outdated_threshold_days: i64,
}

impl EvaluationContext {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now,
            outdated_threshold_days: DEFAULT_OUTDATED_THRESHOLD_DAYS,
        }
    }

    pub fn with_outdated_threshold(mut self, days: i64) -> Self {
        self.outdated_threshold_days = days;
        self
    }

    /// The UTC calendar day of the evaluation instant.
    pub fn today(&self) -> Date {
        self.now.date_naive()
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Decide whether `project` is in violation of `rule`.
///
/// The caller is responsible for only passing enabled rules.
pub fn evaluate(project: &Project, rule: &HygieneRule, ctx: &EvaluationContext) -> bool {
    if rule.target_field.trim().is_empty() {
        return false;
    }
    let value = project.field(&rule.target_field);
    let value = value.as_deref();

    match rule.rule_condition {
        RuleCondition::FieldEmpty | RuleCondition::MissingRequired => is_blank(value),
        RuleCondition::FieldOutdated => is_outdated(value, ctx),
        RuleCondition::FieldInvalid => match rule.expected() {
            Some(expected) => value != Some(expected),
            None => false,
        },
        RuleCondition::Unrecognized => false,
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Missing or unparsable values cannot be evaluated and are not outdated.
fn is_outdated(value: Option<&str>, ctx: &EvaluationContext) -> bool {
    let Some(date) = value.and_then(parse_date) else {
        return false;
    };
    (ctx.now - date).num_days() > ctx.outdated_threshold_days
}

/// Accepts `YYYY-MM-DD` (UTC midnight), RFC 3339, and a bare
/// `YYYY-MM-DDTHH:MM:SS` read as UTC.
pub fn parse_date(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
