/// The tables the hygiene service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Projects,
    HygieneRules,
    HygieneIssues,
    Notifications,
    AuditLog,
}

impl Collection {
    pub const ALL: &'static [Collection] = &[
        Self::Projects,
        Self::HygieneRules,
        Self::HygieneIssues,
        Self::Notifications,
        Self::AuditLog,
    ];

    /// Table name used in store URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::HygieneRules => "hygiene_rules",
            Self::HygieneIssues => "hygiene_issues",
            Self::Notifications => "notifications",
            Self::AuditLog => "audit_log",
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity(&self) -> &'static str {
        match self {
            Self::Projects => "Project",
            Self::HygieneRules => "Rule",
            Self::HygieneIssues => "Issue",
            Self::Notifications => "Notification",
            Self::AuditLog => "AuditLogEntry",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
