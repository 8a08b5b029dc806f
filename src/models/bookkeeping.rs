use crate::domain::Severity;
use crate::entities::subject_status;
use serde::{Deserialize, Serialize};

/// Desired state of a subject's status row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInput {
    pub severity: Severity,
    pub headline: String,
    pub detail: String,
    pub is_resolved: bool,
    pub is_locked: bool,
}

impl StatusInput {
    pub fn new(severity: Severity, headline: impl Into<String>) -> Self {
        Self {
            severity,
            headline: headline.into(),
            detail: String::new(),
            is_resolved: false,
            is_locked: false,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    #[must_use]
    pub const fn resolved(mut self) -> Self {
        self.is_resolved = true;
        self
    }

    #[must_use]
    pub const fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }
}

/// Outcome of an automated status write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusWrite {
    Written(subject_status::Model),
    /// The row is locked by an operator and was left untouched.
    Locked(subject_status::Model),
}

impl StatusWrite {
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }

    #[must_use]
    pub fn into_model(self) -> subject_status::Model {
        match self {
            Self::Written(model) | Self::Locked(model) => model,
        }
    }
}
