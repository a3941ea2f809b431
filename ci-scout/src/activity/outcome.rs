//! Per-repository probe outcomes.

/// Result of probing a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// At least one workflow run is recorded.
    Active,

    /// No workflow runs are recorded.
    Inactive,

    /// The probe failed; counts as inactive.
    Failed {
        /// Error message.
        error: String,
    },
}

impl ProbeOutcome {
    /// Returns the activity flag: `true` only for [`ProbeOutcome::Active`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<bool> for ProbeOutcome {
    fn from(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}
