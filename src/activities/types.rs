//! Data types for the activities service roster.

use serde::Deserialize;

use crate::types::ActivityName;

/// One extracurricular activity as the service reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// Activity name, which also keys the service's URL scheme.
    pub name: ActivityName,
    /// One-line description of the activity.
    pub description: String,
    /// Human-readable meeting schedule.
    pub schedule: String,
    /// Capacity cap advertised by the service.
    pub max_participants: usize,
    /// Emails of currently signed-up participants.
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity, clamped at zero when the roster overruns the cap.
    pub fn spots_left(&self) -> usize {
        self.max_participants.saturating_sub(self.participants.len())
    }

    /// Whether the activity has no remaining capacity.
    pub fn is_full(&self) -> bool {
        self.spots_left() == 0
    }
}

/// Per-activity record inside the roster object.
///
/// Defaults keep a sparsely-populated record renderable instead of failing
/// the whole roster.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ActivityRecord {
    /// One-line description of the activity.
    #[serde(default)]
    pub description: String,
    /// Human-readable meeting schedule.
    #[serde(default)]
    pub schedule: String,
    /// Capacity cap advertised by the service.
    #[serde(default)]
    pub max_participants: usize,
    /// Emails of currently signed-up participants.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl ActivityRecord {
    /// Attach the roster key this record was stored under.
    pub fn into_activity(self, name: impl Into<ActivityName>) -> Activity {
        Activity {
            name: name.into(),
            description: self.description,
            schedule: self.schedule,
            max_participants: self.max_participants,
            participants: self.participants,
        }
    }
}
