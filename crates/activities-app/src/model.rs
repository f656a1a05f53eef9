//! Activity directory as served by `GET /activities`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One activity's details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    /// Free-form description.
    pub description: String,
    /// Human-readable schedule.
    pub schedule: String,
    /// Capacity.
    pub max_participants: u32,
    /// Participant emails in server order.
    pub participants: Vec<String>,
}

impl ActivityDetails {
    /// Remaining capacity. Negative when the server reports an overfull roster.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// Activity name to details, in server document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityDirectory(IndexMap<String, ActivityDetails>);

impl ActivityDirectory {
    /// Parse a directory from a JSON body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Iterate `(name, details)` in server order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActivityDetails)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Details for one activity.
    pub fn get(&self, name: &str) -> Option<&ActivityDetails> {
        self.0.get(name)
    }

    /// Number of activities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the directory has no activities.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ActivityDetails)> for ActivityDirectory {
    fn from_iter<I: IntoIterator<Item = (String, ActivityDetails)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
