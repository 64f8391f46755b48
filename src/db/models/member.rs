//! Membership data models.
//!
//! - `Member`: one subscribed café member, as stored in the `members` table.
//! - `Plan`: the subscription tier chosen at sign-up.

use std::{fmt, str::FromStr};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Plan {
    Bronze,
    Silver,
    Gold,
}

impl Default for Plan {
    fn default() -> Self {
        Plan::Bronze
    }
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Bronze, Plan::Silver, Plan::Gold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Bronze => "Bronze",
            Plan::Silver => "Silver",
            Plan::Gold => "Gold",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Plan::ALL
            .into_iter()
            .find(|plan| plan.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| anyhow!("unknown membership plan '{value}'"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub plan: Plan,
    pub minutes_read: u64,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// A freshly subscribed member: new id, zero minutes read.
    pub fn subscribe(name: impl Into<String>, plan: Plan) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            plan,
            minutes_read: 0,
            joined_at: Utc::now(),
        }
    }
}
