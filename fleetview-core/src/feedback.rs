// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::error::{FeedbackError, FleetviewError};
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Review state of a feedback entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackStatus {
    #[serde(rename = "Under Review")]
    UnderReview,
    Acknowledged,
    Resolved,
}

impl FeedbackStatus {
    pub fn parse(s: &str) -> Result<Self, FleetviewError> {
        match s.trim().to_lowercase().replace(|c: char| c == '-' || c == '_', " ").as_str() {
            "under review" | "review" => Ok(FeedbackStatus::UnderReview),
            "acknowledged" | "ack" => Ok(FeedbackStatus::Acknowledged),
            "resolved" => Ok(FeedbackStatus::Resolved),
            _ => Err(FleetviewError::UnknownFeedbackStatus(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::UnderReview => "Under Review",
            FeedbackStatus::Acknowledged => "Acknowledged",
            FeedbackStatus::Resolved => "Resolved",
        }
    }
}

impl FromStr for FeedbackStatus {
    type Err = FleetviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedbackStatus::parse(s)
    }
}

/// A piece of user feedback about the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: String,
    pub text: String,
    pub date: DateTime<Utc>,
    pub status: FeedbackStatus,
}

/// In-memory feedback log, newest entry first
#[derive(Clone, Default)]
pub struct FeedbackLog {
    entries: Arc<RwLock<Vec<FeedbackEntry>>>,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log pre-populated with three example entries dated relative to `now`
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let entries = vec![
            FeedbackEntry {
                id: "1".to_string(),
                text: "Cost breakdown by department would be very useful".to_string(),
                date: now - Duration::hours(2),
                status: FeedbackStatus::UnderReview,
            },
            FeedbackEntry {
                id: "2".to_string(),
                text: "Would like to filter agents by team ownership".to_string(),
                date: now - Duration::days(2),
                status: FeedbackStatus::Acknowledged,
            },
            FeedbackEntry {
                id: "3".to_string(),
                text: "Latency charts would benefit from a p99 percentile option".to_string(),
                date: now - Duration::days(5),
                status: FeedbackStatus::Resolved,
            },
        ];
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Record new feedback at the top of the log
    pub fn submit(&self, text: &str, now: DateTime<Utc>) -> Result<FeedbackEntry, FeedbackError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FeedbackError::EmptyText);
        }

        let entry = FeedbackEntry {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            date: now,
            status: FeedbackStatus::UnderReview,
        };
        self.entries.write().insert(0, entry.clone());

        tracing::info!(id = %entry.id, "Feedback submitted");
        Ok(entry)
    }

    pub fn set_status(&self, id: &str, status: FeedbackStatus) -> Result<(), FeedbackError> {
        let mut entries = self.entries.write();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| FeedbackError::NotFound(id.to_string()))?;
        entry.status = status;
        drop(entries);

        tracing::info!(id, status = status.as_str(), "Feedback status changed");
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<(), FeedbackError> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(FeedbackError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// All entries, newest first
    pub fn entries(&self) -> Vec<FeedbackEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
