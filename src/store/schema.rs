use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::lexicon::import::ImportSummary;
use crate::session::summary::SessionSummary;

/// Sessions kept in `sessions.json`; older ones are dropped first.
pub const MAX_STORED_SESSIONS: usize = 500;

/// The last imported lexicon. A new import replaces it outright.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconSnapshot {
    pub imported_at: DateTime<Utc>,
    #[serde(default)]
    pub source: Option<String>,
    pub lexicon: Lexicon,
    #[serde(default)]
    pub summary: ImportSummary,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHistoryData {
    #[serde(default)]
    pub sessions: Vec<SessionSummary>,
}

impl SessionHistoryData {
    pub fn push(&mut self, summary: SessionSummary) {
        self.sessions.push(summary);
        if self.sessions.len() > MAX_STORED_SESSIONS {
            let excess = self.sessions.len() - MAX_STORED_SESSIONS;
            self.sessions.drain(..excess);
        }
    }

    pub fn latest(&self) -> Option<&SessionSummary> {
        self.sessions.last()
    }
}
