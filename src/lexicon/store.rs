use std::path::Path;

use anyhow::{Result, bail};
use chrono::Utc;

use crate::lexicon::import::{self, ImportSummary};
use crate::lexicon::{CategoryCounts, Lexicon};
use crate::store::json_store::JsonStore;
use crate::store::schema::LexiconSnapshot;

/// Owns the active lexicon. Starts from the last imported snapshot, or the
/// seed vocabulary when nothing has been imported.
#[derive(Clone, Debug)]
pub struct LexiconStore {
    lexicon: Lexicon,
    snapshot: Option<LexiconSnapshot>,
}

impl Default for LexiconStore {
    fn default() -> Self {
        Self {
            lexicon: Lexicon::seed(),
            snapshot: None,
        }
    }
}

impl LexiconStore {
    pub fn hydrate(store: &JsonStore) -> Self {
        match store.load_lexicon() {
            Ok(Some(snapshot)) => Self {
                lexicon: snapshot.lexicon.clone(),
                snapshot: Some(snapshot),
            },
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load lexicon, using defaults");
                Self::default()
            }
        }
    }

    /// Parse, filter and categorize a deck export, then persist it as the
    /// new snapshot. An import with no usable rows leaves everything as is.
    pub fn import_csv(&mut self, store: &JsonStore, path: &Path) -> Result<ImportSummary> {
        let outcome = import::import_file(path)?;
        if outcome.lexicon.is_empty() {
            bail!(
                "no usable rows in {} ({} rows, {} still new)",
                path.display(),
                outcome.summary.total_rows,
                outcome.summary.excluded_new
            );
        }

        let snapshot = LexiconSnapshot {
            imported_at: Utc::now(),
            source: path.file_name().map(|n| n.to_string_lossy().into_owned()),
            lexicon: outcome.lexicon,
            summary: outcome.summary,
        };
        store.save_lexicon(&snapshot)?;

        let summary = snapshot.summary.clone();
        self.lexicon = snapshot.lexicon.clone();
        self.snapshot = Some(snapshot);
        Ok(summary)
    }

    /// Drop the imported snapshot and go back to the seed vocabulary.
    pub fn clear(&mut self, store: &JsonStore) -> Result<bool> {
        let removed = store.clear_lexicon()?;
        *self = Self::default();
        Ok(removed)
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn counts(&self) -> CategoryCounts {
        self.lexicon.counts()
    }

    pub fn is_imported(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&LexiconSnapshot> {
        self.snapshot.as_ref()
    }
}
