use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lexicon::categorize::categorize;
use crate::lexicon::{CategoryCounts, Lexicon, LexiconEntry};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unreadable CSV header: {0}")]
    Header(#[from] csv::Error),
}

/// One row of a deck export, every field kept as text. Missing columns and
/// short rows read as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRow {
    pub note_id: String,
    pub term: String,
    pub reading: String,
    pub translation: String,
    pub status: String,
    pub last_studied_at: String,
    pub tags: String,
}

impl TermRow {
    pub fn is_new(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("new")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub excluded_new: usize,
    pub uncategorized: usize,
    pub malformed: usize,
    pub counts: CategoryCounts,
}

#[derive(Clone, Debug)]
pub struct ImportOutcome {
    pub lexicon: Lexicon,
    pub summary: ImportSummary,
}

struct Columns {
    note_id: Option<usize>,
    term: Option<usize>,
    reading: Option<usize>,
    translation: Option<usize>,
    status: Option<usize>,
    last_studied_at: Option<usize>,
    tags: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };
        Self {
            note_id: find("note_id"),
            term: find("term"),
            reading: find("reading"),
            translation: find("translation"),
            status: find("status"),
            last_studied_at: find("last_studied_at"),
            tags: find("tags"),
        }
    }

    fn row(&self, record: &csv::StringRecord) -> TermRow {
        let get = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        TermRow {
            note_id: get(self.note_id),
            term: get(self.term),
            reading: get(self.reading),
            translation: get(self.translation),
            status: get(self.status),
            last_studied_at: get(self.last_studied_at),
            tags: get(self.tags),
        }
    }
}

/// Parse delimited text into rows. Returns the rows plus the number of
/// records the reader could not decode.
pub fn parse_rows(text: &str) -> Result<(Vec<TermRow>, usize), ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = Columns::from_headers(reader.headers()?);
    if columns.term.is_none() {
        tracing::warn!("import header has no `term` column; every row will be empty");
    }

    let mut rows = Vec::new();
    let mut malformed = 0;
    for (idx, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                if record.iter().all(|field| field.trim().is_empty()) {
                    continue;
                }
                rows.push(columns.row(&record));
            }
            Err(e) => {
                tracing::debug!(row = idx + 1, error = %e, "skipping malformed import row");
                malformed += 1;
            }
        }
    }
    Ok((rows, malformed))
}

/// Build a lexicon from deck-export text: drop rows still marked `new`,
/// then categorize the rest.
pub fn import_text(text: &str) -> Result<ImportOutcome, ImportError> {
    let (rows, malformed) = parse_rows(text)?;
    let mut summary = ImportSummary {
        total_rows: rows.len(),
        malformed,
        ..ImportSummary::default()
    };

    let mut lexicon = Lexicon::default();
    for row in rows {
        if row.is_new() {
            summary.excluded_new += 1;
            continue;
        }
        match categorize(&row.term) {
            Some(category) => lexicon.push(
                LexiconEntry::new(row.term, category)
                    .with_reading(row.reading)
                    .with_translation(row.translation),
            ),
            None => summary.uncategorized += 1,
        }
    }
    summary.counts = lexicon.counts();

    tracing::info!(
        rows = summary.total_rows,
        excluded_new = summary.excluded_new,
        persons = summary.counts.persons,
        places = summary.counts.places,
        objects = summary.counts.objects,
        verbs = summary.counts.verbs,
        "imported vocabulary"
    );

    Ok(ImportOutcome { lexicon, summary })
}

pub fn import_file(path: &Path) -> Result<ImportOutcome, ImportError> {
    let text = fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    import_text(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Category;

    const DECK: &str = "note_id,term,reading,translation,status,last_studied_at,tags\n\
1,私,わたし,I,review,2024-05-01,pronoun\n\
2,学校,がっこう,school,review,2024-05-01,place\n\
3,行く,いく,to go,learning,2024-05-02,verb\n\
4,本,ほん,book,new,,\n\
5,\"映画, film\",えいが,movie,review,,\n";

    #[test]
    fn excludes_new_rows_and_categorizes_the_rest() {
        let outcome = import_text(DECK).unwrap();
        assert_eq!(outcome.summary.total_rows, 5);
        assert_eq!(outcome.summary.excluded_new, 1);
        assert_eq!(outcome.lexicon.pool(Category::Person).len(), 1);
        assert_eq!(outcome.lexicon.pool(Category::Place).len(), 1);
        assert_eq!(outcome.lexicon.pool(Category::Verb).len(), 1);
        assert_eq!(outcome.lexicon.pool(Category::Object).len(), 1);
        assert!(outcome.lexicon.entries().all(|e| e.surface != "本"));
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let outcome = import_text(DECK).unwrap();
        assert_eq!(outcome.lexicon.objects[0].surface, "映画, film");
        assert_eq!(outcome.lexicon.objects[0].translation.as_deref(), Some("movie"));
    }

    #[test]
    fn short_rows_read_missing_fields_as_empty() {
        let text = "note_id,term,reading,translation,status\n7,駅\n";
        let (rows, malformed) = parse_rows(text).unwrap();
        assert_eq!(malformed, 0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].term, "駅");
        assert_eq!(rows[0].reading, "");
        assert_eq!(rows[0].status, "");
    }

    #[test]
    fn reordered_and_missing_columns_are_tolerated() {
        let text = "translation,term\nstation,駅\n";
        let outcome = import_text(text).unwrap();
        let place = &outcome.lexicon.places[0];
        assert_eq!(place.surface, "駅");
        assert_eq!(place.translation.as_deref(), Some("station"));
        assert!(place.reading.is_none());
    }

    #[test]
    fn header_without_term_yields_empty_lexicon() {
        let outcome = import_text("a,b\n1,2\n").unwrap();
        assert!(outcome.lexicon.is_empty());
        assert_eq!(outcome.summary.uncategorized, 1);
    }

    #[test]
    fn byte_order_mark_on_header_is_ignored() {
        let outcome = import_text("\u{feff}term,translation\n先生,teacher\n").unwrap();
        assert_eq!(outcome.lexicon.persons.len(), 1);
    }

    #[test]
    fn empty_text_imports_nothing() {
        let outcome = import_text("").unwrap();
        assert!(outcome.lexicon.is_empty());
        assert_eq!(outcome.summary.total_rows, 0);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = import_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
