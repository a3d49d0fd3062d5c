use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};

use crate::session::summary::SessionSummary;
use crate::store::schema::{LexiconSnapshot, SessionHistoryData};

const LEXICON_FILE: &str = "lexicon.json";
const SESSIONS_FILE: &str = "sessions.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = data_dir();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("creating {}", base_dir.display()))?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// `Ok(None)` when the file does not exist yet; unparsable content is
    /// logged and treated the same way.
    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.file_path(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        match serde_json::from_str(&content) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable store file");
                Ok(None)
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_lexicon(&self) -> Result<Option<LexiconSnapshot>> {
        self.load(LEXICON_FILE)
    }

    pub fn save_lexicon(&self, snapshot: &LexiconSnapshot) -> Result<()> {
        self.save(LEXICON_FILE, snapshot)
    }

    /// Returns whether a snapshot existed.
    pub fn clear_lexicon(&self) -> Result<bool> {
        match fs::remove_file(self.file_path(LEXICON_FILE)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn load_sessions(&self) -> Result<SessionHistoryData> {
        Ok(self.load(SESSIONS_FILE)?.unwrap_or_default())
    }

    pub fn append_session(&self, summary: SessionSummary) -> Result<()> {
        let mut history = self.load_sessions()?;
        history.push(summary);
        self.save(SESSIONS_FILE, &history)
    }
}

/// `<data_dir>/jpdrills`, falling back to the working directory.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jpdrills")
}
