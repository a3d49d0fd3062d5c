use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::generator::GeneratorOptions;
use crate::generator::frame::Difficulty;

pub const MIN_SESSION_SIZE: usize = 5;
pub const MAX_SESSION_SIZE: usize = 100;
pub const SESSION_SIZE_STEP: usize = 5;
const MIN_RETRY_BUDGET: usize = 1;
const MAX_RETRY_BUDGET: usize = 32;

/// Which side of a card is the prompt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Japanese tokens as prompt, English as answer.
    #[default]
    JpEn,
    EnJp,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::JpEn => Direction::EnJp,
            Direction::EnJp => Direction::JpEn,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::JpEn => f.write_str("JP → EN"),
            Direction::EnJp => f.write_str("EN → JP"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_session_size")]
    pub session_size: usize,
    #[serde(default = "default_min_lexicon_entries")]
    pub min_lexicon_entries: usize,
    #[serde(default = "default_retry_budget")]
    pub retry_budget: usize,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default = "default_show_readings")]
    pub show_readings: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_session_size() -> usize {
    20
}
fn default_min_lexicon_entries() -> usize {
    crate::generator::DEFAULT_MIN_LEXICON_ENTRIES
}
fn default_retry_budget() -> usize {
    crate::generator::DEFAULT_RETRY_BUDGET
}
fn default_show_readings() -> bool {
    true
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_size: default_session_size(),
            min_lexicon_entries: default_min_lexicon_entries(),
            retry_budget: default_retry_budget(),
            difficulty: Difficulty::default(),
            direction: Direction::default(),
            show_readings: default_show_readings(),
            theme: default_theme(),
            seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jpdrills")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Clamp out-of-range values from hand-edited files or CLI overrides.
    pub fn validate(&mut self) {
        self.session_size = self.session_size.clamp(MIN_SESSION_SIZE, MAX_SESSION_SIZE);
        self.retry_budget = self.retry_budget.clamp(MIN_RETRY_BUDGET, MAX_RETRY_BUDGET);
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
    }

    pub fn step_session_size(&mut self, grow: bool) {
        self.session_size = if grow {
            self.session_size + SESSION_SIZE_STEP
        } else {
            self.session_size.saturating_sub(SESSION_SIZE_STEP)
        }
        .clamp(MIN_SESSION_SIZE, MAX_SESSION_SIZE);
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            min_lexicon_entries: self.min_lexicon_entries,
            retry_budget: self.retry_budget,
            difficulty: self.difficulty,
        }
    }
}
