use serde::{Deserialize, Serialize};

use crate::generator::frame::FrameKind;
use crate::lexicon::LexiconEntry;

const TERMINAL_PUNCTUATION: &[&str] = &["。", "！", "？", ".", "!", "?"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Particle,
    Adjective,
    Connector,
    #[default]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub surface: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gloss: Option<String>,
    #[serde(default)]
    pub pos: PartOfSpeech,
}

impl Token {
    pub fn is_terminal_punctuation(&self) -> bool {
        TERMINAL_PUNCTUATION.contains(&self.surface.as_str())
    }
}

/// A token before it belongs to a card. Frames render drafts; the
/// generator turns them into tokens with card-scoped ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenDraft {
    pub surface: String,
    pub reading: Option<String>,
    pub gloss: Option<String>,
    pub pos: PartOfSpeech,
}

impl TokenDraft {
    pub fn new(surface: impl Into<String>, gloss: &str, pos: PartOfSpeech) -> Self {
        Self {
            surface: surface.into(),
            reading: None,
            gloss: if gloss.is_empty() {
                None
            } else {
                Some(gloss.to_string())
            },
            pos,
        }
    }

    pub fn with_reading(mut self, reading: Option<String>) -> Self {
        self.reading = reading;
        self
    }

    pub fn particle(surface: &str, gloss: &str) -> Self {
        Self::new(surface, gloss, PartOfSpeech::Particle)
    }

    pub fn period() -> Self {
        Self::new("。", "", PartOfSpeech::Other)
    }

    pub fn entry(entry: &LexiconEntry, pos: PartOfSpeech) -> Self {
        Self {
            surface: entry.surface.clone(),
            reading: entry.reading.clone(),
            gloss: entry.translation.clone(),
            pos,
        }
    }

    fn into_token(self, id: String) -> Token {
        Token {
            id,
            surface: self.surface,
            reading: self.reading,
            gloss: self.gloss,
            pos: self.pos,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub tokens: Vec<Token>,
    pub target: String,
    pub frame: FrameKind,
    #[serde(default)]
    pub hint: String,
}

impl Card {
    /// Give every draft a fresh id scoped to this card, so identical
    /// surfaces in different cards never share per-token state.
    pub fn assemble(
        id: String,
        drafts: Vec<TokenDraft>,
        target: String,
        frame: FrameKind,
        hint: String,
    ) -> Self {
        let tokens = drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| draft.into_token(format!("{id}.t{i}")))
            .collect();
        Self {
            id,
            tokens,
            target,
            frame,
            hint,
        }
    }

    /// Non-empty tokens ending in terminal punctuation, and a non-empty target.
    pub fn is_well_formed(&self) -> bool {
        !self.target.trim().is_empty()
            && self
                .tokens
                .last()
                .is_some_and(Token::is_terminal_punctuation)
    }

    pub fn token(&self, id: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    pub fn source_text(&self) -> String {
        self.tokens.iter().map(|t| t.surface.as_str()).collect()
    }
}
