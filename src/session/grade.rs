use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four difficulty levels a learner can give a card. There is no fifth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Grade {
    VeryHard,
    Okay,
    Good,
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::VeryHard, Grade::Okay, Grade::Good, Grade::Easy];

    /// Number keys 1 through 4, in order of increasing ease.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Grade::VeryHard),
            '2' => Some(Grade::Okay),
            '3' => Some(Grade::Good),
            '4' => Some(Grade::Easy),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Grade::VeryHard => '1',
            Grade::Okay => '2',
            Grade::Good => '3',
            Grade::Easy => '4',
        }
    }

    pub fn index(self) -> usize {
        match self {
            Grade::VeryHard => 0,
            Grade::Okay => 1,
            Grade::Good => 2,
            Grade::Easy => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::VeryHard => "Very hard",
            Grade::Okay => "Okay",
            Grade::Good => "Good",
            Grade::Easy => "Easy",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "veryhard" | "very-hard" | "very_hard" => Ok(Grade::VeryHard),
            "2" | "okay" => Ok(Grade::Okay),
            "3" | "good" => Ok(Grade::Good),
            "4" | "easy" => Ok(Grade::Easy),
            other => Err(format!("unknown grade '{other}' (expected 1-4)")),
        }
    }
}

/// Append-only record of one grading action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeEvent {
    pub card_id: String,
    pub grade: Grade,
    pub unknown_token_ids: BTreeSet<String>,
    pub graded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_for_all_four_grades() {
        for grade in Grade::ALL {
            assert_eq!(Grade::from_key(grade.key()), Some(grade));
        }
        assert_eq!(Grade::from_key('5'), None);
        assert_eq!(Grade::from_key('0'), None);
    }

    #[test]
    fn parses_names_and_digits() {
        assert_eq!("veryHard".parse::<Grade>(), Ok(Grade::VeryHard));
        assert_eq!("easy".parse::<Grade>(), Ok(Grade::Easy));
        assert_eq!("2".parse::<Grade>(), Ok(Grade::Okay));
        assert!("again".parse::<Grade>().is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&Grade::VeryHard).unwrap();
        assert_eq!(json, "\"veryHard\"");
    }
}
