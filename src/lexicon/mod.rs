pub mod categorize;
pub mod import;
pub mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Person,
    Place,
    Object,
    Verb,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Person,
        Category::Place,
        Category::Object,
        Category::Verb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Person => "person",
            Category::Place => "place",
            Category::Object => "object",
            Category::Verb => "verb",
        }
    }

    pub fn plural_label(self) -> &'static str {
        match self {
            Category::Person => "Persons",
            Category::Place => "Places",
            Category::Object => "Objects",
            Category::Verb => "Verbs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One categorized vocabulary item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub surface: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    pub category: Category,
}

impl LexiconEntry {
    pub fn new(surface: impl Into<String>, category: Category) -> Self {
        Self {
            surface: surface.into(),
            reading: None,
            translation: None,
            category,
        }
    }

    pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
        self.reading = non_empty(reading.into());
        self
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = non_empty(translation.into());
        self
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub persons: usize,
    pub places: usize,
    pub objects: usize,
    pub verbs: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Person => self.persons,
            Category::Place => self.places,
            Category::Object => self.objects,
            Category::Verb => self.verbs,
        }
    }

    pub fn total(&self) -> usize {
        self.persons + self.places + self.objects + self.verbs
    }
}

/// Read-only snapshot handed to the sentence generator. Any of the four
/// pools may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub persons: Vec<LexiconEntry>,
    #[serde(default)]
    pub places: Vec<LexiconEntry>,
    #[serde(default)]
    pub objects: Vec<LexiconEntry>,
    #[serde(default)]
    pub verbs: Vec<LexiconEntry>,
}

impl Lexicon {
    pub fn from_entries(entries: impl IntoIterator<Item = LexiconEntry>) -> Self {
        let mut lexicon = Self::default();
        for entry in entries {
            lexicon.push(entry);
        }
        lexicon
    }

    pub fn push(&mut self, entry: LexiconEntry) {
        match entry.category {
            Category::Person => self.persons.push(entry),
            Category::Place => self.places.push(entry),
            Category::Object => self.objects.push(entry),
            Category::Verb => self.verbs.push(entry),
        }
    }

    pub fn pool(&self, category: Category) -> &[LexiconEntry] {
        match category {
            Category::Person => &self.persons,
            Category::Place => &self.places,
            Category::Object => &self.objects,
            Category::Verb => &self.verbs,
        }
    }

    /// Whether any entry in the given pools matches `pred`.
    pub fn any_in(&self, categories: &[Category], pred: impl Fn(&LexiconEntry) -> bool) -> bool {
        categories
            .iter()
            .any(|&category| self.pool(category).iter().any(&pred))
    }

    pub fn len(&self) -> usize {
        self.persons.len() + self.places.len() + self.objects.len() + self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            persons: self.persons.len(),
            places: self.places.len(),
            objects: self.objects.len(),
            verbs: self.verbs.len(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &LexiconEntry> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.pool(category).iter())
    }

    /// Small built-in vocabulary used before any import and as the
    /// sparse-lexicon fallback.
    pub fn seed() -> Self {
        Self::from_entries(
            SEED_ENTRIES
                .iter()
                .map(|&(surface, reading, translation, category)| {
                    LexiconEntry::new(surface, category)
                        .with_reading(reading)
                        .with_translation(translation)
                }),
        )
    }
}

const SEED_ENTRIES: &[(&str, &str, &str, Category)] = &[
    ("私", "わたし", "I", Category::Person),
    ("友だち", "ともだち", "friend", Category::Person),
    ("家", "いえ", "house", Category::Place),
    ("会社", "かいしゃ", "company", Category::Place),
    ("学校", "がっこう", "school", Category::Place),
    ("駅", "えき", "station", Category::Place),
    ("本", "ほん", "book", Category::Object),
    ("映画", "えいが", "movie", Category::Object),
    ("行く", "いく", "to go", Category::Verb),
    ("勉強する", "べんきょうする", "to study", Category::Verb),
    ("見る", "みる", "to see", Category::Verb),
];
