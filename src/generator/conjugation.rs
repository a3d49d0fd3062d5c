use crate::generator::english;

/// What the verb's complement slot is and which particle marks it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Governs {
    /// `〜に` with a place: "go to the station"
    Destination,
    /// `〜で` with a place: "study at the library"
    Location,
    /// `〜を` with a noun: "read a book"
    Object,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerbForm {
    Polite,
    PoliteNegative,
    PolitePast,
    PolitePastNegative,
}

impl VerbForm {
    fn suffix(self) -> &'static str {
        match self {
            VerbForm::Polite => "ます",
            VerbForm::PoliteNegative => "ません",
            VerbForm::PolitePast => "ました",
            VerbForm::PolitePastNegative => "ませんでした",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct VerbForms {
    pub lemma: &'static str,
    /// Masu-stem, e.g. 行き for 行く.
    pub stem: &'static str,
    pub stem_reading: &'static str,
    pub english: &'static str,
    pub english_past: &'static str,
    pub governs: Governs,
}

impl VerbForms {
    /// Conjugated surface. Anything in front of the lemma in the learner's
    /// own entry (e.g. a compound noun) is kept.
    pub fn surface(&self, entry_surface: &str, form: VerbForm) -> String {
        let prefix = entry_surface.strip_suffix(self.lemma).unwrap_or_default();
        format!("{prefix}{}{}", self.stem, form.suffix())
    }

    pub fn reading(&self, entry_surface: &str, form: VerbForm) -> Option<String> {
        if entry_surface == self.lemma {
            Some(format!("{}{}", self.stem_reading, form.suffix()))
        } else {
            None
        }
    }

    /// English verb phrase agreeing with the subject.
    pub fn english(&self, form: VerbForm, first_person: bool) -> String {
        match form {
            VerbForm::Polite if first_person => self.english.to_string(),
            VerbForm::Polite => english::third_person(self.english),
            VerbForm::PoliteNegative if first_person => format!("do not {}", self.english),
            VerbForm::PoliteNegative => format!("does not {}", self.english),
            VerbForm::PolitePast => self.english_past.to_string(),
            VerbForm::PolitePastNegative => format!("did not {}", self.english),
        }
    }

    /// Gloss shown on the verb token itself.
    pub fn gloss(&self, form: VerbForm) -> String {
        match form {
            VerbForm::Polite => self.english.to_string(),
            VerbForm::PoliteNegative => format!("not {}", self.english),
            VerbForm::PolitePast => self.english_past.to_string(),
            VerbForm::PolitePastNegative => format!("did not {}", self.english),
        }
    }
}

pub static GO: VerbForms = VerbForms {
    lemma: "行く",
    stem: "行き",
    stem_reading: "いき",
    english: "go",
    english_past: "went",
    governs: Governs::Destination,
};

pub static STUDY: VerbForms = VerbForms {
    lemma: "勉強する",
    stem: "勉強し",
    stem_reading: "べんきょうし",
    english: "study",
    english_past: "studied",
    governs: Governs::Location,
};

pub static SEE: VerbForms = VerbForms {
    lemma: "見る",
    stem: "見",
    stem_reading: "み",
    english: "see",
    english_past: "saw",
    governs: Governs::Object,
};

pub static READ: VerbForms = VerbForms {
    lemma: "読む",
    stem: "読み",
    stem_reading: "よみ",
    english: "read",
    english_past: "read",
    governs: Governs::Object,
};

pub static EAT: VerbForms = VerbForms {
    lemma: "食べる",
    stem: "食べ",
    stem_reading: "たべ",
    english: "eat",
    english_past: "ate",
    governs: Governs::Object,
};

pub static VERBS: [&VerbForms; 5] = [&GO, &STUDY, &SEE, &READ, &EAT];

pub static TRANSITIVE: [&VerbForms; 3] = [&SEE, &READ, &EAT];
