use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generator::frame::Difficulty;
use crate::session::grade::Grade;
use crate::session::queue::PracticeQueue;

/// What is kept of a session once its queue is replaced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub finished_at: DateTime<Utc>,
    pub card_count: usize,
    pub graded: usize,
    /// Indexed by `Grade::index`.
    pub by_grade: [usize; 4],
    #[serde(default)]
    pub unknown_surfaces: BTreeSet<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl SessionSummary {
    /// `None` when nothing was graded.
    pub fn from_queue(
        queue: &PracticeQueue,
        difficulty: Difficulty,
        finished_at: DateTime<Utc>,
    ) -> Option<Self> {
        let stats = queue.stats();
        if stats.graded == 0 {
            return None;
        }

        let unknown_surfaces = queue
            .cards()
            .iter()
            .flat_map(|card| {
                queue
                    .unknown_for(&card.id)
                    .into_iter()
                    .flatten()
                    .filter_map(|id| card.token(id))
                    .map(|token| token.surface.clone())
            })
            .collect();

        Some(Self {
            finished_at,
            card_count: queue.len(),
            graded: stats.graded,
            by_grade: stats.by_grade,
            unknown_surfaces,
            difficulty,
        })
    }

    pub fn count(&self, grade: Grade) -> usize {
        self.by_grade[grade.index()]
    }

    /// Share of graded cards marked very hard, in 0.0..=1.0.
    pub fn very_hard_ratio(&self) -> f64 {
        if self.graded == 0 {
            0.0
        } else {
            self.count(Grade::VeryHard) as f64 / self.graded as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::frame::FrameKind;
    use crate::session::card::{Card, PartOfSpeech, TokenDraft};

    fn card(id: &str) -> Card {
        Card::assemble(
            id.to_string(),
            vec![
                TokenDraft::new("本", "book", PartOfSpeech::Noun),
                TokenDraft::new("です", "is", PartOfSpeech::Verb),
                TokenDraft::period(),
            ],
            "This is a book.".to_string(),
            FrameKind::CopulaDemonstrative,
            String::new(),
        )
    }

    #[test]
    fn ungraded_session_has_no_summary() {
        let queue = PracticeQueue::with_cards(vec![card("c0")]);
        assert!(SessionSummary::from_queue(&queue, Difficulty::Advanced, Utc::now()).is_none());
    }

    #[test]
    fn collects_tally_and_unknown_surfaces() {
        let mut queue = PracticeQueue::with_cards(vec![card("c0"), card("c1")]);
        queue.mark_unknown("c0.t0");
        queue.mark_unknown("c0.t1");
        queue.grade(Grade::VeryHard);
        queue.grade(Grade::Easy);

        let summary =
            SessionSummary::from_queue(&queue, Difficulty::Beginner, Utc::now()).unwrap();
        assert_eq!(summary.card_count, 2);
        assert_eq!(summary.graded, 2);
        assert_eq!(summary.count(Grade::VeryHard), 1);
        assert_eq!(summary.count(Grade::Easy), 1);
        assert_eq!(
            summary.unknown_surfaces.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["です", "本"]
        );
        assert!((summary.very_hard_ratio() - 0.5).abs() < f64::EPSILON);
    }
}
