use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::session::card::Card;
use crate::session::grade::{Grade, GradeEvent};

/// How far back a card graded very hard is pushed.
pub const VERY_HARD_REQUEUE_OFFSET: usize = 2;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub seen: usize,
    pub graded: usize,
    /// Indexed by `Grade::index`.
    pub by_grade: [usize; 4],
}

impl QueueStats {
    pub fn count(&self, grade: Grade) -> usize {
        self.by_grade[grade.index()]
    }
}

/// Presentation ring over one session's cards. Insertion order is
/// presentation order; the cursor wraps instead of running off the end.
#[derive(Clone, Debug, Default)]
pub struct PracticeQueue {
    cards: Vec<Card>,
    cursor: usize,
    revealed: bool,
    unknown_by_card: HashMap<String, BTreeSet<String>>,
    history: Vec<GradeEvent>,
    stats: QueueStats,
}

impl PracticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut queue = Self::new();
        queue.inject(cards);
        queue
    }

    /// Load a new session. Everything from the previous session is dropped,
    /// including unknown marks on cards whose ids carry over.
    pub fn inject(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.cursor = 0;
        self.revealed = false;
        self.unknown_by_card.clear();
        self.history.clear();
        self.stats = QueueStats::default();
    }

    pub fn flip(&mut self) {
        self.revealed = !self.revealed;
    }

    pub fn mark_unknown(&mut self, token_id: &str) {
        let Some(card) = self.cards.get(self.cursor) else {
            return;
        };
        self.unknown_by_card
            .entry(card.id.clone())
            .or_default()
            .insert(token_id.to_string());
    }

    pub fn is_unknown(&self, token_id: &str) -> bool {
        self.current_unknown()
            .is_some_and(|set| set.contains(token_id))
    }

    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.cards.len().max(1);
        self.revealed = false;
    }

    pub fn grade(&mut self, grade: Grade) {
        let Some(card) = self.cards.get(self.cursor) else {
            return;
        };

        let unknown_token_ids = self
            .unknown_by_card
            .get(&card.id)
            .cloned()
            .unwrap_or_default();
        self.history.push(GradeEvent {
            card_id: card.id.clone(),
            grade,
            unknown_token_ids,
            graded_at: Utc::now(),
        });
        self.stats.seen += 1;
        self.stats.graded += 1;
        self.stats.by_grade[grade.index()] += 1;

        if grade == Grade::VeryHard {
            let card = self.cards.remove(self.cursor);
            let insert_at = (self.cursor + VERY_HARD_REQUEUE_OFFSET).min(self.cards.len());
            self.cards.insert(insert_at, card);
        }

        self.advance();
    }

    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.cursor)
    }

    /// Unknown-token ids marked on the current card.
    pub fn current_unknown(&self) -> Option<&BTreeSet<String>> {
        self.current()
            .and_then(|card| self.unknown_by_card.get(&card.id))
    }

    pub fn unknown_for(&self, card_id: &str) -> Option<&BTreeSet<String>> {
        self.unknown_by_card.get(card_id)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn history(&self) -> &[GradeEvent] {
        &self.history
    }

    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::frame::FrameKind;
    use crate::session::card::{PartOfSpeech, TokenDraft};

    fn card(id: &str) -> Card {
        Card::assemble(
            id.to_string(),
            vec![
                TokenDraft::new("本", "book", PartOfSpeech::Noun),
                TokenDraft::period(),
            ],
            format!("card {id}"),
            FrameKind::CopulaDemonstrative,
            String::new(),
        )
    }

    fn queue_of(n: usize) -> PracticeQueue {
        PracticeQueue::with_cards((0..n).map(|i| card(&format!("c{i}"))).collect())
    }

    fn ids(queue: &PracticeQueue) -> Vec<String> {
        queue.cards().iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn empty_queue_operations_are_no_ops() {
        let mut queue = PracticeQueue::new();
        assert!(queue.current().is_none());
        queue.mark_unknown("x");
        assert!(!queue.is_unknown("x"));
        queue.grade(Grade::VeryHard);
        assert!(queue.history().is_empty());
        assert_eq!(queue.stats().graded, 0);
        queue.advance();
        assert_eq!(queue.cursor(), 0);
    }

    #[test]
    fn advance_wraps_around() {
        let mut queue = queue_of(3);
        queue.advance();
        queue.advance();
        assert_eq!(queue.cursor(), 2);
        queue.advance();
        assert_eq!(queue.cursor(), 0);
    }

    #[test]
    fn advance_hides_answer() {
        let mut queue = queue_of(2);
        queue.flip();
        assert!(queue.revealed());
        queue.advance();
        assert!(!queue.revealed());
    }

    #[test]
    fn flip_touches_nothing_else() {
        let mut queue = queue_of(2);
        queue.flip();
        queue.flip();
        assert!(!queue.revealed());
        assert_eq!(queue.cursor(), 0);
        assert_eq!(queue.stats(), &QueueStats::default());
    }

    #[test]
    fn very_hard_moves_card_two_places_back() {
        let mut queue = queue_of(5);
        queue.advance();
        queue.advance();
        queue.grade(Grade::VeryHard);
        assert_eq!(ids(&queue), vec!["c0", "c1", "c3", "c4", "c2"]);
        assert_eq!(queue.cursor(), 3);
    }

    #[test]
    fn very_hard_near_end_clamps_to_last_position() {
        let mut queue = queue_of(3);
        queue.advance();
        queue.advance();
        queue.grade(Grade::VeryHard);
        assert_eq!(ids(&queue), vec!["c0", "c1", "c2"]);
        assert_eq!(queue.cursor(), 0);
    }

    #[test]
    fn other_grades_keep_order() {
        for grade in [Grade::Okay, Grade::Good, Grade::Easy] {
            let mut queue = queue_of(4);
            queue.grade(grade);
            assert_eq!(ids(&queue), vec!["c0", "c1", "c2", "c3"]);
            assert_eq!(queue.cursor(), 1);
        }
    }

    #[test]
    fn grade_records_history_and_stats() {
        let mut queue = queue_of(3);
        queue.mark_unknown("c0.t0");
        queue.grade(Grade::Good);
        queue.grade(Grade::VeryHard);

        let history = queue.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].card_id, "c0");
        assert_eq!(history[0].grade, Grade::Good);
        assert!(history[0].unknown_token_ids.contains("c0.t0"));
        assert_eq!(history[1].card_id, "c1");
        assert!(history[1].unknown_token_ids.is_empty());

        assert_eq!(queue.stats().seen, 2);
        assert_eq!(queue.stats().graded, 2);
        assert_eq!(queue.stats().count(Grade::Good), 1);
        assert_eq!(queue.stats().count(Grade::VeryHard), 1);
    }

    #[test]
    fn unknown_marks_are_per_card() {
        let mut queue = queue_of(2);
        queue.mark_unknown("c0.t0");
        assert!(queue.is_unknown("c0.t0"));
        queue.advance();
        assert!(!queue.is_unknown("c0.t0"));
        queue.advance();
        assert!(queue.is_unknown("c0.t0"));
    }

    #[test]
    fn mark_unknown_is_idempotent() {
        let mut queue = queue_of(1);
        queue.mark_unknown("c0.t1");
        let once = queue.current_unknown().cloned();
        queue.mark_unknown("c0.t1");
        assert_eq!(queue.current_unknown().cloned(), once);
        assert_eq!(queue.current_unknown().map(BTreeSet::len), Some(1));
    }

    #[test]
    fn inject_resets_everything() {
        let mut queue = queue_of(3);
        queue.mark_unknown("c0.t0");
        queue.flip();
        queue.grade(Grade::Okay);

        queue.inject(vec![card("c0"), card("c9")]);
        assert_eq!(queue.cursor(), 0);
        assert!(!queue.revealed());
        assert!(!queue.is_unknown("c0.t0"));
        assert!(queue.unknown_for("c0").is_none());
        assert!(queue.history().is_empty());
        assert_eq!(queue.stats(), &QueueStats::default());
    }
}
