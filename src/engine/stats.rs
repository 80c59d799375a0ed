//! Scoring: per-session results computed once at finalize, folded into
//! the cumulative per-topic aggregates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::storage::{self, KeyValueStore};

use super::session::{Answer, QuizSession};

/// Marking scheme: +4 per correct, −1 per incorrect, 0 unattempted.
pub const MARKS_CORRECT: i64 = 4;
pub const MARKS_INCORRECT: i64 = 1;

/// Results of one completed session. Stored in the topic history so
/// the review screen can replay the most recent attempt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub topic_id: String,
    pub total_questions: usize,
    pub attempted: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub unattempted: u32,
    pub score: i64,
    pub avg_time: f64,
    pub answers: Vec<Answer>,
    pub working_set_ids: Vec<u32>,
    pub finished_at_epoch_ms: u64,
}

impl SessionStats {
    pub fn accuracy(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.correct as f64 / self.attempted as f64 * 100.0
        }
    }

    pub fn max_score(&self) -> i64 {
        self.total_questions as i64 * MARKS_CORRECT
    }
}

/// Computed once, over exactly the answers recorded so far — a
/// quit-and-evaluate session simply has fewer answers than questions.
pub fn session_stats(session: &QuizSession, finished_at_epoch_ms: u64) -> SessionStats {
    let mut correct = 0u32;
    let mut incorrect = 0u32;
    let mut unattempted = 0u32;
    let mut total_time = 0u64;

    for answer in &session.answers {
        if !answer.attempted {
            unattempted += 1;
        } else if answer.is_correct == Some(true) {
            correct += 1;
        } else {
            incorrect += 1;
        }
        total_time += answer.time_taken_seconds as u64;
    }

    let avg_time = if session.answers.is_empty() {
        0.0
    } else {
        total_time as f64 / session.answers.len() as f64
    };

    SessionStats {
        topic_id: session.topic_id.clone(),
        total_questions: session.questions.len(),
        attempted: correct + incorrect,
        correct,
        incorrect,
        unattempted,
        score: MARKS_CORRECT * correct as i64 - MARKS_INCORRECT * incorrect as i64,
        avg_time,
        answers: session.answers.clone(),
        working_set_ids: session.questions.iter().map(|q| q.id).collect(),
        finished_at_epoch_ms,
    }
}

/// Cumulative aggregate across every completed session of one topic.
/// Only ever mutated by folding a finalized session in.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicStats {
    pub attempted: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub unattempted: u32,
    pub score: i64,
    pub avg_time: f64,
    #[serde(default)]
    pub history: Vec<SessionStats>,
}

impl TopicStats {
    pub fn accuracy(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.correct as f64 / self.attempted as f64 * 100.0
        }
    }

    /// Counters add; the cumulative average time is a running mean
    /// weighted by the number of sessions folded before this one.
    pub fn fold(&mut self, session: &SessionStats) {
        self.attempted += session.attempted;
        self.correct += session.correct;
        self.incorrect += session.incorrect;
        self.unattempted += session.unattempted;
        self.score += session.score;

        let prior_sessions = self.history.len() as f64;
        self.avg_time = (self.avg_time * prior_sessions + session.avg_time) / (prior_sessions + 1.0);
        self.history.push(session.clone());
    }

    pub fn last_attempt(&self) -> Option<&SessionStats> {
        self.history.last()
    }
}

/// Every topic's cumulative stats, persisted whole under the global
/// stats key.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(transparent)]
pub struct StatsBook {
    pub topics: BTreeMap<String, TopicStats>,
}

impl StatsBook {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        storage::load_json(store, storage::STATS_KEY).unwrap_or_default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        storage::save_json(store, storage::STATS_KEY, self);
    }

    pub fn topic(&self, topic_id: &str) -> Option<&TopicStats> {
        self.topics.get(topic_id)
    }

    pub fn record(&mut self, session: &SessionStats) {
        self.topics
            .entry(session.topic_id.clone())
            .or_default()
            .fold(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuizMode, Topic, Weightage};
    use crate::storage::StoreMap;

    fn topic_with(n: u32) -> Topic {
        Topic {
            id: "physics".to_owned(),
            name: "Radiology Physics".to_owned(),
            weightage: Weightage::VeryHigh,
            expected_questions: "15-20 questions".to_owned(),
            priority: 2,
            must_study: vec![],
            questions: (1..=n)
                .map(|id| Question {
                    id,
                    prompt: format!("Q{id}"),
                    options: vec!["a".to_owned(), "b".to_owned()],
                    correct_option: 0,
                    explanation: None,
                })
                .collect(),
        }
    }

    fn finished_session(correct: u32, incorrect: u32, skipped: u32, time: u32) -> QuizSession {
        let total = correct + incorrect + skipped;
        let topic = topic_with(total);
        let ids: Vec<u32> = (1..=total).collect();
        let mut s = QuizSession::new(&topic, QuizMode::All, &ids, time);
        for i in 0..total {
            if i < correct {
                s.select_option(0);
                assert!(s.submit());
            } else if i < correct + incorrect {
                s.select_option(1);
                assert!(s.submit());
            } else {
                s.skip();
            }
            s.advance();
        }
        assert!(s.is_finished());
        s
    }

    #[test]
    fn score_is_four_per_correct_minus_one_per_incorrect() {
        let s = finished_session(5, 3, 2, 30);
        let stats = session_stats(&s, 1);
        assert_eq!(stats.correct, 5);
        assert_eq!(stats.incorrect, 3);
        assert_eq!(stats.unattempted, 2);
        assert_eq!(stats.attempted, 8);
        assert_eq!(stats.score, 4 * 5 - 3);
        assert_eq!(stats.max_score(), 40);
    }

    #[test]
    fn avg_time_is_over_all_answers() {
        // instant submits take 0 s, skips charge the full 30 s
        let s = finished_session(2, 0, 2, 30);
        let stats = session_stats(&s, 1);
        assert_eq!(stats.avg_time, 60.0 / 4.0);
    }

    #[test]
    fn accuracy_is_zero_with_nothing_attempted() {
        let s = finished_session(0, 0, 3, 30);
        let stats = session_stats(&s, 1);
        assert_eq!(stats.accuracy(), 0.0);
        assert_eq!(stats.score, 0);
    }

    #[test]
    fn quit_early_scores_only_recorded_answers() {
        let topic = topic_with(20);
        let ids: Vec<u32> = (1..=20).collect();
        let mut s = QuizSession::new(&topic, QuizMode::All, &ids, 30);
        for _ in 0..5 {
            s.select_option(0);
            s.submit();
            s.advance();
        }
        s.finish();
        let stats = session_stats(&s, 1);
        assert_eq!(stats.answers.len(), 5);
        assert_eq!(stats.attempted, 5);
        assert_eq!(stats.unattempted, 0);
        assert_eq!(stats.total_questions, 20);
        assert_eq!(stats.score, 20);
    }

    #[test]
    fn fold_counts_a_session_exactly_once() {
        let mut book = StatsBook::default();
        let stats = session_stats(&finished_session(4, 1, 1, 30), 1);
        book.record(&stats);

        let topic = book.topic("physics").expect("topic recorded");
        assert_eq!(topic.attempted, 5);
        assert_eq!(topic.correct, 4);
        assert_eq!(topic.incorrect, 1);
        assert_eq!(topic.unattempted, 1);
        assert_eq!(topic.score, 15);
        assert_eq!(topic.history.len(), 1);
    }

    #[test]
    fn cumulative_avg_time_is_a_session_weighted_mean() {
        let mut topic = TopicStats::default();
        let mut first = session_stats(&finished_session(1, 0, 0, 30), 1);
        first.avg_time = 10.0;
        let mut second = session_stats(&finished_session(1, 0, 0, 30), 2);
        second.avg_time = 20.0;

        topic.fold(&first);
        assert_eq!(topic.avg_time, 10.0);
        topic.fold(&second);
        assert_eq!(topic.avg_time, 15.0);
    }

    #[test]
    fn book_round_trips_through_the_store() {
        let mut store = StoreMap::new();
        let mut book = StatsBook::default();
        book.record(&session_stats(&finished_session(2, 2, 0, 30), 7));
        book.save(&mut store);

        let reloaded = StatsBook::load(&store);
        assert_eq!(reloaded.topic("physics"), book.topic("physics"));
    }

    #[test]
    fn malformed_stats_record_loads_as_empty() {
        let mut store = StoreMap::new();
        store.set(storage::STATS_KEY, "[oops".to_owned());
        let book = StatsBook::load(&store);
        assert!(book.topics.is_empty());
    }
}
