//! One quiz session: a working set of questions driven one at a time
//! through select, submit, skip, undo-skip and advance.

use serde::{Deserialize, Serialize};

use crate::model::{Question, QuizMode, Topic};
use crate::storage::{self, KeyValueStore};

/// Where the current question stands. `Presenting` and `Selected`
/// count down; `Locked` and `Skipped` freeze the timer until advance.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Presenting,
    Selected,
    Locked,
    Skipped,
    Finished,
}

/// One entry of the append-only answer log.
///
/// Invariant: `attempted == false` implies both `selected_option_index`
/// and `is_correct` are `None`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: u32,
    pub selected_option_index: Option<usize>,
    pub is_correct: Option<bool>,
    pub time_taken_seconds: u32,
    pub attempted: bool,
}

pub struct QuizSession {
    pub topic_id: String,
    pub mode: QuizMode,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub answers: Vec<Answer>,
    pub time_per_question: u32,
    pub time_remaining: u32,
    pub selected_option: Option<usize>,
    pub phase: SessionPhase,
}

impl QuizSession {
    /// Resolves `working_set` against the topic (ids no longer present
    /// are dropped). An empty result is a session that is already
    /// complete.
    pub fn new(topic: &Topic, mode: QuizMode, working_set: &[u32], time_per_question: u32) -> Self {
        let questions: Vec<Question> = working_set
            .iter()
            .filter_map(|id| topic.questions.iter().find(|q| q.id == *id).cloned())
            .collect();
        let phase = if questions.is_empty() {
            SessionPhase::Finished
        } else {
            SessionPhase::Presenting
        };
        Self {
            topic_id: topic.id.clone(),
            mode,
            questions,
            current_index: 0,
            answers: Vec::new(),
            time_per_question,
            time_remaining: time_per_question,
            selected_option: None,
            phase,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    /// True while the countdown is live for the current question.
    pub fn counting_down(&self) -> bool {
        matches!(self.phase, SessionPhase::Presenting | SessionPhase::Selected)
    }

    pub fn awaiting_advance(&self) -> bool {
        matches!(self.phase, SessionPhase::Locked | SessionPhase::Skipped)
    }

    /// Picks an option. Free to repeat until submit/skip; the last
    /// pick wins. Ignored once the question is locked or skipped.
    pub fn select_option(&mut self, index: usize) {
        if !self.counting_down() {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        if index >= question.options.len() {
            return;
        }
        self.selected_option = Some(index);
        self.phase = SessionPhase::Selected;
    }

    /// Records the selected option and locks the question. The timer
    /// stays frozen until advance.
    pub fn submit(&mut self) -> bool {
        if self.phase != SessionPhase::Selected {
            return false;
        }
        let Some(selected) = self.selected_option else {
            return false;
        };
        let Some(question) = self.current_question() else {
            return false;
        };
        self.answers.push(Answer {
            question_id: question.id,
            selected_option_index: Some(selected),
            is_correct: Some(selected == question.correct_option),
            time_taken_seconds: self.time_per_question.saturating_sub(self.time_remaining),
            attempted: true,
        });
        self.phase = SessionPhase::Locked;
        true
    }

    /// Skips the current question, charging the full configured time.
    /// Any selection made beforehand is discarded.
    pub fn skip(&mut self) {
        if !self.counting_down() {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        self.answers.push(Answer {
            question_id: question.id,
            selected_option_index: None,
            is_correct: None,
            time_taken_seconds: self.time_per_question,
            attempted: false,
        });
        self.phase = SessionPhase::Skipped;
    }

    /// One logical second. Returns true when expiry auto-skipped the
    /// current question. Frozen phases ignore ticks, so expiry fires
    /// at most once per question.
    pub fn tick(&mut self) -> bool {
        if !self.counting_down() {
            return false;
        }
        if self.time_remaining > 1 {
            self.time_remaining -= 1;
            return false;
        }
        self.time_remaining = 0;
        self.skip();
        self.time_remaining = self.time_per_question;
        true
    }

    /// Removes the just-recorded skip for the current question and
    /// restarts its countdown.
    pub fn undo_skip(&mut self) -> bool {
        if self.phase != SessionPhase::Skipped {
            return false;
        }
        let Some(question) = self.current_question() else {
            return false;
        };
        let question_id = question.id;
        let Some(pos) = self
            .answers
            .iter()
            .rposition(|a| a.question_id == question_id && !a.attempted)
        else {
            return false;
        };
        self.answers.remove(pos);
        self.phase = SessionPhase::Presenting;
        self.selected_option = None;
        self.time_remaining = self.time_per_question;
        true
    }

    /// Moves past a locked or skipped question. Returns true when the
    /// working set is exhausted and the session must finalize.
    pub fn advance(&mut self) -> bool {
        if !self.awaiting_advance() {
            return false;
        }
        if self.current_index + 1 >= self.questions.len() {
            self.phase = SessionPhase::Finished;
            return true;
        }
        self.current_index += 1;
        self.time_remaining = self.time_per_question;
        self.selected_option = None;
        self.phase = SessionPhase::Presenting;
        false
    }

    /// Early finalize over the answers recorded so far. Only offered
    /// in attempt-all mode.
    pub fn can_quit_and_evaluate(&self) -> bool {
        self.mode == QuizMode::All
    }

    pub fn finish(&mut self) {
        self.phase = SessionPhase::Finished;
    }

    pub fn progress_fraction(&self) -> f32 {
        if self.questions.is_empty() {
            return 1.0;
        }
        (self.current_index + 1) as f32 / self.questions.len() as f32
    }
}

/// Wire form of an in-flight session, written after every transition
/// so a reload resumes exactly where the user left off.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub mode: QuizMode,
    pub working_set_ids: Vec<u32>,
    pub current_index: usize,
    pub time_remaining: u32,
    pub time_per_question: u32,
    pub selected_option_index: Option<usize>,
    pub answers: Vec<Answer>,
    pub phase: SessionPhase,
    pub saved_at_epoch_ms: u64,
}

pub fn save_session(session: &QuizSession, now_ms: u64, store: &mut dyn KeyValueStore) {
    let record = SessionRecord {
        mode: session.mode,
        working_set_ids: session.questions.iter().map(|q| q.id).collect(),
        current_index: session.current_index,
        time_remaining: session.time_remaining,
        time_per_question: session.time_per_question,
        selected_option_index: session.selected_option,
        answers: session.answers.clone(),
        phase: session.phase,
        saved_at_epoch_ms: now_ms,
    };
    storage::save_json(store, &storage::session_key(&session.topic_id), &record);
}

/// Restores an in-flight session when a compatible record exists.
///
/// Anything incompatible — mode mismatch, every referenced question
/// gone, index out of range, already finished — is treated as absent,
/// and the caller builds a fresh working set instead.
pub fn load_session(
    topic: &Topic,
    mode: QuizMode,
    fallback_time_per_question: u32,
    store: &dyn KeyValueStore,
) -> Option<QuizSession> {
    let record: SessionRecord = storage::load_json(store, &storage::session_key(&topic.id))?;
    if record.mode != mode || record.phase == SessionPhase::Finished {
        return None;
    }

    let questions: Vec<Question> = record
        .working_set_ids
        .iter()
        .filter_map(|id| topic.questions.iter().find(|q| q.id == *id).cloned())
        .collect();
    if questions.is_empty() || record.current_index >= questions.len() {
        return None;
    }

    let time_per_question = if record.time_per_question > 0 {
        record.time_per_question
    } else {
        fallback_time_per_question
    };
    let selected_option = record
        .selected_option_index
        .filter(|i| *i < questions[record.current_index].options.len());
    let phase = match record.phase {
        SessionPhase::Selected if selected_option.is_none() => SessionPhase::Presenting,
        other => other,
    };

    Some(QuizSession {
        topic_id: topic.id.clone(),
        mode,
        questions,
        current_index: record.current_index,
        answers: record.answers,
        time_per_question,
        time_remaining: record.time_remaining.min(time_per_question),
        selected_option,
        phase,
    })
}

pub fn clear_session(topic_id: &str, store: &mut dyn KeyValueStore) {
    store.remove(&storage::session_key(topic_id));
}
