use serde::{Deserialize, Serialize};

use crate::data::read_bank_embedded;
use crate::engine::session::QuizSession;
use crate::engine::stats::{SessionStats, StatsBook};
use crate::materials::{MaterialEntry, MockScore};
use crate::model::{AppState, QuestionBank, QuizMode};
use crate::storage::{self, StoreMap};

// Submodules
pub mod actions;
pub mod navigation;
pub mod queries;
pub mod resets;
pub mod view_models;

// Re-export of view models
pub use crate::view_models::{OverallVm, TopicCardVm};

/// Per-question time choices offered before a quiz starts, in seconds.
pub const TIME_OPTIONS: [u32; 4] = [30, 60, 180, 300];

/// Screen plus quiz parameters, persisted so the app reopens where the
/// user left off.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AppStateRecord {
    pub screen: AppState,
    pub topic_id: Option<String>,
    pub time_per_question: Option<u32>,
    pub mode: QuizMode,
}

pub struct PrepApp {
    pub bank: QuestionBank,
    pub store: StoreMap,
    pub stats: StatsBook,

    pub state: AppState,
    pub selected_topic: Option<String>,
    pub time_per_question: Option<u32>,
    pub mode: QuizMode,

    pub session: Option<QuizSession>,
    pub last_results: Option<SessionStats>,
    pub message: String,

    // UI flags, never persisted
    pub confirm_reset: bool,
    pub confirm_quit: bool,
    pub heatmap_open: bool,

    // materials screen state
    pub materials: Vec<MaterialEntry>,
    pub materials_error: Option<String>,
    pub mock_scores: Vec<MockScore>,
    pub mock_score_input: String,
    pub mock_total_input: String,
    pub mock_input_error: Option<String>,

    // countdown bookkeeping against the egui clock
    pub(crate) last_tick: Option<f64>,
}

impl PrepApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let bank = read_bank_embedded();
        let store = match cc.storage {
            Some(backend) => StoreMap::from_storage(backend, known_keys(&bank)),
            None => StoreMap::new(),
        };
        Self::from_parts(bank, store)
    }

    /// Storage-injected constructor; tests drive the app against a
    /// plain in-memory store.
    pub fn from_parts(bank: QuestionBank, store: StoreMap) -> Self {
        let stats = StatsBook::load(&store);
        let mock_scores = crate::materials::load_mock_scores(&store);
        let mut app = Self {
            bank,
            store,
            stats,
            state: AppState::Dashboard,
            selected_topic: None,
            time_per_question: None,
            mode: QuizMode::Topic,
            session: None,
            last_results: None,
            message: String::new(),
            confirm_reset: false,
            confirm_quit: false,
            heatmap_open: false,
            materials: Vec::new(),
            materials_error: None,
            mock_scores,
            mock_score_input: String::new(),
            mock_total_input: String::new(),
            mock_input_error: None,
            last_tick: None,
        };
        app.restore_app_state();
        app
    }
}

/// Every key the app may have written; the backend is only read for
/// these at startup.
pub(crate) fn known_keys(bank: &QuestionBank) -> Vec<String> {
    let mut keys = vec![
        storage::STATS_KEY.to_owned(),
        storage::APPSTATE_KEY.to_owned(),
        storage::MOCK_PERF_KEY.to_owned(),
    ];
    for topic in &bank.topics {
        keys.push(storage::session_key(&topic.id));
        keys.push(storage::selection_key(&topic.id));
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::selection::SUBSET_SIZE;
    use crate::storage::KeyValueStore;

    fn fresh_app() -> PrepApp {
        PrepApp::from_parts(read_bank_embedded(), StoreMap::new())
    }

    fn answer_current(app: &mut PrepApp) {
        app.select_option(0);
        app.submit_answer();
        app.next_question();
    }

    #[test]
    fn full_topic_quiz_folds_into_stats_and_clears_records() {
        let mut app = fresh_app();
        app.start_quiz("radiology_physics", QuizMode::Topic);
        assert_eq!(app.state, AppState::TimeSelect);
        app.time_selected(30);
        assert_eq!(app.state, AppState::Quiz);
        // the 14-question topic draws a persisted subset of ten
        assert!(
            app.store
                .get(&storage::selection_key("radiology_physics"))
                .is_some()
        );

        for _ in 0..SUBSET_SIZE {
            assert_eq!(app.state, AppState::Quiz);
            answer_current(&mut app);
        }

        assert_eq!(app.state, AppState::Results);
        let results = app.last_results.as_ref().expect("results available");
        assert_eq!(results.total_questions, SUBSET_SIZE);
        assert_eq!(results.attempted, SUBSET_SIZE as u32);
        let folded = app.stats.topic("radiology_physics").expect("stats folded");
        assert_eq!(folded.history.len(), 1);
        assert!(
            app.store
                .get(&storage::session_key("radiology_physics"))
                .is_none()
        );
        assert!(
            app.store
                .get(&storage::selection_key("radiology_physics"))
                .is_none()
        );
    }

    #[test]
    fn interrupted_quiz_resumes_where_it_left_off() {
        let mut first = fresh_app();
        first.start_quiz("radiology_physics", QuizMode::Topic);
        first.time_selected(60);
        for _ in 0..3 {
            answer_current(&mut first);
        }
        let expected: Vec<u32> = first
            .session
            .as_ref()
            .expect("live session")
            .questions
            .iter()
            .map(|q| q.id)
            .collect();

        // a relaunch rebuilds the app from the same store
        let resumed = PrepApp::from_parts(read_bank_embedded(), first.store);
        assert_eq!(resumed.state, AppState::Quiz);
        let session = resumed.session.as_ref().expect("session restored");
        assert_eq!(session.current_index, 3);
        assert_eq!(session.answers.len(), 3);
        assert_eq!(session.time_per_question, 60);
        let restored: Vec<u32> = session.questions.iter().map(|q| q.id).collect();
        assert_eq!(restored, expected);
    }

    #[test]
    fn reset_wipes_stats_and_records() {
        let mut app = fresh_app();
        app.start_quiz("contrast_media", QuizMode::All);
        app.time_selected(30);
        let mut guard = 0;
        while app.state == AppState::Quiz && guard < 50 {
            answer_current(&mut app);
            guard += 1;
        }
        assert_eq!(app.state, AppState::Results);
        assert!(app.stats.topic("contrast_media").is_some());

        app.reset_all_progress();
        assert!(app.stats.topic("contrast_media").is_none());
        assert!(app.store.get(storage::STATS_KEY).is_none());
        assert!(app.last_results.is_none());
    }
}
