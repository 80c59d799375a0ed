use super::*;
use crate::clock;
use crate::engine::{selection, session};

impl PrepApp {
    /// Dashboard action: pick a topic and mode, then choose the timer.
    pub fn start_quiz(&mut self, topic_id: &str, mode: QuizMode) {
        if self.bank.topic(topic_id).is_none() {
            return;
        }
        self.selected_topic = Some(topic_id.to_owned());
        self.mode = mode;
        self.state = AppState::TimeSelect;
        self.message.clear();
        self.persist_app_state();
    }

    pub fn time_selected(&mut self, seconds: u32) {
        self.time_per_question = Some(seconds);
        self.enter_quiz();
    }

    /// Restores an in-flight session for the chosen topic, or builds a
    /// fresh working set. An already-complete working set (empty topic)
    /// finalizes immediately.
    pub fn enter_quiz(&mut self) {
        let Some(topic_id) = self.selected_topic.clone() else {
            self.back_to_dashboard();
            return;
        };
        let Some(topic) = self.bank.topic(&topic_id).cloned() else {
            self.back_to_dashboard();
            return;
        };
        let Some(time_per_question) = self.time_per_question else {
            self.state = AppState::TimeSelect;
            return;
        };

        let session = session::load_session(&topic, self.mode, time_per_question, &self.store)
            .unwrap_or_else(|| {
                let now = clock::now_epoch_ms();
                let working_set = selection::build_working_set(
                    &topic,
                    self.mode,
                    &now.to_string(),
                    now,
                    &mut self.store,
                );
                QuizSession::new(&topic, self.mode, &working_set, time_per_question)
            });

        self.message.clear();
        self.last_tick = None;
        self.state = AppState::Quiz;
        if session.is_finished() {
            self.session = Some(session);
            self.finalize_session();
        } else {
            self.session = Some(session);
            self.persist_session();
            self.persist_app_state();
        }
    }

    pub fn open_review(&mut self, topic_id: &str) {
        self.selected_topic = Some(topic_id.to_owned());
        self.state = AppState::Review;
        self.message.clear();
        self.persist_app_state();
    }

    pub fn open_materials(&mut self) {
        self.refresh_materials();
        self.state = AppState::Materials;
        self.message.clear();
        self.persist_app_state();
    }

    pub fn open_settings(&mut self) {
        self.state = AppState::Settings;
        self.message.clear();
        self.persist_app_state();
    }

    /// Leaving a quiz this way is a pause, not an abort: the session
    /// record stays put and the next start resumes it.
    pub fn back_to_dashboard(&mut self) {
        self.state = AppState::Dashboard;
        self.session = None;
        self.last_results = None;
        self.confirm_quit = false;
        self.message.clear();
        self.persist_app_state();
    }

    pub(crate) fn persist_app_state(&mut self) {
        let record = AppStateRecord {
            screen: self.state,
            topic_id: self.selected_topic.clone(),
            time_per_question: self.time_per_question,
            mode: self.mode,
        };
        storage::save_json(&mut self.store, storage::APPSTATE_KEY, &record);
    }

    /// Reopens the screen the user last saw. A persisted quiz resumes
    /// its session; a results screen without one falls back to the
    /// last recorded attempt, else the dashboard.
    pub(crate) fn restore_app_state(&mut self) {
        let Some(record) =
            storage::load_json::<AppStateRecord>(&self.store, storage::APPSTATE_KEY)
        else {
            return;
        };
        self.selected_topic = record.topic_id;
        self.time_per_question = record.time_per_question;
        self.mode = record.mode;

        match record.screen {
            AppState::Quiz => {
                if self.selected_topic.is_some() && self.time_per_question.is_some() {
                    self.enter_quiz();
                }
            }
            AppState::Results => {
                let last = self
                    .selected_topic
                    .as_deref()
                    .and_then(|id| self.stats.topic(id))
                    .and_then(|t| t.last_attempt())
                    .cloned();
                match last {
                    Some(stats) => {
                        self.last_results = Some(stats);
                        self.state = AppState::Results;
                    }
                    None => self.state = AppState::Dashboard,
                }
            }
            AppState::Review if self.selected_topic.is_some() => {
                self.state = AppState::Review;
            }
            AppState::Materials => self.open_materials(),
            other @ (AppState::Dashboard | AppState::TimeSelect | AppState::Settings) => {
                self.state = other;
            }
            _ => self.state = AppState::Dashboard,
        }
    }
}
