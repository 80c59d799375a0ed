use super::*;
use crate::clock;
use crate::engine::{selection, session, stats};
use crate::materials;
use crate::storage::KeyValueStore;

impl PrepApp {
    pub fn select_option(&mut self, index: usize) {
        if let Some(session) = &mut self.session {
            session.select_option(index);
            self.persist_session();
        }
    }

    pub fn submit_answer(&mut self) {
        let submitted = match &mut self.session {
            Some(session) => session.submit(),
            None => false,
        };
        if submitted {
            self.persist_session();
        }
    }

    pub fn skip_question(&mut self) {
        if let Some(session) = &mut self.session {
            session.skip();
            self.persist_session();
        }
    }

    pub fn undo_skip(&mut self) {
        let undone = match &mut self.session {
            Some(session) => session.undo_skip(),
            None => false,
        };
        if undone {
            self.last_tick = None;
            self.persist_session();
        }
    }

    pub fn next_question(&mut self) {
        let finished = match &mut self.session {
            Some(session) => session.advance(),
            None => return,
        };
        if finished {
            self.finalize_session();
        } else {
            self.last_tick = None;
            self.persist_session();
        }
    }

    /// Attempt-all escape hatch: evaluate over the answers recorded so
    /// far without touching the remaining questions.
    pub fn quit_and_evaluate(&mut self) {
        let allowed = self
            .session
            .as_ref()
            .map(|s| s.can_quit_and_evaluate())
            .unwrap_or(false);
        if !allowed {
            return;
        }
        if let Some(session) = &mut self.session {
            session.finish();
        }
        self.finalize_session();
    }

    /// Derives whole-second ticks for the state machine from the egui
    /// clock. Frozen phases just re-anchor the tick origin.
    pub fn pump_timer(&mut self, now: f64) {
        let counting = self.state == AppState::Quiz
            && self
                .session
                .as_ref()
                .map(|s| s.counting_down())
                .unwrap_or(false);
        let Some(mut last) = self.last_tick else {
            self.last_tick = Some(now);
            return;
        };
        if !counting {
            self.last_tick = Some(now);
            return;
        }

        let mut ticked = false;
        if let Some(session) = &mut self.session {
            while now - last >= 1.0 {
                last += 1.0;
                session.tick();
                ticked = true;
                if !session.counting_down() {
                    break;
                }
            }
        }
        let still_counting = self
            .session
            .as_ref()
            .map(|s| s.counting_down())
            .unwrap_or(false);
        self.last_tick = Some(if still_counting { last } else { now });
        if ticked {
            self.persist_session();
        }
    }

    /// Folds the session into the cumulative stats, clears its
    /// persisted records and shows the results.
    pub(crate) fn finalize_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let results = stats::session_stats(&session, clock::now_epoch_ms());
        self.stats.record(&results);
        self.stats.save(&mut self.store);
        selection::clear_selection(&session.topic_id, &mut self.store);
        session::clear_session(&session.topic_id, &mut self.store);
        log::info!(
            "session finalized for {}: {} correct, {} incorrect, {} unattempted, score {}",
            results.topic_id,
            results.correct,
            results.incorrect,
            results.unattempted,
            results.score
        );

        self.last_results = Some(results);
        self.confirm_quit = false;
        self.state = AppState::Results;
        self.persist_app_state();
    }

    pub(crate) fn persist_session(&mut self) {
        if let Some(session) = &self.session {
            session::save_session(session, clock::now_epoch_ms(), &mut self.store);
        }
    }

    // Materials screen

    #[cfg(not(target_arch = "wasm32"))]
    pub fn refresh_materials(&mut self) {
        self.materials = materials::list_materials(std::path::Path::new("."));
        self.materials_error = None;
    }

    #[cfg(target_arch = "wasm32")]
    pub fn refresh_materials(&mut self) {
        self.materials.clear();
        self.materials_error = Some("Materials browsing is available in the desktop app.".to_owned());
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_material(&mut self, ctx: &egui::Context, url: &str) {
        match materials::resolve_material(std::path::Path::new("."), url) {
            Ok(path) => {
                self.materials_error = None;
                ctx.open_url(egui::OpenUrl::new_tab(format!(
                    "file://{}",
                    path.display()
                )));
            }
            Err(err) => {
                log::warn!("refused material request {url}: {}", err.message());
                self.materials_error = Some(err.message().to_owned());
            }
        }
    }

    pub fn add_mock_score(&mut self) {
        match materials::parse_mock_entry(&self.mock_score_input, &self.mock_total_input) {
            Ok((score, total)) => {
                self.mock_scores.push(materials::MockScore {
                    score,
                    total,
                    date_epoch_ms: clock::now_epoch_ms(),
                });
                materials::save_mock_scores(&self.mock_scores, &mut self.store);
                self.mock_score_input.clear();
                self.mock_total_input.clear();
                self.mock_input_error = None;
            }
            Err(message) => self.mock_input_error = Some(message),
        }
    }

    pub fn clear_mock_scores(&mut self) {
        self.mock_scores.clear();
        self.store.remove(storage::MOCK_PERF_KEY);
        self.mock_input_error = None;
    }
}
