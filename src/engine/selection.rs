//! Builds the ordered working set of questions for one quiz session.

use serde::{Deserialize, Serialize};

use crate::model::{QuizMode, Topic};
use crate::storage::{self, KeyValueStore};

use super::rng::seeded_shuffle;

/// Number of questions drawn in the default topic mode.
pub const SUBSET_SIZE: usize = 10;

/// Persisted record of a reproducible topic-mode draw, so a reload
/// resumes the same subset instead of reshuffling.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRecord {
    pub ids: Vec<u32>,
    pub seed: String,
    pub created_at_epoch_ms: u64,
}

/// Builds the working set of question ids for `topic` under `mode`.
///
/// `fresh_seed` is only consumed when a new subset actually has to be
/// drawn; callers pass the current timestamp, so re-entering an
/// unfinished quiz reuses the persisted draw.
pub fn build_working_set(
    topic: &Topic,
    mode: QuizMode,
    fresh_seed: &str,
    now_ms: u64,
    store: &mut dyn KeyValueStore,
) -> Vec<u32> {
    match mode {
        QuizMode::All => topic.questions.iter().map(|q| q.id).collect(),
        QuizMode::Random => shuffled_ids(topic, fresh_seed),
        QuizMode::Topic => {
            if topic.questions.len() <= SUBSET_SIZE {
                return topic.questions.iter().map(|q| q.id).collect();
            }

            let key = storage::selection_key(&topic.id);
            if let Some(record) = storage::load_json::<SelectionRecord>(store, &key) {
                let resolved = resolve_ids(topic, &record.ids);
                if !resolved.is_empty() {
                    return resolved;
                }
            }

            let shuffled = seeded_shuffle(&topic.questions, fresh_seed);
            let ids: Vec<u32> = shuffled.iter().take(SUBSET_SIZE).map(|q| q.id).collect();
            storage::save_json(
                store,
                &key,
                &SelectionRecord {
                    ids: ids.clone(),
                    seed: fresh_seed.to_owned(),
                    created_at_epoch_ms: now_ms,
                },
            );
            ids
        }
    }
}

/// Keeps only ids still present in the topic, in the stored order.
pub fn resolve_ids(topic: &Topic, ids: &[u32]) -> Vec<u32> {
    ids.iter()
        .copied()
        .filter(|id| topic.questions.iter().any(|q| q.id == *id))
        .collect()
}

/// Cleared at session finalize so the next attempt draws fresh.
pub fn clear_selection(topic_id: &str, store: &mut dyn KeyValueStore) {
    store.remove(&storage::selection_key(topic_id));
}

#[cfg(not(target_arch = "wasm32"))]
fn shuffled_ids(topic: &Topic, _fresh_seed: &str) -> Vec<u32> {
    use rand::seq::SliceRandom;

    let mut ids: Vec<u32> = topic.questions.iter().map(|q| q.id).collect();
    ids.shuffle(&mut rand::thread_rng());
    ids
}

// No OS entropy source on the web target; a throwaway timestamp seed
// keeps the same contract (unpersisted, differs per invocation).
#[cfg(target_arch = "wasm32")]
fn shuffled_ids(topic: &Topic, fresh_seed: &str) -> Vec<u32> {
    seeded_shuffle(&topic.questions, fresh_seed)
        .iter()
        .map(|q| q.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, Weightage};
    use crate::storage::StoreMap;

    fn topic_with(n: u32) -> Topic {
        Topic {
            id: "physics".to_owned(),
            name: "Physics".to_owned(),
            weightage: Weightage::VeryHigh,
            expected_questions: "15-20 questions".to_owned(),
            priority: 1,
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

    #[test]
    fn small_topics_use_every_question_in_order() {
        let topic = topic_with(7);
        let mut store = StoreMap::new();
        let ids = build_working_set(&topic, QuizMode::Topic, "1", 1, &mut store);
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
        // nothing worth persisting for a full-topic run
        assert!(store.get(&storage::selection_key("physics")).is_none());
    }

    #[test]
    fn large_topics_draw_a_persisted_subset_of_ten() {
        let topic = topic_with(12);
        let mut store = StoreMap::new();
        let ids = build_working_set(&topic, QuizMode::Topic, "1700000000000", 1, &mut store);
        assert_eq!(ids.len(), SUBSET_SIZE);

        let record: SelectionRecord =
            storage::load_json(&store, &storage::selection_key("physics")).expect("record saved");
        assert_eq!(record.ids, ids);
        assert_eq!(record.seed, "1700000000000");
    }

    #[test]
    fn rebuilding_without_finishing_returns_the_same_subset() {
        let topic = topic_with(25);
        let mut store = StoreMap::new();
        let first = build_working_set(&topic, QuizMode::Topic, "seed-one", 1, &mut store);
        // a reload passes a different fresh seed, but the stored draw wins
        let second = build_working_set(&topic, QuizMode::Topic, "seed-two", 2, &mut store);
        assert_eq!(first, second);
    }

    #[test]
    fn clearing_the_selection_forces_a_new_draw() {
        let topic = topic_with(25);
        let mut store = StoreMap::new();
        build_working_set(&topic, QuizMode::Topic, "seed-one", 1, &mut store);
        clear_selection("physics", &mut store);
        build_working_set(&topic, QuizMode::Topic, "seed-two", 2, &mut store);

        let record: SelectionRecord =
            storage::load_json(&store, &storage::selection_key("physics")).expect("record saved");
        assert_eq!(record.seed, "seed-two");
    }

    #[test]
    fn vanished_ids_are_dropped_on_restore() {
        let topic = topic_with(12);
        let mut store = StoreMap::new();
        storage::save_json(
            &mut store,
            &storage::selection_key("physics"),
            &SelectionRecord {
                ids: vec![3, 99, 5, 100],
                seed: "old".to_owned(),
                created_at_epoch_ms: 1,
            },
        );
        let ids = build_working_set(&topic, QuizMode::Topic, "unused", 2, &mut store);
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn fully_vanished_selection_falls_back_to_a_fresh_draw() {
        let topic = topic_with(12);
        let mut store = StoreMap::new();
        storage::save_json(
            &mut store,
            &storage::selection_key("physics"),
            &SelectionRecord {
                ids: vec![98, 99],
                seed: "old".to_owned(),
                created_at_epoch_ms: 1,
            },
        );
        let ids = build_working_set(&topic, QuizMode::Topic, "new", 2, &mut store);
        assert_eq!(ids.len(), SUBSET_SIZE);
        assert!(ids.iter().all(|id| (1..=12).contains(id)));
    }

    #[test]
    fn all_mode_keeps_topic_order_and_persists_nothing() {
        let topic = topic_with(20);
        let mut store = StoreMap::new();
        let ids = build_working_set(&topic, QuizMode::All, "1", 1, &mut store);
        assert_eq!(ids, (1..=20).collect::<Vec<u32>>());
        assert!(store.get(&storage::selection_key("physics")).is_none());
    }

    #[test]
    fn random_mode_persists_nothing() {
        let topic = topic_with(20);
        let mut store = StoreMap::new();
        let ids = build_working_set(&topic, QuizMode::Random, "1", 1, &mut store);
        assert_eq!(ids.len(), 20);
        let mut sorted = ids;
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=20).collect::<Vec<u32>>());
        assert!(store.get(&storage::selection_key("physics")).is_none());
    }

    #[test]
    fn empty_topic_yields_empty_working_set() {
        let topic = topic_with(0);
        let mut store = StoreMap::new();
        assert!(build_working_set(&topic, QuizMode::Topic, "1", 1, &mut store).is_empty());
        assert!(build_working_set(&topic, QuizMode::All, "1", 1, &mut store).is_empty());
    }
}
