use super::*;
use crate::clock;
use crate::engine::stats::SessionStats;
use crate::model::Topic;

impl PrepApp {
    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.bank.topic(topic_id)
    }

    pub fn current_topic(&self) -> Option<&Topic> {
        self.selected_topic.as_deref().and_then(|id| self.bank.topic(id))
    }

    pub fn last_attempt_for(&self, topic_id: &str) -> Option<&SessionStats> {
        self.stats.topic(topic_id).and_then(|t| t.last_attempt())
    }

    /// Attempts per UTC day for the trailing `days` days, oldest first.
    /// Drives the dashboard heatmap.
    pub fn activity_by_day(&self, days: usize) -> Vec<u32> {
        let today = clock::day_index(clock::now_epoch_ms());
        let first = today.saturating_sub(days.saturating_sub(1) as u64);
        let mut counts = vec![0u32; days];
        for topic in self.stats.topics.values() {
            for attempt in &topic.history {
                let day = clock::day_index(attempt.finished_at_epoch_ms);
                if day >= first && day <= today {
                    counts[(day - first) as usize] += attempt.attempted;
                }
            }
        }
        counts
    }
}
