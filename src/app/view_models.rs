use super::*;

impl PrepApp {
    pub fn topic_cards(&self) -> Vec<TopicCardVm> {
        self.bank
            .topics
            .iter()
            .map(|topic| {
                let stats = self.stats.topic(&topic.id);
                let attempted = stats.map(|s| s.attempted).unwrap_or(0);
                TopicCardVm {
                    id: topic.id.clone(),
                    name: topic.name.clone(),
                    weightage_label: topic.weightage.label(),
                    priority: topic.priority,
                    question_count: topic.questions.len(),
                    attempted,
                    accuracy: stats.filter(|s| s.attempted > 0).map(|s| s.accuracy()),
                    has_attempts: stats.map(|s| !s.history.is_empty()).unwrap_or(false),
                }
            })
            .collect()
    }

    /// Sums every topic's aggregates the way the dashboard shows them;
    /// average time is weighted by each topic's attempted count.
    pub fn overall(&self) -> OverallVm {
        let mut overall = OverallVm {
            total_questions: self.bank.total_questions(),
            ..Default::default()
        };
        let mut total_time = 0.0;
        for stats in self.stats.topics.values() {
            if stats.attempted == 0 {
                continue;
            }
            overall.attempted += stats.attempted;
            overall.correct += stats.correct;
            overall.incorrect += stats.incorrect;
            overall.score += stats.score;
            total_time += stats.avg_time * stats.attempted as f64;
            overall.topics_with_data += 1;
        }
        if overall.attempted > 0 {
            overall.accuracy = overall.correct as f64 / overall.attempted as f64 * 100.0;
            overall.avg_time_per_question = total_time / overall.attempted as f64;
        }
        overall
    }
}
