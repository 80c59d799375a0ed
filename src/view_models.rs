// src/view_models.rs

/// Row for one topic card on the dashboard.
#[derive(Clone, Debug)]
pub struct TopicCardVm {
    pub id: String,
    pub name: String,
    pub weightage_label: &'static str,
    pub priority: u32,
    pub question_count: usize,
    pub attempted: u32,
    pub accuracy: Option<f64>,
    pub has_attempts: bool,
}

impl TopicCardVm {
    pub fn accuracy_label(&self) -> String {
        match self.accuracy {
            Some(acc) => format!("{acc:.0}%"),
            None => "-".to_owned(),
        }
    }
}

/// Aggregated header numbers for the dashboard.
#[derive(Clone, Debug, Default)]
pub struct OverallVm {
    pub attempted: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub score: i64,
    pub accuracy: f64,
    pub avg_time_per_question: f64,
    pub total_questions: usize,
    pub topics_with_data: usize,
}

impl OverallVm {
    pub fn accuracy_label(&self) -> String {
        format!("{:.1}%", self.accuracy)
    }

    pub fn avg_time_label(&self) -> String {
        format!("{:.1}s", self.avg_time_per_question)
    }

    pub fn progress_fraction(&self) -> f32 {
        if self.total_questions == 0 {
            0.0
        } else {
            (self.attempted as f32 / self.total_questions as f32).min(1.0)
        }
    }
}
