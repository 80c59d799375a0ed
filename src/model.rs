use serde::{Deserialize, Serialize};

/// Exam weightage band, as published in the topic tables.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Weightage {
    #[serde(rename = "VERY HIGH")]
    VeryHigh,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MEDIUM-HIGH")]
    MediumHigh,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "LOW-MEDIUM")]
    LowMedium,
}

impl Weightage {
    pub fn label(&self) -> &'static str {
        match self {
            Weightage::VeryHigh => "VERY HIGH",
            Weightage::High => "HIGH",
            Weightage::MediumHigh => "MEDIUM-HIGH",
            Weightage::Medium => "MEDIUM",
            Weightage::LowMedium => "LOW-MEDIUM",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub weightage: Weightage,
    pub expected_questions: String,
    pub priority: u32,
    #[serde(default)]
    pub must_study: Vec<String>,
    pub questions: Vec<Question>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuestionBank {
    pub topics: Vec<Topic>,
}

impl QuestionBank {
    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn total_questions(&self) -> usize {
        self.topics.iter().map(|t| t.questions.len()).sum()
    }
}

/// How the working set for a session is drawn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    Topic,
    Random,
    All,
}

impl Default for QuizMode {
    fn default() -> Self {
        QuizMode::Topic
    }
}

impl QuizMode {
    pub fn label(&self) -> &'static str {
        match self {
            QuizMode::Topic => "Topic Quiz",
            QuizMode::Random => "Random Order",
            QuizMode::All => "Attempt All",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppState {
    Dashboard,
    TimeSelect,
    Quiz,
    Results,
    Review,
    Materials,
    Settings,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Dashboard
    }
}
