use crate::model::QuestionBank;

/// Loads the question bank from the embedded YAML content tables.
pub fn read_bank_embedded() -> QuestionBank {
    let file_content = include_str!("data/question_bank.yaml");
    serde_yaml::from_str(file_content).expect("question bank YAML must parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_bank_parses_and_is_well_formed() {
        let bank = read_bank_embedded();
        assert!(!bank.topics.is_empty());
        for topic in &bank.topics {
            let mut seen = std::collections::HashSet::new();
            for q in &topic.questions {
                assert!(q.options.len() >= 2, "{}: question {} too few options", topic.id, q.id);
                assert!(
                    q.correct_option < q.options.len(),
                    "{}: question {} correct index out of range",
                    topic.id,
                    q.id
                );
                assert!(seen.insert(q.id), "{}: duplicate question id {}", topic.id, q.id);
            }
        }
    }

    #[test]
    fn at_least_one_topic_exceeds_the_subset_size() {
        let bank = read_bank_embedded();
        assert!(
            bank.topics
                .iter()
                .any(|t| t.questions.len() > crate::engine::selection::SUBSET_SIZE)
        );
    }
}
