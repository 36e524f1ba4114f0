use crate::bank::question::Question;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BankFilter {
    #[default]
    All,
    Unpracticed,
    Reviewed,
}

impl BankFilter {
    pub fn matches(self, question: &Question) -> bool {
        match self {
            BankFilter::All => true,
            BankFilter::Unpracticed => !question.is_practiced(),
            BankFilter::Reviewed => question.is_practiced(),
        }
    }
}

/// Questions of one subject (or all, when `subject` is None) that pass the
/// practice-state filter and contain `search` in their prompt, ignoring case.
pub fn filter_bank<'a>(
    questions: &'a [Question],
    subject: Option<&str>,
    filter: BankFilter,
    search: &str,
) -> Vec<&'a Question> {
    let needle = search.trim().to_lowercase();
    questions
        .iter()
        .filter(|q| subject.is_none_or(|s| q.subject == s))
        .filter(|q| filter.matches(q))
        .filter(|q| needle.is_empty() || q.text.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::question::sample_question;

    fn bank() -> Vec<Question> {
        let mut practiced = sample_question("p1", "Pharmacology", None);
        practiced.text = "Digoxin toxicity signs".to_string();
        let practiced = practiced.with_attempt(true);
        vec![
            practiced,
            sample_question("p2", "Pharmacology", None),
            sample_question("m1", "Medical-Surgical Nursing", None),
        ]
    }

    #[test]
    fn test_subject_scope() {
        let bank = bank();
        assert_eq!(filter_bank(&bank, Some("Pharmacology"), BankFilter::All, "").len(), 2);
        assert_eq!(filter_bank(&bank, None, BankFilter::All, "").len(), 3);
    }

    #[test]
    fn test_practice_state_filters() {
        let bank = bank();
        let unpracticed = filter_bank(&bank, None, BankFilter::Unpracticed, "");
        assert_eq!(unpracticed.len(), 2);
        let reviewed = filter_bank(&bank, None, BankFilter::Reviewed, "");
        assert_eq!(reviewed.len(), 1);
        assert_eq!(reviewed[0].id, "p1");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let bank = bank();
        let hits = filter_bank(&bank, Some("Pharmacology"), BankFilter::All, "DIGOXIN");
        assert_eq!(hits.len(), 1);
        assert!(filter_bank(&bank, None, BankFilter::All, "heparin").is_empty());
    }
}
