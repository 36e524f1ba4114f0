pub const CORRECT_REWARD: u32 = 15;
pub const INCORRECT_REWARD: u32 = 2;

/// Overall accuracy the learner should sustain before sitting the exam.
pub const READINESS_TARGET_PERCENT: u32 = 85;

pub fn mastery_reward(is_correct: bool) -> u32 {
    if is_correct {
        CORRECT_REWARD
    } else {
        INCORRECT_REWARD
    }
}

/// Rounded percentage; 0 when nothing was attempted.
pub fn accuracy_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

pub fn coverage_percent(practiced: usize, count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    (practiced as f64 / count as f64 * 100.0).round() as u32
}

pub fn is_exam_ready(accuracy: u32, answered: u32) -> bool {
    answered > 0 && accuracy >= READINESS_TARGET_PERCENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_outweighs_incorrect() {
        assert!(mastery_reward(true) > mastery_reward(false));
        assert!(mastery_reward(false) > 0);
    }

    #[test]
    fn test_accuracy_rounding() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(5, 5), 100);
    }

    #[test]
    fn test_readiness_needs_attempts() {
        assert!(!is_exam_ready(100, 0));
        assert!(is_exam_ready(85, 20));
        assert!(!is_exam_ready(84, 20));
    }
}
