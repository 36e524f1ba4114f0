use crate::bank::question::{NursingPhase, Question, UNCLASSIFIED_PHASE};
use crate::bank::subjects::SUBJECTS;
use crate::engine::scoring;
use crate::engine::stats::{Bucket, UserStats};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectCoverage {
    pub subject: String,
    pub question_count: usize,
    pub practiced_count: usize,
    pub coverage_percent: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardSummary {
    pub accuracy_percent: u32,
    pub bank_size: usize,
    pub mastery_points: u32,
    pub unpracticed_count: usize,
    pub exam_ready: bool,
    pub coverage: Vec<SubjectCoverage>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccuracyLine {
    pub label: String,
    pub bucket: Bucket,
    pub accuracy_percent: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsReport {
    pub overall_percent: u32,
    pub subjects: Vec<AccuracyLine>,
    pub phases: Vec<AccuracyLine>,
    pub weakest_subject: Option<String>,
}

pub fn dashboard(stats: &UserStats, questions: &[Question]) -> DashboardSummary {
    let accuracy = stats.accuracy_percent();
    let coverage = SUBJECTS
        .iter()
        .map(|s| {
            let (count, practiced) = questions
                .iter()
                .filter(|q| q.subject == s.name)
                .fold((0, 0), |(c, p), q| (c + 1, p + usize::from(q.is_practiced())));
            SubjectCoverage {
                subject: s.name.to_string(),
                question_count: count,
                practiced_count: practiced,
                coverage_percent: scoring::coverage_percent(practiced, count),
            }
        })
        .collect();

    DashboardSummary {
        accuracy_percent: accuracy,
        bank_size: questions.len(),
        mastery_points: stats.mastery_points,
        unpracticed_count: questions.iter().filter(|q| !q.is_practiced()).count(),
        exam_ready: scoring::is_exam_ready(accuracy, stats.total_questions_answered),
        coverage,
    }
}

pub fn analytics(stats: &UserStats) -> AnalyticsReport {
    let line = |label: &str, bucket: Option<&Bucket>| {
        let bucket = bucket.copied().unwrap_or_default();
        AccuracyLine {
            label: label.to_string(),
            bucket,
            accuracy_percent: bucket.accuracy_percent(),
        }
    };

    let subjects = SUBJECTS
        .iter()
        .map(|s| line(s.name, stats.subject_performance.get(s.name)))
        .collect();

    let mut phases: Vec<AccuracyLine> = NursingPhase::all()
        .iter()
        .map(|p| line(p.to_key(), stats.phase_performance.get(p.to_key())))
        .collect();
    if let Some(bucket) = stats.phase_performance.get(UNCLASSIFIED_PHASE) {
        phases.push(line(UNCLASSIFIED_PHASE, Some(bucket)));
    }

    AnalyticsReport {
        overall_percent: stats.accuracy_percent(),
        subjects,
        phases,
        weakest_subject: weakest_subject(stats),
    }
}

/// Lowest-accuracy subject with at least one attempt. Ties go to the subject
/// with more attempts, then to the alphabetically first name.
pub fn weakest_subject(stats: &UserStats) -> Option<String> {
    stats
        .subject_performance
        .iter()
        .filter(|(_, b)| b.total > 0)
        .min_by(|(name_a, a), (name_b, b)| {
            // compare correct/total ratios without floating point
            let lhs = u64::from(a.correct) * u64::from(b.total);
            let rhs = u64::from(b.correct) * u64::from(a.total);
            lhs.cmp(&rhs)
                .then(b.total.cmp(&a.total))
                .then(name_a.cmp(name_b))
        })
        .map(|(name, _)| name.clone())
}
