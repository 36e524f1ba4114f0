use std::fs;
use std::path::Path;

use tempfile::TempDir;

use nursepro::app::App;
use nursepro::bank::Question;
use nursepro::bank::question::{NursingPhase, UNCLASSIFIED_PHASE};
use nursepro::config::Config;
use nursepro::error::StoreError;
use nursepro::session::SessionKind;
use nursepro::state::{AppState, AppView};
use nursepro::store::JsonStore;
use nursepro::store::json_store::STATE_FILE;
use nursepro::store::schema::{EXPORT_VERSION, ExportData};

fn open(dir: &Path) -> App {
    let store = JsonStore::with_base_dir(dir.to_path_buf()).unwrap();
    App::with_store(Config::default(), Some(store)).with_seed(11)
}

fn question(id: &str, subject: &str, phase: Option<NursingPhase>) -> Question {
    Question {
        id: id.to_string(),
        chapter: String::new(),
        text: format!("Prompt for {id}"),
        options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        correct_index: 1,
        explanation: "rationale".to_string(),
        subject: subject.to_string(),
        difficulty: Default::default(),
        phase,
        practiced_count: 0,
        last_result: None,
    }
}

#[test]
fn first_run_starts_from_seed_bank() {
    let dir = TempDir::new().unwrap();
    let app = open(dir.path());
    let state = app.state();
    assert_eq!(state.view, AppView::Dashboard);
    assert_eq!(state.questions.len(), 2);
    assert_eq!(state.stats.total_questions_answered, 0);
    assert!(!state.dark_mode);
}

#[test]
fn corrupt_slot_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(STATE_FILE), "not json").unwrap();
    let app = open(dir.path());
    assert_eq!(app.state(), &AppState::default());
}

#[test]
fn slot_without_question_array_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(STATE_FILE), r#"{"questions": 5, "darkMode": true}"#).unwrap();
    let app = open(dir.path());
    assert_eq!(app.state(), &AppState::default());
}

#[test]
fn progress_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = open(dir.path());
        app.add_questions(vec![question("p1", "Pharmacology", Some(NursingPhase::Planning))]);
        let mut session = app.start_session(SessionKind::Drill, Some("Pharmacology"));
        assert_eq!(session.questions.len(), 1);
        app.answer(&mut session, 1).unwrap();
        app.answer(&mut session, 0);
        app.toggle_theme();
    }

    let app = open(dir.path());
    let state = app.state();
    assert!(state.dark_mode);
    assert_eq!(state.questions.len(), 3);
    assert_eq!(state.stats.total_questions_answered, 1);
    assert_eq!(state.stats.correct_answers, 1);
    assert_eq!(state.stats.mastery_points, 15);
    assert_eq!(state.stats.subject_performance["Pharmacology"].total, 1);
    assert_eq!(state.stats.phase_performance["Planning"].correct, 1);

    let p1 = state.find_question("p1").unwrap();
    assert_eq!(p1.practiced_count, 1);
}

#[test]
fn untagged_questions_count_as_unclassified() {
    let dir = TempDir::new().unwrap();
    let mut app = open(dir.path());
    let id = app.state().questions[0].id.clone();
    app.record_answer(&id, false);

    let stats = &app.state().stats;
    assert_eq!(stats.phase_performance[UNCLASSIFIED_PHASE].total, 1);
    assert_eq!(stats.mastery_points, 2);
    let report = app.analytics();
    assert!(report.phases.iter().any(|p| p.label == UNCLASSIFIED_PHASE));
}

#[test]
fn deleting_a_missing_id_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut app = open(dir.path());
    app.add_questions(vec![
        question("a", "Pharmacology", None),
        question("b", "Pharmacology", None),
        question("c", "Community Health", None),
    ]);
    assert_eq!(app.state().questions.len(), 5);
    let before = app.state().clone();

    assert!(!app.delete_question("does-not-exist"));
    assert_eq!(app.state(), &before);

    assert!(app.delete_question("b"));
    assert_eq!(app.state().questions.len(), 4);
    assert!(app.state().find_question("b").is_none());
}

#[test]
fn colliding_ids_are_reissued() {
    let dir = TempDir::new().unwrap();
    let mut app = open(dir.path());
    app.add_questions(vec![question("seed-1", "Pharmacology", None)]);

    let state = app.state();
    assert_eq!(state.questions.len(), 3);
    let mut ids: Vec<&str> = state.questions.iter().map(|q| q.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn export_then_import_restores_everything() {
    let source_dir = TempDir::new().unwrap();
    let mut source = open(source_dir.path());
    source.add_questions(vec![question("x1", "Pediatric Nursing", Some(NursingPhase::Evaluation))]);
    source.record_answer("x1", true);
    source.toggle_theme();

    let exports = TempDir::new().unwrap();
    let path = source.export_to(exports.path()).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("nursepro_export_"));
    assert!(name.ends_with(".json"));

    let document: ExportData = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document.export_version, EXPORT_VERSION);

    let target_dir = TempDir::new().unwrap();
    let mut target = open(target_dir.path());
    target.import_file(&path).unwrap();
    assert_eq!(target.state(), source.state());

    // the import is persisted like any other mutation
    assert_eq!(open(target_dir.path()).state(), source.state());
}

#[test]
fn bare_state_document_is_importable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.json");
    fs::write(
        &path,
        r#"{
            "view": "ANALYTICS",
            "questions": [{
                "id": 7,
                "text": "Which finding is expected?",
                "options": ["a", "b", "c", "d"],
                "correctIndex": 2,
                "subject": "Community Health",
                "adpiePhase": "Assessment"
            }],
            "stats": {
                "totalQuestionsAnswered": 1,
                "correctAnswers": 1,
                "masteryPoints": 15,
                "subjectPerformance": {"Community Health": {"correct": 1, "total": 1}},
                "adpiePerformance": {"Assessment": {"correct": 1, "total": 1}}
            },
            "darkMode": true
        }"#,
    )
    .unwrap();

    let mut app = open(dir.path());
    app.import_file(&path).unwrap();
    let state = app.state();
    assert_eq!(state.view, AppView::Analytics);
    assert_eq!(state.questions[0].id, "7");
    assert_eq!(state.questions[0].phase, Some(NursingPhase::Assessment));
    assert_eq!(state.stats.phase_performance["Assessment"].total, 1);
}

#[test]
fn invalid_import_is_rejected_whole() {
    let dir = TempDir::new().unwrap();
    let mut app = open(dir.path());
    let before = app.state().clone();

    let three_options = dir.path().join("three.json");
    fs::write(
        &three_options,
        r#"{"questions": [{"id": "z", "text": "Q", "options": ["a", "b", "c"],
            "correctIndex": 0, "subject": "Pharmacology"}]}"#,
    )
    .unwrap();
    assert!(matches!(
        app.import_file(&three_options),
        Err(StoreError::InvalidImport(_))
    ));

    let inconsistent = dir.path().join("stats.json");
    fs::write(
        &inconsistent,
        r#"{"questions": [], "stats": {"totalQuestionsAnswered": 1, "correctAnswers": 4}}"#,
    )
    .unwrap();
    assert!(app.import_file(&inconsistent).is_err());

    assert!(app.import_file(&dir.path().join("missing.json")).is_err());
    assert_eq!(app.state(), &before);
}

#[test]
fn factory_reset_clears_slot() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = open(dir.path());
        let id = app.state().questions[1].id.clone();
        app.record_answer(&id, true);
        app.reset_all().unwrap();
        assert_eq!(app.state(), &AppState::default());
    }
    assert!(!dir.path().join(STATE_FILE).exists());
    assert_eq!(open(dir.path()).state(), &AppState::default());
}

#[test]
fn dashboard_reflects_practice() {
    let dir = TempDir::new().unwrap();
    let mut app = open(dir.path());
    let id = app.state().questions[0].id.clone();
    app.record_answer(&id, true);

    let summary = app.dashboard();
    assert_eq!(summary.accuracy_percent, 100);
    assert_eq!(summary.bank_size, 2);
    assert_eq!(summary.unpracticed_count, 1);
    assert_eq!(summary.mastery_points, 15);
}
