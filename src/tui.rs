use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use nursepro::app::App;
use nursepro::bank::filter::{BankFilter, filter_bank};
use nursepro::bank::subjects::{self, SUBJECTS};
use nursepro::bank::{Difficulty, Question};
use nursepro::error::{FailureKind, GenerationError};
use nursepro::generator::admission::AdmittedBatch;
use nursepro::generator::gemini::GeminiGenerator;
use nursepro::generator::{GenerationRequest, QuestionGenerator};
use nursepro::session::result::SessionResult;
use nursepro::session::{SessionKind, SessionState};
use nursepro::state::AppView;

use crate::ui::components::menu::{MENU_ITEMS, MenuAction};
use crate::ui::theme::Theme;

pub const COUNT_CHOICES: [u32; 3] = [5, 10, 20];
pub const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForgeField {
    Subject,
    Count,
    Difficulty,
    Topic,
    Generate,
}

impl ForgeField {
    pub const ORDER: [ForgeField; 5] = [
        ForgeField::Subject,
        ForgeField::Count,
        ForgeField::Difficulty,
        ForgeField::Topic,
        ForgeField::Generate,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

pub struct ForgeForm {
    pub subject: usize,
    pub count: u32,
    pub difficulty: Difficulty,
    pub topic: String,
    pub field: ForgeField,
}

impl ForgeForm {
    fn new(default_count: u32) -> Self {
        Self {
            subject: 0,
            count: default_count,
            difficulty: Difficulty::default(),
            topic: String::new(),
            field: ForgeField::Subject,
        }
    }

    pub fn subject_name(&self) -> &'static str {
        SUBJECTS[self.subject % SUBJECTS.len()].name
    }

    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new(
            self.subject_name(),
            self.count,
            self.difficulty,
            Some(&self.topic),
        )
    }

    /// Step the focused field's value left or right.
    pub fn cycle(&mut self, forward: bool) {
        match self.field {
            ForgeField::Subject => self.subject = step(self.subject, SUBJECTS.len(), forward),
            ForgeField::Count => {
                let current = COUNT_CHOICES
                    .iter()
                    .position(|c| *c >= self.count)
                    .unwrap_or(0);
                self.count = COUNT_CHOICES[step(current, COUNT_CHOICES.len(), forward)];
            }
            ForgeField::Difficulty => {
                let all = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard];
                let current = all.iter().position(|d| *d == self.difficulty).unwrap_or(1);
                self.difficulty = all[step(current, all.len(), forward)];
            }
            ForgeField::Topic | ForgeField::Generate => {}
        }
    }
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

/// Generated questions waiting for the learner to keep or drop them.
pub struct Preview {
    pub questions: Vec<Question>,
    pub rejected: usize,
    pub selected: usize,
}

#[derive(Default)]
pub struct BankCursor {
    pub subject: usize,
    pub filter: BankFilter,
    pub search: String,
    pub searching: bool,
    pub selected: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Modal input that takes over the keyboard until answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    ConfirmDelete(String),
    ConfirmReset,
    ImportPath(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsItem {
    Theme,
    Export,
    Import,
    Reset,
}

pub const SETTINGS_ITEMS: [SettingsItem; 4] = [
    SettingsItem::Theme,
    SettingsItem::Export,
    SettingsItem::Import,
    SettingsItem::Reset,
];

pub fn failure_message(err: &GenerationError) -> String {
    match err.kind() {
        FailureKind::Authentication => format!("Authentication failed. {err}"),
        FailureKind::RateLimited => format!("Rate limit reached. {err}"),
        FailureKind::Generic => format!("Generation failed. {err}"),
    }
}

/// View-layer state around the application container. Everything here is
/// transient; the durable part lives in `App`.
pub struct Tui {
    pub app: App,
    pub theme: Theme,
    dark_mode: Rc<Cell<bool>>,
    pub menu_selected: usize,
    pub session: Option<SessionState>,
    pub last_result: Option<SessionResult>,
    pub bank: BankCursor,
    pub forge: ForgeForm,
    pub preview: Option<Preview>,
    pub settings_selected: usize,
    pub prompt: Option<Prompt>,
    pub notice: Option<Notice>,
    pub tick: usize,
    pub export_dir: PathBuf,
    generator: Option<Arc<dyn QuestionGenerator>>,
    pub should_quit: bool,
}

impl Tui {
    pub fn new(mut app: App, export_dir: PathBuf) -> Self {
        let dark_mode = Rc::new(Cell::new(app.state().dark_mode));
        let sink = Rc::clone(&dark_mode);
        app.subscribe(move |state| sink.set(state.dark_mode));

        let forge = ForgeForm::new(app.config.default_generation_count);
        let mut tui = Self {
            theme: Theme::for_mode(dark_mode.get()),
            app,
            dark_mode,
            menu_selected: 0,
            session: None,
            last_result: None,
            bank: BankCursor::default(),
            forge,
            preview: None,
            settings_selected: 0,
            prompt: None,
            notice: None,
            tick: 0,
            export_dir,
            generator: None,
            should_quit: false,
        };
        tui.resume();
        tui
    }

    /// Use a fixed generator instead of building one from the config.
    #[cfg(test)]
    pub fn with_generator(mut self, generator: Arc<dyn QuestionGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// A restart lands on the persisted view; sessions are not persisted, so
    /// a practice or mock view starts over with a freshly sampled set.
    fn resume(&mut self) {
        let view = self.app.state().view;
        let subject = self.app.state().current_subject.clone();
        match view {
            AppView::Practice => {
                self.session = Some(self.app.start_session(SessionKind::Drill, subject.as_deref()));
            }
            AppView::MockTest => {
                self.session = Some(self.app.start_session(SessionKind::Mock, None));
            }
            AppView::SubjectBank => {
                self.bank.subject = subject
                    .as_deref()
                    .and_then(subject_index)
                    .unwrap_or(0);
            }
            _ => {}
        }
    }

    pub fn view(&self) -> AppView {
        self.app.state().view
    }

    pub fn sync_theme(&mut self) {
        let dark = self.dark_mode.get();
        if (self.theme.name == "dark") != dark {
            self.theme = Theme::for_mode(dark);
        }
    }

    pub fn spinner(&self) -> char {
        SPINNER[self.tick % SPINNER.len()]
    }

    /// Switch views. Any running session and open prompt are abandoned.
    pub fn go_to(&mut self, view: AppView, subject: Option<String>) {
        self.session = None;
        self.last_result = None;
        self.prompt = None;
        self.bank.searching = false;
        self.app.set_view(view, subject);
    }

    pub fn go_home(&mut self) {
        self.go_to(AppView::Dashboard, None);
    }

    pub fn activate_menu(&mut self, action: MenuAction) {
        self.notice = None;
        match action {
            MenuAction::Drill => self.start_drill(None),
            MenuAction::Mock => self.start_mock(),
            MenuAction::Bank => self.open_bank(self.bank.subject),
            MenuAction::Forge => self.go_to(AppView::Forge, None),
            MenuAction::Analytics => self.go_to(AppView::Analytics, None),
            MenuAction::Settings => self.go_to(AppView::Settings, None),
        }
    }

    pub fn menu_move(&mut self, forward: bool) {
        self.menu_selected = step(self.menu_selected, MENU_ITEMS.len(), forward);
    }

    // --- Sessions ---

    pub fn start_drill(&mut self, subject: Option<String>) {
        self.go_to(AppView::Practice, subject.clone());
        self.session = Some(self.app.start_session(SessionKind::Drill, subject.as_deref()));
    }

    pub fn start_mock(&mut self) {
        self.go_to(AppView::MockTest, None);
        self.session = Some(self.app.start_session(SessionKind::Mock, None));
    }

    pub fn answer(&mut self, option: usize) {
        if let Some(session) = self.session.as_mut() {
            self.app.answer(session, option);
        }
    }

    pub fn next_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.next();
        }
        self.settle_session();
    }

    pub fn previous_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.previous();
        }
    }

    pub fn end_session(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.finish();
        }
        self.settle_session();
    }

    fn settle_session(&mut self) {
        if self.last_result.is_some() {
            return;
        }
        if let Some(session) = &self.session
            && session.is_finished()
            && !session.is_exhausted()
        {
            let result = session.result();
            log::info!(
                "{} finished: {}/{} correct in {:.0}s",
                result.mode,
                result.correct,
                result.answered,
                result.elapsed_secs
            );
            self.last_result = Some(result);
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.tick = self.tick.wrapping_add(1);
        if let Some(session) = self.session.as_mut()
            && session.check_timer(now)
        {
            log::info!("mock exam ran out of time");
        }
        self.settle_session();

        if let Some(outcome) = self.app.poll_generation() {
            self.finish_generation(outcome);
        }
    }

    // --- Subject bank ---

    pub fn bank_subject(&self) -> &'static str {
        SUBJECTS[self.bank.subject % SUBJECTS.len()].name
    }

    pub fn bank_questions(&self) -> Vec<&Question> {
        filter_bank(
            &self.app.state().questions,
            Some(self.bank_subject()),
            self.bank.filter,
            &self.bank.search,
        )
    }

    pub fn open_bank(&mut self, subject: usize) {
        self.bank.subject = subject % SUBJECTS.len();
        self.bank.selected = 0;
        let name = self.bank_subject().to_string();
        self.go_to(AppView::SubjectBank, Some(name));
    }

    pub fn cycle_bank_subject(&mut self, forward: bool) {
        self.open_bank(step(self.bank.subject, SUBJECTS.len(), forward));
    }

    pub fn cycle_bank_filter(&mut self) {
        self.bank.filter = match self.bank.filter {
            BankFilter::All => BankFilter::Unpracticed,
            BankFilter::Unpracticed => BankFilter::Reviewed,
            BankFilter::Reviewed => BankFilter::All,
        };
        self.bank.selected = 0;
    }

    pub fn bank_move(&mut self, forward: bool) {
        let len = self.bank_questions().len();
        if len == 0 {
            self.bank.selected = 0;
        } else if forward {
            self.bank.selected = (self.bank.selected + 1).min(len - 1);
        } else {
            self.bank.selected = self.bank.selected.saturating_sub(1);
        }
    }

    pub fn edit_search(&mut self, ch: Option<char>) {
        match ch {
            Some(c) => self.bank.search.push(c),
            None => {
                self.bank.search.pop();
            }
        }
        self.bank.selected = 0;
    }

    pub fn practice_bank_subject(&mut self) {
        self.start_drill(Some(self.bank_subject().to_string()));
    }

    pub fn request_delete(&mut self) {
        let id = self
            .bank_questions()
            .get(self.bank.selected)
            .map(|q| q.id.clone());
        if let Some(id) = id {
            self.prompt = Some(Prompt::ConfirmDelete(id));
        }
    }

    // --- Forge ---

    pub fn start_generation(&mut self) {
        if self.app.is_generating() {
            self.notice = Some(Notice::Error(GenerationError::InFlight.to_string()));
            return;
        }
        let generator: Arc<dyn QuestionGenerator> = match self.generator.clone() {
            Some(generator) => generator,
            None => match GeminiGenerator::from_config(&self.app.config) {
                Ok(gemini) => Arc::new(gemini),
                Err(e) => {
                    self.notice = Some(Notice::Error(failure_message(&e)));
                    return;
                }
            },
        };
        match self.app.begin_generation(generator, self.forge.request()) {
            Ok(()) => {
                self.preview = None;
                self.notice = None;
            }
            Err(e) => self.notice = Some(Notice::Error(failure_message(&e))),
        }
    }

    fn finish_generation(&mut self, outcome: Result<AdmittedBatch, GenerationError>) {
        match outcome {
            Ok(batch) => {
                let rejected = batch.rejected.len();
                let mut message = format!("{} questions ready for review", batch.questions.len());
                if rejected > 0 {
                    message.push_str(&format!(", {rejected} malformed items discarded"));
                }
                self.notice = Some(Notice::Info(message));
                self.preview = Some(Preview {
                    questions: batch.questions,
                    rejected,
                    selected: 0,
                });
            }
            Err(e) => self.notice = Some(Notice::Error(failure_message(&e))),
        }
    }

    pub fn preview_move(&mut self, forward: bool) {
        if let Some(preview) = self.preview.as_mut() {
            let len = preview.questions.len();
            if len > 0 {
                preview.selected = step(preview.selected, len, forward);
            }
        }
    }

    pub fn drop_preview_item(&mut self) {
        if let Some(preview) = self.preview.as_mut()
            && preview.selected < preview.questions.len()
        {
            preview.questions.remove(preview.selected);
            preview.selected = preview.selected.min(preview.questions.len().saturating_sub(1));
        }
    }

    pub fn commit_preview(&mut self) {
        let Some(preview) = self.preview.take() else {
            return;
        };
        let count = preview.questions.len();
        if count == 0 {
            self.notice = Some(Notice::Info("Nothing to add".to_string()));
            return;
        }
        let subject = preview.questions[0].subject.clone();
        self.app.add_questions(preview.questions);
        self.notice = Some(Notice::Info(format!("Added {count} questions to {subject}")));
    }

    pub fn discard_preview(&mut self) {
        if self.preview.take().is_some() {
            self.notice = Some(Notice::Info("Generated questions discarded".to_string()));
        }
    }

    // --- Settings ---

    pub fn settings_move(&mut self, forward: bool) {
        self.settings_selected = step(self.settings_selected, SETTINGS_ITEMS.len(), forward);
    }

    pub fn activate_setting(&mut self) {
        match SETTINGS_ITEMS[self.settings_selected % SETTINGS_ITEMS.len()] {
            SettingsItem::Theme => self.app.toggle_theme(),
            SettingsItem::Export => {
                self.notice = Some(match self.app.export_to(&self.export_dir) {
                    Ok(path) => Notice::Info(format!("Exported to {}", path.display())),
                    Err(e) => Notice::Error(format!("Export failed: {e}")),
                });
            }
            SettingsItem::Import => self.prompt = Some(Prompt::ImportPath(String::new())),
            SettingsItem::Reset => self.prompt = Some(Prompt::ConfirmReset),
        }
    }

    // --- Prompts ---

    pub fn confirm_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        match prompt {
            Prompt::ConfirmDelete(id) => {
                if self.app.delete_question(&id) {
                    self.notice = Some(Notice::Info("Question deleted".to_string()));
                }
                let len = self.bank_questions().len();
                self.bank.selected = self.bank.selected.min(len.saturating_sub(1));
            }
            Prompt::ConfirmReset => match self.app.reset_all() {
                Ok(()) => {
                    self.session = None;
                    self.last_result = None;
                    self.preview = None;
                    self.bank = BankCursor::default();
                    self.notice = Some(Notice::Info("Knowledge bank purged".to_string()));
                }
                Err(e) => self.notice = Some(Notice::Error(format!("Reset failed: {e}"))),
            },
            Prompt::ImportPath(path) => {
                let path = expand_home(path.trim());
                self.notice = Some(match self.app.import_file(&path) {
                    Ok(()) => {
                        // the document's own view may name a session we never started
                        self.go_to(AppView::Settings, None);
                        self.bank = BankCursor::default();
                        Notice::Info(format!(
                            "Imported {} questions",
                            self.app.state().questions.len()
                        ))
                    }
                    Err(e) => Notice::Error(e.to_string()),
                });
            }
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn edit_prompt(&mut self, ch: Option<char>) {
        if let Some(Prompt::ImportPath(path)) = self.prompt.as_mut() {
            match ch {
                Some(c) => path.push(c),
                None => {
                    path.pop();
                }
            }
        }
    }
}

fn subject_index(name: &str) -> Option<usize> {
    let subject = subjects::find(name)?;
    SUBJECTS.iter().position(|s| s.id == subject.id)
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    Path::new(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use nursepro::config::Config;
    use nursepro::generator::RawQuestion;
    use nursepro::store::JsonStore;
    use tempfile::TempDir;

    use super::*;

    struct FixedGenerator(Result<Vec<RawQuestion>, GenerationError>);

    impl QuestionGenerator for FixedGenerator {
        fn generate(&self, _request: &GenerationRequest) -> Result<Vec<RawQuestion>, GenerationError> {
            self.0.clone()
        }
    }

    fn raw(text: &str) -> RawQuestion {
        RawQuestion {
            chapter: None,
            text: text.to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index: 2,
            explanation: "why".to_string(),
            phase: Some("Assessment".to_string()),
        }
    }

    fn make_tui(dir: &TempDir) -> Tui {
        let store = JsonStore::with_base_dir(dir.path().join("data")).unwrap();
        let app = App::with_store(Config::default(), Some(store)).with_seed(3);
        Tui::new(app, dir.path().join("exports"))
    }

    fn wait_for_generation(tui: &mut Tui) {
        for _ in 0..500 {
            tui.on_tick(Instant::now());
            if !tui.app.is_generating() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("generation never finished");
    }

    #[test]
    fn test_drill_runs_to_summary() {
        let dir = TempDir::new().unwrap();
        let mut tui = make_tui(&dir);
        tui.start_drill(None);
        assert_eq!(tui.view(), AppView::Practice);

        let len = tui.session.as_ref().unwrap().questions.len();
        assert_eq!(len, 2);
        for _ in 0..len {
            let key = tui.session.as_ref().unwrap().current().unwrap().correct_index;
            tui.answer(key);
            tui.next_question();
        }

        let result = tui.last_result.as_ref().unwrap();
        assert_eq!(result.correct, 2);
        assert_eq!(result.accuracy, 100);
        assert_eq!(tui.app.state().stats.total_questions_answered, 2);
    }

    #[test]
    fn test_leaving_a_view_drops_the_session() {
        let dir = TempDir::new().unwrap();
        let mut tui = make_tui(&dir);
        tui.start_mock();
        assert!(tui.session.is_some());
        tui.go_home();
        assert!(tui.session.is_none());
        assert_eq!(tui.view(), AppView::Dashboard);
    }

    #[test]
    fn test_restart_resumes_practice_view() {
        let dir = TempDir::new().unwrap();
        {
            let mut tui = make_tui(&dir);
            tui.start_drill(Some("Pediatric Nursing".to_string()));
        }
        let tui = make_tui(&dir);
        assert_eq!(tui.view(), AppView::Practice);
        let session = tui.session.as_ref().unwrap();
        assert_eq!(session.questions.len(), 1);
        assert_eq!(session.questions[0].subject, "Pediatric Nursing");
    }

    #[test]
    fn test_mock_timeout_produces_result() {
        let dir = TempDir::new().unwrap();
        let mut tui = make_tui(&dir);
        tui.start_mock();
        let questions = tui.session.take().unwrap().questions;
        let started = Instant::now().checked_sub(Duration::from_secs(5)).unwrap();
        tui.session = Some(SessionState::started_at(
            SessionKind::Mock,
            questions,
            Some(Duration::from_secs(1)),
            started,
        ));

        tui.on_tick(Instant::now());
        let result = tui.last_result.as_ref().unwrap();
        assert!(result.timed_out);
        assert_eq!(result.answered, 0);
    }

    #[test]
    fn test_empty_subject_gives_exhausted_session_without_result() {
        let dir = TempDir::new().unwrap();
        let mut tui = make_tui(&dir);
        tui.start_drill(Some("Pharmacology".to_string()));
        assert!(tui.session.as_ref().unwrap().is_exhausted());
        tui.next_question();
        assert!(tui.last_result.is_none());
    }

    #[test]
    fn test_preview_drop_then_commit() {
        let dir = TempDir::new().unwrap();
        let generator = Arc::new(FixedGenerator(Ok(vec![raw("Q1"), raw("Q2"), raw("Q3")])));
        let mut tui = make_tui(&dir).with_generator(generator);
        tui.go_to(AppView::Forge, None);
        tui.forge.subject = 2;
        tui.start_generation();
        wait_for_generation(&mut tui);

        assert_eq!(tui.preview.as_ref().unwrap().questions.len(), 3);
        tui.preview_move(true);
        tui.drop_preview_item();
        let kept: Vec<String> = tui
            .preview
            .as_ref()
            .unwrap()
            .questions
            .iter()
            .map(|q| q.text.clone())
            .collect();
        assert_eq!(kept, vec!["Q1", "Q3"]);

        tui.commit_preview();
        let bank = &tui.app.state().questions;
        assert_eq!(bank.len(), 4);
        assert!(bank[..2].iter().all(|q| q.subject == "Pharmacology"));
        assert!(tui.preview.is_none());
    }

    #[test]
    fn test_generation_failure_is_classified() {
        let dir = TempDir::new().unwrap();
        let generator = Arc::new(FixedGenerator(Err(GenerationError::Quota)));
        let mut tui = make_tui(&dir).with_generator(generator);
        tui.start_generation();
        wait_for_generation(&mut tui);

        match tui.notice.as_ref().unwrap() {
            Notice::Error(message) => assert!(message.starts_with("Rate limit reached")),
            other => panic!("unexpected notice {other:?}"),
        }
        assert!(tui.preview.is_none());
        assert_eq!(tui.app.state().questions.len(), 2);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut tui = make_tui(&dir);
        tui.open_bank(4);
        assert_eq!(tui.bank_subject(), "Pediatric Nursing");
        tui.request_delete();
        assert!(matches!(tui.prompt, Some(Prompt::ConfirmDelete(_))));
        tui.cancel_prompt();
        assert_eq!(tui.app.state().questions.len(), 2);

        tui.request_delete();
        tui.confirm_prompt();
        assert_eq!(tui.app.state().questions.len(), 1);
        assert!(tui.bank_questions().is_empty());
    }

    #[test]
    fn test_theme_follows_state() {
        let dir = TempDir::new().unwrap();
        let mut tui = make_tui(&dir);
        assert_eq!(tui.theme.name, "light");
        tui.settings_selected = 0;
        tui.activate_setting();
        tui.sync_theme();
        assert_eq!(tui.theme.name, "dark");
    }

    #[test]
    fn test_reset_and_export_from_settings() {
        let dir = TempDir::new().unwrap();
        let mut tui = make_tui(&dir);
        let id = tui.app.state().questions[0].id.clone();
        tui.app.record_answer(&id, true);

        tui.settings_selected = 1;
        tui.activate_setting();
        assert!(matches!(tui.notice, Some(Notice::Info(ref m)) if m.starts_with("Exported to")));

        tui.settings_selected = 3;
        tui.activate_setting();
        assert_eq!(tui.prompt, Some(Prompt::ConfirmReset));
        tui.confirm_prompt();
        assert_eq!(tui.app.state().stats.total_questions_answered, 0);
    }

    #[test]
    fn test_import_returns_to_settings() {
        let dir = TempDir::new().unwrap();
        let mut tui = make_tui(&dir);
        let path = dir.path().join("saved_mid_drill.json");
        std::fs::write(
            &path,
            r#"{
                "view": "PRACTICE",
                "questions": [{"id": "i1", "text": "Q", "options": ["a", "b", "c", "d"],
                    "correctIndex": 1, "subject": "Pharmacology"}]
            }"#,
        )
        .unwrap();

        tui.go_to(AppView::Settings, None);
        tui.prompt = Some(Prompt::ImportPath(path.to_string_lossy().to_string()));
        tui.confirm_prompt();

        assert!(matches!(tui.notice, Some(Notice::Info(ref m)) if m == "Imported 1 questions"));
        assert_eq!(tui.view(), AppView::Settings);
        assert!(tui.session.is_none());
        assert_eq!(tui.app.state().questions[0].id, "i1");
    }

    #[test]
    fn test_forge_form_cycles() {
        let mut form = ForgeForm::new(5);
        form.field = ForgeField::Count;
        form.cycle(true);
        assert_eq!(form.count, 10);
        form.cycle(false);
        form.cycle(false);
        assert_eq!(form.count, 20);

        form.field = ForgeField::Difficulty;
        form.cycle(true);
        assert_eq!(form.difficulty, Difficulty::Hard);

        form.field = ForgeField::Subject;
        form.cycle(false);
        assert_eq!(form.subject_name(), "Psychiatric Nursing");
        assert_eq!(ForgeField::Generate.next(), ForgeField::Subject);
        assert_eq!(ForgeField::Subject.prev(), ForgeField::Generate);
    }
}
