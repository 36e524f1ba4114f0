mod event;
mod tui;
mod ui;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use nursepro::app::App;
use nursepro::bank::filter::{BankFilter, filter_bank};
use nursepro::bank::subjects;
use nursepro::bank::{Difficulty, LastResult};
use nursepro::config::Config;
use nursepro::generator::gemini::GeminiGenerator;
use nursepro::generator::{GenerationRequest, QuestionGenerator};
use nursepro::session::result::format_clock;
use nursepro::state::AppView;

use event::{AppEvent, EventHandler};
use tui::{ForgeField, Notice, Prompt, Tui};
use ui::components::analytics::AnalyticsView;
use ui::components::bank_list::BankList;
use ui::components::dashboard::Dashboard;
use ui::components::forge::ForgeView;
use ui::components::menu::{MENU_ITEMS, Menu, action_for_key};
use ui::components::question_card::QuestionCard;
use ui::components::session_summary::SessionSummary;
use ui::components::settings::SettingsView;
use ui::layout::{ScreenLayout, centered_rect, hint_line};

#[derive(Parser)]
#[command(
    name = "nursepro",
    version,
    about = "Nursing exam drill trainer with progress analytics"
)]
struct Cli {
    #[arg(long, help = "Directory holding the saved state")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Directory export files are written to")]
    export_dir: Option<PathBuf>,

    #[arg(long, help = "Questions per practice drill")]
    drill_size: Option<usize>,

    #[arg(long, help = "Questions per mock exam")]
    mock_size: Option<usize>,

    #[arg(long, help = "Mock exam time limit in minutes")]
    mock_minutes: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write an export file and exit
    Export {
        #[arg(long, help = "Target directory (defaults to --export-dir)")]
        dir: Option<PathBuf>,
    },
    /// Replace the bank and statistics from an export file
    Import { file: PathBuf },
    /// Purge every question and statistic
    Reset {
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    /// List questions in the bank
    Bank {
        #[arg(long, help = "Subject id or name (e.g. pharma)")]
        subject: Option<String>,
        #[arg(long, value_enum, default_value_t = BankFilter::All)]
        filter: BankFilter,
        #[arg(long, default_value = "", help = "Case-insensitive text search")]
        search: String,
    },
    /// Generate questions without opening the interface
    Generate {
        #[arg(long, help = "Subject id or name (e.g. pharma)")]
        subject: String,
        #[arg(long, help = "Number of questions (1-20)")]
        count: Option<u32>,
        #[arg(long, value_enum, default_value_t = Difficulty::Moderate)]
        difficulty: Difficulty,
        #[arg(long, help = "Optional focus topic")]
        topic: Option<String>,
        #[arg(long, help = "Add the batch without asking")]
        yes: bool,
    },
    /// Write the effective configuration to the config file
    InitConfig,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = Config::load().context("failed to read config file")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir.to_string_lossy().to_string();
    }
    if let Some(size) = cli.drill_size {
        config.drill_size = size;
    }
    if let Some(size) = cli.mock_size {
        config.mock_size = size;
    }
    if let Some(minutes) = cli.mock_minutes {
        config.mock_minutes = minutes;
    }
    config.validate();

    let export_dir = cli
        .export_dir
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Some(Command::InitConfig) => {
            config.save()?;
            println!("Wrote {}", Config::config_path().display());
            Ok(())
        }
        Some(Command::Export { dir }) => {
            let app = App::new(config);
            let path = app.export_to(&dir.unwrap_or(export_dir))?;
            println!("Exported to {}", path.display());
            Ok(())
        }
        Some(Command::Import { file }) => {
            let mut app = App::new(config);
            app.import_file(&file)?;
            println!(
                "Imported {} questions, {} answers on record",
                app.state().questions.len(),
                app.state().stats.total_questions_answered
            );
            Ok(())
        }
        Some(Command::Reset { yes }) => {
            if !yes && !confirm("Purge knowledge bank? This action is permanent. [y/N] ")? {
                println!("Cancelled");
                return Ok(());
            }
            let mut app = App::new(config);
            app.reset_all()?;
            println!("Knowledge bank purged");
            Ok(())
        }
        Some(Command::Bank {
            subject,
            filter,
            search,
        }) => {
            let app = App::new(config);
            let subject = subject.as_deref().map(subjects::canonical_name);
            let questions = filter_bank(
                &app.state().questions,
                subject.as_deref(),
                filter,
                &search,
            );
            for q in &questions {
                let status = match q.last_result {
                    Some(LastResult::Correct) => "+",
                    Some(LastResult::Incorrect) => "x",
                    None => " ",
                };
                println!("{status} {:<40} {:<26} {}", q.id, q.subject, q.text);
            }
            println!("{} questions", questions.len());
            Ok(())
        }
        Some(Command::Generate {
            subject,
            count,
            difficulty,
            topic,
            yes,
        }) => {
            let count = count.unwrap_or(config.default_generation_count);
            let request = GenerationRequest::new(
                &subjects::canonical_name(&subject),
                count,
                difficulty,
                topic.as_deref(),
            );
            let generator = GeminiGenerator::from_config(&config)?;
            let mut app = App::new(config);
            generate_headless(&mut app, Arc::new(generator), request, yes)
        }
        None => run_terminal(Tui::new(App::new(config), export_dir)),
    }
}

fn generate_headless(
    app: &mut App,
    generator: Arc<dyn QuestionGenerator>,
    request: GenerationRequest,
    yes: bool,
) -> Result<()> {
    let subject = request.subject.clone();
    app.begin_generation(generator, request)?;

    let mut frame = 0;
    let outcome = loop {
        if let Some(outcome) = app.poll_generation() {
            break outcome;
        }
        eprint!("\r{} generating...", tui::SPINNER[frame % tui::SPINNER.len()]);
        frame += 1;
        thread::sleep(Duration::from_millis(100));
    };
    eprintln!("\r");

    let batch = outcome.map_err(|e| anyhow::anyhow!(tui::failure_message(&e)))?;
    for (i, q) in batch.questions.iter().enumerate() {
        println!("{:>2}. [{}] {}", i + 1, q.phase_key(), q.text);
    }
    if !batch.rejected.is_empty() {
        println!("{} malformed items discarded", batch.rejected.len());
    }

    if !yes && !confirm(&format!("Add {} questions to {subject}? [y/N] ", batch.questions.len()))? {
        println!("Discarded");
        return Ok(());
    }
    let added = batch.questions.len();
    app.add_questions(batch.questions);
    println!("Added {added} questions to {subject}");
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn run_terminal(mut tui: Tui) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut tui, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    tui: &mut Tui,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, tui))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(tui, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }
        tui.on_tick(Instant::now());
        tui.sync_theme();

        if tui.should_quit {
            return Ok(());
        }
    }
}

// --- Input ---

fn handle_key(tui: &mut Tui, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        tui.should_quit = true;
        return;
    }

    if tui.prompt.is_some() {
        handle_prompt_key(tui, key);
        return;
    }

    match tui.view() {
        AppView::Dashboard => handle_menu_key(tui, key),
        AppView::SubjectBank => handle_bank_key(tui, key),
        AppView::Practice | AppView::MockTest => handle_session_key(tui, key),
        AppView::Forge => handle_forge_key(tui, key),
        AppView::Analytics => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                tui.go_home();
            }
        }
        AppView::Settings => handle_settings_key(tui, key),
    }
}

fn handle_prompt_key(tui: &mut Tui, key: KeyEvent) {
    if matches!(tui.prompt, Some(Prompt::ImportPath(_))) {
        match key.code {
            KeyCode::Enter => tui.confirm_prompt(),
            KeyCode::Esc => tui.cancel_prompt(),
            KeyCode::Backspace => tui.edit_prompt(None),
            KeyCode::Char(ch) => tui.edit_prompt(Some(ch)),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => tui.confirm_prompt(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => tui.cancel_prompt(),
        _ => {}
    }
}

fn handle_menu_key(tui: &mut Tui, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => tui.should_quit = true,
        KeyCode::Char('t') => tui.app.toggle_theme(),
        KeyCode::Up | KeyCode::Char('k') => tui.menu_move(false),
        KeyCode::Down | KeyCode::Char('j') => tui.menu_move(true),
        KeyCode::Enter => {
            if let Some(item) = MENU_ITEMS.get(tui.menu_selected) {
                tui.activate_menu(item.action);
            }
        }
        KeyCode::Char(ch) => {
            if let Some(action) = action_for_key(ch) {
                tui.activate_menu(action);
            }
        }
        _ => {}
    }
}

fn handle_session_key(tui: &mut Tui, key: KeyEvent) {
    let Some((finished, exhausted)) = tui
        .session
        .as_ref()
        .map(|s| (s.is_finished(), s.is_exhausted()))
    else {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            tui.go_home();
        }
        return;
    };

    if finished {
        match key.code {
            KeyCode::Char('r') if !exhausted => {
                if tui.view() == AppView::MockTest {
                    tui.start_mock();
                } else {
                    let subject = tui.app.state().current_subject.clone();
                    tui.start_drill(subject);
                }
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => tui.go_home(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char(ch @ 'a'..='d') => tui.answer(ch as usize - 'a' as usize),
        KeyCode::Char(ch @ '1'..='4') => tui.answer(ch as usize - '1' as usize),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('n') | KeyCode::Char(' ') => {
            tui.next_question()
        }
        KeyCode::Left | KeyCode::Char('p') => tui.previous_question(),
        KeyCode::Esc => tui.end_session(),
        _ => {}
    }
}

fn handle_bank_key(tui: &mut Tui, key: KeyEvent) {
    if tui.bank.searching {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => tui.bank.searching = false,
            KeyCode::Backspace => tui.edit_search(None),
            KeyCode::Char(ch) => tui.edit_search(Some(ch)),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => tui.go_home(),
        KeyCode::Left | KeyCode::Char('h') => tui.cycle_bank_subject(false),
        KeyCode::Right | KeyCode::Char('l') => tui.cycle_bank_subject(true),
        KeyCode::Up | KeyCode::Char('k') => tui.bank_move(false),
        KeyCode::Down | KeyCode::Char('j') => tui.bank_move(true),
        KeyCode::Char('f') => tui.cycle_bank_filter(),
        KeyCode::Char('/') => tui.bank.searching = true,
        KeyCode::Char('x') | KeyCode::Delete => tui.request_delete(),
        KeyCode::Char('p') => tui.practice_bank_subject(),
        _ => {}
    }
}

fn handle_forge_key(tui: &mut Tui, key: KeyEvent) {
    if tui.preview.is_some() {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => tui.preview_move(false),
            KeyCode::Down | KeyCode::Char('j') => tui.preview_move(true),
            KeyCode::Char('x') | KeyCode::Delete => tui.drop_preview_item(),
            KeyCode::Enter => tui.commit_preview(),
            KeyCode::Esc => tui.discard_preview(),
            _ => {}
        }
        return;
    }

    let editing_topic = tui.forge.field == ForgeField::Topic;
    match key.code {
        KeyCode::Esc => tui.go_home(),
        KeyCode::Up | KeyCode::BackTab => tui.forge.field = tui.forge.field.prev(),
        KeyCode::Down | KeyCode::Tab => tui.forge.field = tui.forge.field.next(),
        KeyCode::Left => tui.forge.cycle(false),
        KeyCode::Right => tui.forge.cycle(true),
        KeyCode::Enter if tui.forge.field == ForgeField::Generate => tui.start_generation(),
        KeyCode::Enter => tui.forge.field = tui.forge.field.next(),
        KeyCode::Backspace if editing_topic => {
            tui.forge.topic.pop();
        }
        KeyCode::Char(ch) if editing_topic => tui.forge.topic.push(ch),
        KeyCode::Char('q') => tui.go_home(),
        KeyCode::Char('k') => tui.forge.field = tui.forge.field.prev(),
        KeyCode::Char('j') => tui.forge.field = tui.forge.field.next(),
        _ => {}
    }
}

fn handle_settings_key(tui: &mut Tui, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => tui.go_home(),
        KeyCode::Up | KeyCode::Char('k') => tui.settings_move(false),
        KeyCode::Down | KeyCode::Char('j') => tui.settings_move(true),
        KeyCode::Enter | KeyCode::Char(' ') => tui.activate_setting(),
        _ => {}
    }
}

// --- Rendering ---

fn view_title(view: AppView) -> &'static str {
    match view {
        AppView::Dashboard => "Dashboard",
        AppView::SubjectBank => "Subject Bank",
        AppView::Practice => "Practice Drill",
        AppView::MockTest => "Mock Exam",
        AppView::Forge => "AI Forge",
        AppView::Analytics => "Analytics",
        AppView::Settings => "Settings",
    }
}

fn view_hints(tui: &Tui) -> &'static [&'static str] {
    match tui.view() {
        AppView::Dashboard => &["[1-4/a/c] Open", "[j/k] Move", "[Enter] Select", "[t] Theme", "[q] Quit"],
        AppView::SubjectBank if tui.bank.searching => &["[Enter/Esc] Done", "[Backspace] Delete"],
        AppView::SubjectBank => &[
            "[h/l] Subject",
            "[j/k] Move",
            "[f] Filter",
            "[/] Search",
            "[p] Practice",
            "[x] Delete",
            "[Esc] Back",
        ],
        AppView::Practice | AppView::MockTest => match &tui.session {
            Some(s) if s.is_finished() && !s.is_exhausted() => &["[r] Again", "[Enter/Esc] Dashboard"],
            Some(s) if !s.is_finished() => &[
                "[a-d] Answer",
                "[Enter/n] Next",
                "[p] Previous",
                "[Esc] Finish",
            ],
            _ => &["[Esc] Back"],
        },
        AppView::Forge if tui.preview.is_some() => &["[j/k] Move", "[x] Drop", "[Enter] Add to bank", "[Esc] Discard"],
        AppView::Forge => &["[Up/Down] Field", "[Left/Right] Change", "[Enter] Generate", "[Esc] Back"],
        AppView::Analytics => &["[Esc] Back"],
        AppView::Settings => &["[j/k] Move", "[Enter] Select", "[Esc] Back"],
    }
}

fn render(frame: &mut ratatui::Frame, tui: &Tui) {
    let area = frame.area();
    let colors = &tui.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()).fg(colors.fg()));
    frame.render_widget(bg, area);

    let layout = ScreenLayout::new(area);
    render_header(frame, tui, layout.header);
    render_footer(frame, tui, layout.footer);

    match tui.view() {
        AppView::Dashboard => render_dashboard(frame, tui, layout.body),
        AppView::SubjectBank => {
            let questions = tui.bank_questions();
            let list = BankList {
                subject: tui.bank_subject(),
                filter: tui.bank.filter,
                search: &tui.bank.search,
                searching: tui.bank.searching,
                questions: &questions,
                selected: tui.bank.selected,
                theme: &tui.theme,
            };
            frame.render_widget(list, layout.body);
        }
        AppView::Practice | AppView::MockTest => render_session(frame, tui, layout.body),
        AppView::Forge => {
            let forge = ForgeView {
                form: &tui.forge,
                preview: tui.preview.as_ref(),
                busy: tui.app.generation_elapsed().map(|secs| (tui.spinner(), secs)),
                theme: &tui.theme,
            };
            frame.render_widget(forge, centered_rect(70, 90, layout.body));
        }
        AppView::Analytics => {
            let report = tui.app.analytics();
            frame.render_widget(AnalyticsView::new(&report, &tui.theme), layout.body);
        }
        AppView::Settings => {
            let data_dir = tui.app.config.data_path();
            let settings = SettingsView {
                selected: tui.settings_selected,
                dark_mode: tui.app.state().dark_mode,
                export_dir: &tui.export_dir,
                data_dir: &data_dir,
                theme: &tui.theme,
            };
            frame.render_widget(settings, centered_rect(60, 70, layout.body));
        }
    }

    if let Some(prompt) = &tui.prompt {
        render_prompt(frame, tui, prompt, area);
    }
}

fn render_header(frame: &mut ratatui::Frame, tui: &Tui, area: Rect) {
    let colors = &tui.theme.colors;
    let header_style = Style::default().fg(colors.header_fg()).bg(colors.header_bg());

    let mut spans = vec![
        Span::styled(" nursepro ", header_style.add_modifier(Modifier::BOLD)),
        Span::styled(format!("| {} ", view_title(tui.view())), header_style),
    ];
    if let Some(subject) = &tui.app.state().current_subject {
        spans.push(Span::styled(format!("| {subject} "), header_style));
    }
    if let Some(session) = &tui.session
        && !session.is_finished()
        && let Some(remaining) = session.remaining(Instant::now())
    {
        let secs = remaining.as_secs();
        let style = if secs < 60 {
            header_style.fg(colors.error()).add_modifier(Modifier::BOLD)
        } else {
            header_style.fg(colors.warning())
        };
        spans.push(Span::styled(format!("| {} left ", format_clock(secs)), style));
    }
    if let Some(elapsed) = tui.app.generation_elapsed()
        && tui.view() != AppView::Forge
    {
        spans.push(Span::styled(
            format!("| {} generating {elapsed:.0}s ", tui.spinner()),
            header_style.fg(colors.warning()),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(header_style), area);
}

fn render_footer(frame: &mut ratatui::Frame, tui: &Tui, area: Rect) {
    let colors = &tui.theme.colors;
    let line = match &tui.notice {
        Some(Notice::Info(message)) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(colors.success()),
        )),
        Some(Notice::Error(message)) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(colors.error()),
        )),
        None => Line::from(Span::styled(
            hint_line(view_hints(tui), area.width as usize),
            Style::default().fg(colors.muted()),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_dashboard(frame: &mut ratatui::Frame, tui: &Tui, area: Rect) {
    let [menu_area, summary_area] =
        Layout::horizontal([Constraint::Length(44), Constraint::Min(0)]).areas(area);

    frame.render_widget(Menu::new(tui.menu_selected, &tui.theme), menu_area);
    let summary = tui.app.dashboard();
    frame.render_widget(Dashboard::new(&summary, &tui.theme), summary_area);
}

fn render_session(frame: &mut ratatui::Frame, tui: &Tui, area: Rect) {
    let colors = &tui.theme.colors;
    let card_area = centered_rect(80, 95, area);

    if let Some(result) = &tui.last_result {
        let summary = SessionSummary::new(result, tui.session.as_ref(), &tui.theme);
        frame.render_widget(summary, card_area);
        return;
    }

    match &tui.session {
        Some(session) if !session.is_exhausted() => {
            frame.render_widget(QuestionCard::new(session, &tui.theme), card_area);
        }
        _ => {
            let message = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No questions available",
                    Style::default().fg(colors.warning()).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Generate some in the AI Forge or import an export file.",
                    Style::default().fg(colors.muted()),
                )),
            ])
            .centered()
            .block(Block::bordered().border_style(Style::default().fg(colors.border())));
            frame.render_widget(message, centered_rect(50, 30, area));
        }
    }
}

fn render_prompt(frame: &mut ratatui::Frame, tui: &Tui, prompt: &Prompt, area: Rect) {
    let colors = &tui.theme.colors;
    let (title, lines) = match prompt {
        Prompt::ConfirmDelete(id) => (
            " Delete question ",
            vec![
                Line::from(format!("Remove {id} from the bank?")),
                Line::from(Span::styled("[y] Delete  [n] Keep", Style::default().fg(colors.accent()))),
            ],
        ),
        Prompt::ConfirmReset => (
            " Factory reset ",
            vec![
                Line::from(Span::styled(
                    "Purge knowledge bank? This action is permanent.",
                    Style::default().fg(colors.error()).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled("[y] Purge  [n] Cancel", Style::default().fg(colors.accent()))),
            ],
        ),
        Prompt::ImportPath(path) => (
            " Import export file ",
            vec![
                Line::from("Path to a nursepro export (replaces everything):"),
                Line::from(Span::styled(
                    format!("{path}_"),
                    Style::default().fg(colors.accent()),
                )),
                Line::from(Span::styled("[Enter] Import  [Esc] Cancel", Style::default().fg(colors.muted()))),
            ],
        ),
    };

    let popup = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup);
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(colors.bg()).fg(colors.fg()))
        .block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(colors.accent())),
        );
    frame.render_widget(body, popup);
}
