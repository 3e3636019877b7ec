use std::fmt::Display;
use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use log::{debug, warn};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::db::{BookStore, ReaderStore, Repository};
use crate::models::{Book, Reader, RecordId};

use super::forms::{BookForm, FormView, IdForm, IdPurpose, ReaderForm};
use super::helpers::{centered_rect, form_line, surface_error};
use super::screens::{
    MainChoice, MenuState, Results, Section, SectionAction, SectionScreen, MAIN_MENU,
};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the action menu on the books and readers screens.
const SECTION_MENU_WIDTH: u16 = 30;

/// High-level navigation states.
enum Screen {
    Main(MenuState),
    Books(SectionScreen<Book>),
    Readers(SectionScreen<Reader>),
}

impl Screen {
    fn main() -> Self {
        Screen::Main(MenuState::new(MAIN_MENU.len()))
    }

    fn section(&self) -> Option<Section> {
        match self {
            Screen::Main(_) => None,
            Screen::Books(screen) => Some(screen.section),
            Screen::Readers(screen) => Some(screen.section),
        }
    }

    fn menu_mut(&mut self) -> &mut MenuState {
        match self {
            Screen::Main(menu) => menu,
            Screen::Books(screen) => &mut screen.menu,
            Screen::Readers(screen) => &mut screen.menu,
        }
    }
}

/// Popups layered over the current screen.
enum Mode {
    Normal,
    AddingBook(BookForm),
    AddingReader(ReaderForm),
    PromptingId(IdForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Thin dispatcher between the keyboard and the two stores. It owns no
/// catalog data of its own beyond what the last listing or lookup returned.
pub struct App {
    books: BookStore,
    readers: ReaderStore,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(books: BookStore, readers: ReaderStore) -> Self {
        Self {
            books,
            readers,
            screen: Screen::main(),
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Route one key press. Returns `true` once the user asked to exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::AddingReader(form) => self.handle_add_reader(code, form)?,
            Mode::PromptingId(form) => self.handle_id_prompt(code, form)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let menu = self.screen.menu_mut();
        let index = match code {
            KeyCode::Char('q') => {
                *exit = true;
                return Ok(Mode::Normal);
            }
            KeyCode::Up => {
                menu.move_selection(-1);
                return Ok(Mode::Normal);
            }
            KeyCode::Down => {
                menu.move_selection(1);
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => menu.selected,
            // Exit and Back are always the last entry.
            KeyCode::Esc => menu.len() - 1,
            KeyCode::Char(ch) => match ch.to_digit(10) {
                Some(n) if n >= 1 && (n as usize) <= menu.len() => {
                    menu.selected = n as usize - 1;
                    menu.selected
                }
                _ => {
                    self.set_status("Invalid choice. Try again.", StatusKind::Error);
                    return Ok(Mode::Normal);
                }
            },
            _ => return Ok(Mode::Normal),
        };

        match self.screen.section() {
            None => {
                match MainChoice::from_index(index) {
                    Some(MainChoice::Books) => self.open_section(Section::Books),
                    Some(MainChoice::Readers) => self.open_section(Section::Readers),
                    Some(MainChoice::Exit) => *exit = true,
                    None => {}
                }
                Ok(Mode::Normal)
            }
            Some(section) => match SectionAction::from_index(index) {
                Some(action) => Ok(self.run_section_action(section, action)),
                None => Ok(Mode::Normal),
            },
        }
    }

    fn open_section(&mut self, section: Section) {
        self.clear_status();
        self.screen = match section {
            Section::Books => Screen::Books(SectionScreen::new(section)),
            Section::Readers => Screen::Readers(SectionScreen::new(section)),
        };
    }

    fn run_section_action(&mut self, section: Section, action: SectionAction) -> Mode {
        self.clear_status();
        match action {
            SectionAction::Add => match section {
                Section::Books => Mode::AddingBook(BookForm::default()),
                Section::Readers => Mode::AddingReader(ReaderForm::default()),
            },
            SectionAction::Find => Mode::PromptingId(IdForm::new(section, IdPurpose::Find)),
            SectionAction::Remove => Mode::PromptingId(IdForm::new(section, IdPurpose::Remove)),
            SectionAction::ShowAll => {
                match self.show_all() {
                    Ok(count) => {
                        let noun = section.title().to_lowercase();
                        if count == 0 {
                            self.set_status(format!("No {noun} in the catalog."), StatusKind::Info);
                        } else {
                            self.set_status(format!("Showing {count} {noun}."), StatusKind::Info);
                        }
                    }
                    Err(err) => {
                        warn!("event=ui_list module=ui status=error error={err:#}");
                        self.set_status(surface_error(&err), StatusKind::Error);
                    }
                }
                Mode::Normal
            }
            SectionAction::Back => {
                self.screen = Screen::main();
                Mode::Normal
            }
        }
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&mut form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    debug!("event=ui_add_book module=ui status=rejected error={err:#}");
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_add_reader(&mut self, code: KeyCode, mut form: ReaderForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add reader cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_reader(&mut form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    debug!("event=ui_add_reader module=ui status=rejected error={err:#}");
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingReader(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_id_prompt(&mut self, code: KeyCode, mut form: IdForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.clear_status();
                keep_open = false;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.submit_id(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                } else {
                    form.error = Some("An ID contains digits only.".to_string());
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::PromptingId(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn save_new_book(&mut self, form: &mut BookForm) -> Result<()> {
        let draft = form.parse_inputs()?;
        let id = self.books.add(&draft).context("failed to add book")?;
        self.refresh_after_write(format!("Added book {id}"));
        Ok(())
    }

    fn save_new_reader(&mut self, form: &mut ReaderForm) -> Result<()> {
        let draft = form.parse_inputs()?;
        let id = self.readers.add(&draft).context("failed to add reader")?;
        self.refresh_after_write(format!("Added reader {id}"));
        Ok(())
    }

    fn submit_id(&mut self, form: &IdForm) -> Result<()> {
        let id = form.parse_id()?;
        match form.purpose {
            IdPurpose::Find => self.find_record(form.section, id),
            IdPurpose::Remove => self.remove_record(form.section, id),
        }
    }

    fn find_record(&mut self, section: Section, id: RecordId) -> Result<()> {
        let found = match &mut self.screen {
            Screen::Books(screen) => screen.show_lookup(id, self.books.get_by_id(id)?),
            Screen::Readers(screen) => screen.show_lookup(id, self.readers.get_by_id(id)?),
            Screen::Main(_) => return Ok(()),
        };

        if found {
            self.set_status(format!("Found {} {id}.", section.noun()), StatusKind::Info);
        } else {
            self.set_status(
                format!("{} with ID '{id}' not found.", section.kind()),
                StatusKind::Error,
            );
        }
        Ok(())
    }

    /// Deletion does not check for existence first, so a missing id still
    /// reports success.
    fn remove_record(&mut self, section: Section, id: RecordId) -> Result<()> {
        match section {
            Section::Books => self.books.remove(id)?,
            Section::Readers => self.readers.remove(id)?,
        }
        self.refresh_after_write(format!("{} removed", section.kind()));
        Ok(())
    }

    /// The write has already committed, so a failed reload must not send the
    /// user back into the form; it only downgrades the status line.
    fn refresh_after_write(&mut self, done: String) {
        match self.show_all() {
            Ok(_) => self.set_status(format!("{done}."), StatusKind::Info),
            Err(err) => {
                warn!("event=ui_list module=ui status=error error={err:#}");
                self.set_status(
                    format!("{done}; listing refresh failed: {}", surface_error(&err)),
                    StatusKind::Error,
                );
            }
        }
    }

    /// Reload the listing for the active section and return its size.
    fn show_all(&mut self) -> Result<usize> {
        let count = match &mut self.screen {
            Screen::Books(screen) => screen.show_listing(self.books.get_all()?),
            Screen::Readers(screen) => screen.show_listing(self.readers.get_all()?),
            Screen::Main(_) => 0,
        };
        Ok(count)
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Main(menu) => {
                let menu_area = centered_rect(50, 60, content_area);
                let labels = MAIN_MENU.map(String::from);
                draw_menu(frame, menu_area, "Library Catalog", &labels, menu.selected);
            }
            Screen::Books(screen) => self.draw_section(frame, content_area, screen),
            Screen::Readers(screen) => self.draw_section(frame, content_area, screen),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_form(frame, area, "Add Book", form),
            Mode::AddingReader(form) => self.draw_form(frame, area, "Add Reader", form),
            Mode::PromptingId(form) => self.draw_form(frame, area, &form.title(), form),
            Mode::Normal => {}
        }
    }

    fn draw_section<R: Display>(&self, frame: &mut Frame, area: Rect, screen: &SectionScreen<R>) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SECTION_MENU_WIDTH), Constraint::Min(0)])
            .split(area);

        let labels = screen.section.menu_labels();
        draw_menu(
            frame,
            chunks[0],
            screen.section.title(),
            &labels,
            screen.menu.selected,
        );

        let block = Block::default().title("Results").borders(Borders::ALL);
        let paragraph = Paragraph::new(result_lines(screen.section, &screen.results))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::AddingBook(_)) | (_, Mode::AddingReader(_)) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::PromptingId(_)) => Line::from(vec![
                Span::styled("[0-9]", key_style),
                Span::raw(" ID   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Submit   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Screen::Main(_), Mode::Normal) => Line::from(vec![
                Span::styled("[1-3]", key_style),
                Span::raw(" Choose   "),
                Span::styled("[↑↓ Enter]", key_style),
                Span::raw(" Select   "),
                Span::styled("[q/Esc]", key_style),
                Span::raw(" Quit"),
            ]),
            (_, Mode::Normal) => Line::from(vec![
                Span::styled("[1-5]", key_style),
                Span::raw(" Choose   "),
                Span::styled("[↑↓ Enter]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &dyn FormView) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let fields = form.fields();
        let mut lines: Vec<Line<'static>> = fields.iter().map(form_line).collect();
        lines.push(Line::from(""));

        if let Some(error) = form.error() {
            lines.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if let Some((row, field)) = fields.iter().enumerate().find(|(_, field)| field.active) {
            let prefix = format!("{}: ", field.label).len() as u16;
            frame.set_cursor_position((
                inner.x + prefix + field.value.chars().count() as u16,
                inner.y + row as u16,
            ));
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Numbered menu with the current entry highlighted.
fn draw_menu(frame: &mut Frame, area: Rect, title: &str, labels: &[String], selected: usize) {
    let items: Vec<ListItem> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| ListItem::new(format!("{}. {label}", idx + 1)))
        .collect();

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn result_lines<R: Display>(section: Section, results: &Results<R>) -> Vec<Line<'static>> {
    let plural = section.title().to_lowercase();
    match results {
        Results::Empty => vec![Line::from(Span::styled(
            format!("Press 3 to list all {plural}."),
            Style::default().fg(Color::DarkGray),
        ))],
        Results::Listing(records) if records.is_empty() => {
            vec![Line::from(format!("No {plural} in the catalog."))]
        }
        Results::Listing(records) => records
            .iter()
            .map(|record| Line::from(record.to_string()))
            .collect(),
        Results::Found(record) => vec![
            Line::from(format!("Found {}:", section.noun())),
            Line::from(record.to_string()),
        ],
        Results::NotFound(id) => vec![Line::from(Span::styled(
            format!("{} with ID '{id}' not found.", section.kind()),
            Style::default().fg(Color::Red),
        ))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::TempDir;

    fn test_app() -> (TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("library.db"));
        let books = BookStore::open(db.clone()).unwrap();
        let readers = ReaderStore::open(db).unwrap();
        (dir, App::new(books, readers))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(code).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn status_text(app: &App) -> Option<&str> {
        app.status.as_ref().map(|status| status.text.as_str())
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn add_book_flow_persists_validated_input() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('1'));
        assert!(matches!(app.mode, Mode::AddingBook(_)));

        type_text(&mut app, "Dune");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Frank Herbert");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1965");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(status_text(&app), Some("Added book 1."));
        let stored = app.books.get_by_id(1).unwrap().unwrap();
        assert_eq!(stored.title, "Dune");
        assert_eq!(stored.author, "Frank Herbert");
        assert_eq!(stored.year_published, 1965);
    }

    #[test]
    fn failed_refresh_after_add_closes_form_without_duplicate() {
        let (dir, mut app) = test_app();
        let raw = rusqlite::Connection::open(dir.path().join("library.db")).unwrap();
        raw.execute(
            "INSERT INTO Books (Title, Author, YearPublished) VALUES ('Big', 'Any', 99999999999)",
            [],
        )
        .unwrap();

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('1'));
        type_text(&mut app, "Dune");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Frank Herbert");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1965");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Normal));
        let status = status_text(&app).unwrap();
        assert!(
            status.starts_with("Added book 2; listing refresh failed: failed to read from Books"),
            "{status}"
        );

        let dune_rows: i64 = raw
            .query_row("SELECT COUNT(*) FROM Books WHERE Title = 'Dune'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(dune_rows, 1);
    }

    #[test]
    fn invalid_year_keeps_book_form_open() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('1'));
        type_text(&mut app, "Dune");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Frank Herbert");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "65");
        press(&mut app, KeyCode::Enter);

        match &app.mode {
            Mode::AddingBook(form) => {
                assert_eq!(
                    form.error.as_deref(),
                    Some("Year published must be exactly 4 digits.")
                );
            }
            _ => panic!("form should stay open"),
        }
        assert!(app.books.get_all().unwrap().is_empty());

        type_text(&mut app, "19");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.books.get_all().unwrap().len(), 1);
    }

    #[test]
    fn add_reader_rejects_bad_email_until_fixed() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('1'));
        type_text(&mut app, "Ann");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "ann@b");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, Mode::AddingReader(_)));
        assert_eq!(status_text(&app), Some("Invalid email address."));

        type_text(&mut app, ".org");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Normal));
        let readers = app.readers.get_all().unwrap();
        assert_eq!(readers.len(), 1);
        assert_eq!(readers[0].email, "ann@b.org");
    }

    #[test]
    fn find_missing_book_reports_not_found() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('2'));
        type_text(&mut app, "42");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(status_text(&app), Some("Book with ID '42' not found."));
        assert!(render(&app).contains("Book with ID '42' not found."));
    }

    #[test]
    fn find_existing_reader_shows_it() {
        let (_dir, mut app) = test_app();
        let id = app.readers.add_reader("Ann", "ann@example.org").unwrap();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('2'));
        type_text(&mut app, &id.to_string());
        press(&mut app, KeyCode::Enter);

        assert_eq!(status_text(&app), Some("Found reader 1."));
        assert!(render(&app).contains("1: Ann <ann@example.org>"));
    }

    #[test]
    fn id_prompt_ignores_non_digits_and_requires_a_value() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);

        match &app.mode {
            Mode::PromptingId(form) => {
                assert!(form.input.is_empty());
                assert_eq!(form.error.as_deref(), Some("An ID is required."));
            }
            _ => panic!("prompt should stay open"),
        }
    }

    #[test]
    fn removing_missing_id_still_reports_success() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('4'));
        type_text(&mut app, "999");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(status_text(&app), Some("Book removed."));
    }

    #[test]
    fn remove_refreshes_listing() {
        let (_dir, mut app) = test_app();
        let keep = app.books.add_book("Dune", "Frank Herbert", 1965).unwrap();
        let drop_id = app.books.add_book("Emma", "Jane Austen", 1815).unwrap();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('4'));
        type_text(&mut app, &drop_id.to_string());
        press(&mut app, KeyCode::Enter);

        match &app.screen {
            Screen::Books(screen) => match &screen.results {
                Results::Listing(books) => {
                    assert_eq!(books.len(), 1);
                    assert_eq!(books[0].id, keep);
                }
                _ => panic!("expected a listing"),
            },
            _ => panic!("expected the books screen"),
        }
    }

    #[test]
    fn show_all_lists_every_row() {
        let (_dir, mut app) = test_app();
        app.books.add_book("Dune", "Frank Herbert", 1965).unwrap();
        app.books.add_book("Emma", "Jane Austen", 1815).unwrap();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('3'));

        assert_eq!(status_text(&app), Some("Showing 2 books."));
        let screen = render(&app);
        assert!(screen.contains("1: Dune by Frank Herbert (1965)"));
        assert!(screen.contains("2: Emma by Jane Austen (1815)"));
    }

    #[test]
    fn menus_navigate_back_and_exit() {
        let (_dir, mut app) = test_app();
        assert!(render(&app).contains("Manage books"));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen.section(), Some(Section::Readers));

        assert!(!press(&mut app, KeyCode::Esc));
        assert_eq!(app.screen.section(), None);

        press(&mut app, KeyCode::Char('9'));
        assert_eq!(status_text(&app), Some("Invalid choice. Try again."));

        assert!(press(&mut app, KeyCode::Char('3')));
    }

    #[test]
    fn q_inside_a_form_is_text_not_quit() {
        let (_dir, mut app) = test_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('1'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        match &app.mode {
            Mode::AddingReader(form) => assert_eq!(form.name, "q"),
            _ => panic!("reader form should be open"),
        }
        assert!(!press(&mut app, KeyCode::Esc));
        assert!(press(&mut app, KeyCode::Char('q')));
    }
}
