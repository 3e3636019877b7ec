use anyhow::{anyhow, Result};

use crate::models::{NewBook, NewReader, RecordId};
use crate::validation::{is_valid_author_name, is_valid_email, is_valid_year};

use super::screens::Section;

/// One labelled input as the popup renderer sees it.
pub(crate) struct FormField<'a> {
    pub(crate) label: &'static str,
    pub(crate) value: &'a str,
    pub(crate) active: bool,
}

/// Read-only view shared by every popup form so a single draw routine can
/// render them and place the cursor.
pub(crate) trait FormView {
    fn fields(&self) -> Vec<FormField<'_>>;
    fn error(&self) -> Option<&str>;
}

/// Internal representation of the "add book" form fields.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
}

impl BookForm {
    /// Cycle focus across the three book fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Year,
            BookField::Year => BookField::Title,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.active_value_mut().push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.active_value_mut().pop();
    }

    fn active_value_mut(&mut self) -> &mut String {
        match self.active {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Year => &mut self.year,
        }
    }

    /// Run the format rules and return a draft ready for the book store. The
    /// first failing field gets focus so the user can retype it.
    pub(crate) fn parse_inputs(&mut self) -> Result<NewBook> {
        let title = self.title.trim();
        if title.is_empty() {
            self.active = BookField::Title;
            return Err(anyhow!("Book title is required."));
        }
        if !is_valid_author_name(&self.author) {
            self.active = BookField::Author;
            return Err(anyhow!(
                "Author name must not contain digits or other symbols."
            ));
        }
        if !is_valid_year(&self.year) {
            self.active = BookField::Year;
            return Err(anyhow!("Year published must be exactly 4 digits."));
        }
        let year_published = self
            .year
            .parse::<i32>()
            .map_err(|_| anyhow!("Year published must be exactly 4 digits."))?;

        Ok(NewBook::new(title, self.author.as_str(), year_published))
    }
}

impl FormView for BookForm {
    fn fields(&self) -> Vec<FormField<'_>> {
        vec![
            FormField {
                label: "Title",
                value: &self.title,
                active: self.active == BookField::Title,
            },
            FormField {
                label: "Author",
                value: &self.author,
                active: self.active == BookField::Author,
            },
            FormField {
                label: "Year",
                value: &self.year,
                active: self.active == BookField::Year,
            },
        ]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Form state for registering a reader.
#[derive(Default, Clone)]
pub(crate) struct ReaderForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) active: ReaderField,
    pub(crate) error: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum ReaderField {
    #[default]
    Name,
    Email,
}

impl ReaderForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            ReaderField::Name => ReaderField::Email,
            ReaderField::Email => ReaderField::Name,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            ReaderField::Name => self.name.push(ch),
            ReaderField::Email => self.email.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            ReaderField::Name => {
                self.name.pop();
            }
            ReaderField::Email => {
                self.email.pop();
            }
        }
    }

    /// Names are free text; only the email has a format rule.
    pub(crate) fn parse_inputs(&mut self) -> Result<NewReader> {
        if !is_valid_email(&self.email) {
            self.active = ReaderField::Email;
            return Err(anyhow!("Invalid email address."));
        }
        Ok(NewReader::new(self.name.as_str(), self.email.as_str()))
    }
}

impl FormView for ReaderForm {
    fn fields(&self) -> Vec<FormField<'_>> {
        vec![
            FormField {
                label: "Name",
                value: &self.name,
                active: self.active == ReaderField::Name,
            },
            FormField {
                label: "Email",
                value: &self.email,
                active: self.active == ReaderField::Email,
            },
        ]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// What an id prompt will do once submitted.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum IdPurpose {
    Find,
    Remove,
}

/// Single-field prompt used by "find by ID" and "remove by ID".
#[derive(Clone)]
pub(crate) struct IdForm {
    pub(crate) section: Section,
    pub(crate) purpose: IdPurpose,
    pub(crate) input: String,
    pub(crate) error: Option<String>,
}

impl IdForm {
    pub(crate) fn new(section: Section, purpose: IdPurpose) -> Self {
        Self {
            section,
            purpose,
            input: String::new(),
            error: None,
        }
    }

    pub(crate) fn title(&self) -> String {
        match self.purpose {
            IdPurpose::Find => format!("Find {} by ID", self.section.noun()),
            IdPurpose::Remove => format!("Remove {} by ID", self.section.noun()),
        }
    }

    /// Identifiers are integers, so only digits are accepted.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_ascii_digit() {
            self.input.push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }

    pub(crate) fn parse_id(&self) -> Result<RecordId> {
        let raw = self.input.trim();
        if raw.is_empty() {
            return Err(anyhow!("An ID is required."));
        }
        raw.parse::<RecordId>()
            .map_err(|_| anyhow!("ID is out of range."))
    }
}

impl FormView for IdForm {
    fn fields(&self) -> Vec<FormField<'_>> {
        vec![FormField {
            label: "ID",
            value: &self.input,
            active: true,
        }]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_book_form(title: &str, author: &str, year: &str) -> BookForm {
        BookForm {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            ..BookForm::default()
        }
    }

    #[test]
    fn book_form_produces_draft() {
        let mut form = filled_book_form("  Dune ", "Frank Herbert", "1965");
        let draft = form.parse_inputs().unwrap();
        assert_eq!(draft, NewBook::new("Dune", "Frank Herbert", 1965));
    }

    #[test]
    fn book_form_focuses_first_invalid_field() {
        let mut form = filled_book_form("", "Frank Herbert", "1965");
        assert!(form.parse_inputs().is_err());
        assert!(form.active == BookField::Title);

        let mut form = filled_book_form("Dune", "Frank Herbert 2", "1965");
        assert!(form.parse_inputs().is_err());
        assert!(form.active == BookField::Author);

        let mut form = filled_book_form("Dune", "Frank Herbert", "65");
        let err = form.parse_inputs().unwrap_err();
        assert!(form.active == BookField::Year);
        assert_eq!(err.to_string(), "Year published must be exactly 4 digits.");
    }

    #[test]
    fn book_form_cycles_focus_and_edits_active_field() {
        let mut form = BookForm::default();
        form.push_char('D');
        form.toggle_field();
        form.push_char('X');
        form.backspace();
        form.push_char('F');
        form.toggle_field();
        form.push_char('1');
        form.toggle_field();
        assert!(form.active == BookField::Title);
        assert_eq!(
            (form.title.as_str(), form.author.as_str(), form.year.as_str()),
            ("D", "F", "1")
        );
    }

    #[test]
    fn reader_form_rejects_bad_email_but_not_empty_name() {
        let mut form = ReaderForm {
            name: String::new(),
            email: "a@b".into(),
            ..ReaderForm::default()
        };
        assert!(form.parse_inputs().is_err());
        assert!(form.active == ReaderField::Email);

        form.email = "a@b.com".into();
        let draft = form.parse_inputs().unwrap();
        assert_eq!(draft, NewReader::new("", "a@b.com"));
    }

    #[test]
    fn id_form_accepts_digits_only() {
        let mut form = IdForm::new(Section::Books, IdPurpose::Find);
        assert!(form.parse_id().is_err());
        assert!(!form.push_char('x'));
        assert!(!form.push_char('-'));
        assert!(form.push_char('4'));
        assert!(form.push_char('2'));
        assert_eq!(form.parse_id().unwrap(), 42);
        assert_eq!(form.title(), "Find book by ID");

        form.input = "99999999999999999999".into();
        assert!(form.parse_id().is_err());
    }
}
