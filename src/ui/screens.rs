use std::cmp::min;

use crate::models::RecordId;

/// Entries of the top-level menu, in display order.
pub(crate) const MAIN_MENU: [&str; 3] = ["Manage books", "Manage readers", "Exit"];

/// Which catalog table a section screen or prompt works on.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Section {
    Books,
    Readers,
}

impl Section {
    pub(crate) fn title(self) -> &'static str {
        match self {
            Section::Books => "Books",
            Section::Readers => "Readers",
        }
    }

    /// Lowercase singular used inside sentences.
    pub(crate) fn noun(self) -> &'static str {
        match self {
            Section::Books => "book",
            Section::Readers => "reader",
        }
    }

    /// Capitalized singular used at the start of status lines.
    pub(crate) fn kind(self) -> &'static str {
        match self {
            Section::Books => "Book",
            Section::Readers => "Reader",
        }
    }

    pub(crate) fn menu_labels(self) -> [String; 5] {
        let noun = self.noun();
        [
            format!("Add {noun}"),
            format!("Find {noun} by ID"),
            format!("Show all {}", self.title().to_lowercase()),
            format!("Remove {noun} by ID"),
            "Back".to_string(),
        ]
    }
}

/// Choices on the top-level menu.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum MainChoice {
    Books,
    Readers,
    Exit,
}

impl MainChoice {
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(MainChoice::Books),
            1 => Some(MainChoice::Readers),
            2 => Some(MainChoice::Exit),
            _ => None,
        }
    }
}

/// Choices on a section menu.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum SectionAction {
    Add,
    Find,
    ShowAll,
    Remove,
    Back,
}

impl SectionAction {
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(SectionAction::Add),
            1 => Some(SectionAction::Find),
            2 => Some(SectionAction::ShowAll),
            3 => Some(SectionAction::Remove),
            4 => Some(SectionAction::Back),
            _ => None,
        }
    }
}

/// Cursor over a fixed-length vertical menu.
#[derive(Clone, Debug)]
pub(crate) struct MenuState {
    pub(crate) selected: usize,
    len: usize,
}

impl MenuState {
    pub(crate) fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.len == 0 {
            self.selected = 0;
            return;
        }
        let max_index = self.len - 1;
        let new_index = if offset.is_negative() {
            self.selected.saturating_sub(offset.unsigned_abs())
        } else {
            min(self.selected + offset as usize, max_index)
        };
        self.selected = new_index;
    }
}

/// What the right-hand pane of a section currently shows.
pub(crate) enum Results<R> {
    Empty,
    Listing(Vec<R>),
    Found(R),
    NotFound(RecordId),
}

/// State for the books or readers screen: the action menu plus the result of
/// the last lookup or listing.
pub(crate) struct SectionScreen<R> {
    pub(crate) section: Section,
    pub(crate) menu: MenuState,
    pub(crate) results: Results<R>,
}

impl<R> SectionScreen<R> {
    pub(crate) fn new(section: Section) -> Self {
        Self {
            section,
            menu: MenuState::new(section.menu_labels().len()),
            results: Results::Empty,
        }
    }

    /// Replace the pane with a full listing and return how many rows it holds.
    pub(crate) fn show_listing(&mut self, records: Vec<R>) -> usize {
        let count = records.len();
        self.results = Results::Listing(records);
        count
    }

    /// Show the outcome of an id lookup. Returns whether a row was found.
    pub(crate) fn show_lookup(&mut self, id: RecordId, record: Option<R>) -> bool {
        match record {
            Some(record) => {
                self.results = Results::Found(record);
                true
            }
            None => {
                self.results = Results::NotFound(id);
                false
            }
        }
    }
}
