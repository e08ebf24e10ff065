use model::{faculty::Faculty, location::Location, WithId};
use utility::text::contains_ignore_case;

/// One entry of a [`SearchableSelect`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
    pub subtitle: String,
}

impl SelectOption {
    pub fn new<I: Into<String>, L: Into<String>, S: Into<String>>(id: I, label: L, subtitle: S) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            subtitle: subtitle.into(),
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        contains_ignore_case(&self.label, query) || contains_ignore_case(&self.subtitle, query)
    }
}

impl From<&WithId<Location>> for SelectOption {
    fn from(location: &WithId<Location>) -> Self {
        Self::new(
            location.id.to_string(),
            location.content.label.as_str(),
            location.content.subtitle_or_empty(),
        )
    }
}

impl From<&WithId<Faculty>> for SelectOption {
    fn from(faculty: &WithId<Faculty>) -> Self {
        Self::new(
            faculty.id.to_string(),
            faculty.content.name.as_str(),
            faculty.content.summary(),
        )
    }
}

/// A dropdown with a free text filter. The query only lives while the
/// dropdown is open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchableSelect {
    options: Vec<SelectOption>,
    query: String,
    open: bool,
    selected: Option<String>,
}

impl SearchableSelect {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn from_records<'a, T>(records: &'a [T]) -> Self
    where
        &'a T: Into<SelectOption>,
    {
        Self::new(records.iter().map(Into::into).collect())
    }

    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Typing opens the dropdown.
    pub fn set_query<S: Into<String>>(&mut self, query: S) {
        self.query = query.into();
        self.open = true;
    }

    /// Options whose label or subtitle contain the query, in list order.
    pub fn filtered(&self) -> Vec<&SelectOption> {
        self.options
            .iter()
            .filter(|option| option.matches(&self.query))
            .collect()
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.query.clear();
    }

    /// Focus left the control.
    pub fn blur(&mut self) {
        self.open = false;
        self.query.clear();
    }

    /// Commits `id` and closes the dropdown. Returns the committed id so the
    /// owner can react to the change.
    pub fn select<S: Into<String>>(&mut self, id: S) -> String {
        let id = id.into();
        self.selected = Some(id.clone());
        self.open = false;
        self.query.clear();
        id
    }

    /// Sets the value from outside without touching the open state.
    pub fn set_selected(&mut self, id: Option<String>) {
        self.selected = id;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The option currently shown in the closed control, if the selected id
    /// is one of the options.
    pub fn selected(&self) -> Option<&SelectOption> {
        let id = self.selected.as_deref()?;
        self.options.iter().find(|option| option.id == id)
    }
}
