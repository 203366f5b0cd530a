//! Book creation form.
//!
//! The form keeps raw input as typed by the user so a failed submission can
//! be shown again untouched.

use serde::Deserialize;
use time::OffsetDateTime;
use verne_authz::Availability;

use super::client::CatalogApi;
use super::models::{Book, NewBook};

/// Inline message shown when the catalog rejects or never receives a record.
pub const CREATE_FAILED_MESSAGE: &str =
    "The book could not be saved. Check the catalog is reachable and try again.";

/// Lowest publication year the year input accepts.
pub const MIN_YEAR: i32 = 1000;

/// Highest publication year the year input accepts: next year.
pub fn max_year() -> i32 {
    OffsetDateTime::now_utc().year() + 1
}

/// Raw field values as submitted by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub year: String,
    pub isbn: String,
    pub publisher: String,
    pub category_id: String,
    pub status: String,
}

impl Default for BookInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            summary: String::new(),
            year: String::new(),
            isbn: String::new(),
            publisher: String::new(),
            category_id: String::new(),
            status: Availability::Available.as_str().to_string(),
        }
    }
}

impl BookInput {
    /// Title and author are the only fields checked before submitting.
    pub fn validate(&self) -> Result<(), String> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.author.trim().is_empty() {
            missing.push("author");
        }
        match missing.as_slice() {
            [] => Ok(()),
            [field] => Err(format!("The {field} is required.")),
            _ => Err("The title and author are required.".to_string()),
        }
    }

    /// Builds the creation payload. Blank optional fields are omitted, an
    /// unparsable year or category is sent as absent and a blank status
    /// means available.
    pub fn to_new_book(&self) -> NewBook {
        NewBook {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            summary: non_blank(&self.summary),
            year: self.year.trim().parse().ok(),
            isbn: non_blank(&self.isbn),
            publisher: non_blank(&self.publisher),
            category_id: self.category_id.trim().parse().ok(),
            status: self.availability(),
        }
    }

    fn availability(&self) -> Availability {
        if self.status.trim().is_empty() {
            Availability::Available
        } else {
            Availability::parse_lenient(&self.status)
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Open,
    Submitting,
}

/// Result of [`CreateBookForm::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Book),
    Invalid(String),
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct CreateBookForm {
    input: BookInput,
    state: FormState,
    error: Option<String>,
}

impl CreateBookForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// An open form pre-filled with `input`, as after a browser post.
    pub fn with_input(input: BookInput) -> Self {
        Self {
            input,
            state: FormState::Open,
            error: None,
        }
    }

    pub fn open(&mut self) {
        if self.state == FormState::Closed {
            self.state = FormState::Open;
        }
    }

    pub fn close(&mut self) {
        if self.state == FormState::Open {
            self.state = FormState::Closed;
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != FormState::Closed
    }

    pub fn input(&self) -> &BookInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut BookInput {
        &mut self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates and sends the record.
    ///
    /// On success the fields are reset, `on_refresh` runs once and the form
    /// closes. On failure the form stays open with its input and an inline
    /// error. Invalid input never reaches the catalog.
    pub async fn submit<F>(&mut self, api: &dyn CatalogApi, on_refresh: F) -> SubmitOutcome
    where
        F: FnOnce(),
    {
        self.state = FormState::Open;

        if let Err(message) = self.input.validate() {
            self.error = Some(message.clone());
            return SubmitOutcome::Invalid(message);
        }

        self.state = FormState::Submitting;
        self.error = None;

        match api.create(&self.input.to_new_book()).await {
            Some(book) => {
                self.input = BookInput::default();
                on_refresh();
                self.state = FormState::Closed;
                SubmitOutcome::Created(book)
            }
            None => {
                self.error = Some(CREATE_FAILED_MESSAGE.to_string());
                self.state = FormState::Open;
                SubmitOutcome::Failed
            }
        }
    }
}
