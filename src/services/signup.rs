//! Signup form state and validation.
//!
//! Holds the draft signup (selected activity plus email buffer) and checks
//! it client-side before a request goes out. The service re-validates on its
//! end; this only catches the obvious mistakes early.

use regex::Regex;

use crate::activities::Activity;
use crate::error::{Error, Result};
use crate::types::{ActivityName, Email};

/// Draft state for the signup form.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    /// Activity chosen in the selector, if any.
    pub activity: Option<ActivityName>,
    /// Email input buffer.
    pub email: String,
}

impl SignupForm {
    /// Create an empty form, optionally seeded with a configured email.
    pub fn with_default_email(email: Option<&str>) -> Self {
        Self {
            activity: None,
            email: email.unwrap_or_default().to_string(),
        }
    }

    /// Append a typed character to the email buffer.
    pub fn type_char(&mut self, c: char) {
        if !c.is_control() {
            self.email.push(c);
        }
    }

    /// Remove the last character from the email buffer.
    pub fn backspace(&mut self) {
        self.email.pop();
    }

    /// Append pasted text, dropping control characters and whitespace.
    pub fn paste(&mut self, text: &str) {
        self.email
            .extend(text.chars().filter(|c| !c.is_control() && !c.is_whitespace()));
    }

    /// Select the next activity in the roster, wrapping to the start.
    pub fn next_activity(&mut self, activities: &[Activity]) {
        if activities.is_empty() {
            self.activity = None;
            return;
        }
        let idx = match self.selected_index(activities) {
            Some(i) if i + 1 < activities.len() => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.activity = Some(activities[idx].name.clone());
    }

    /// Select the previous activity in the roster, wrapping to the end.
    pub fn previous_activity(&mut self, activities: &[Activity]) {
        if activities.is_empty() {
            self.activity = None;
            return;
        }
        let idx = match self.selected_index(activities) {
            Some(0) => activities.len() - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.activity = Some(activities[idx].name.clone());
    }

    /// Validate the draft and produce the request parameters.
    pub fn validate(&self) -> Result<(ActivityName, Email)> {
        let activity = self
            .activity
            .clone()
            .ok_or_else(|| Error::validation("Select an activity first"))?;

        let email = self.email.trim();
        if email.is_empty() {
            return Err(Error::validation("Please enter an email address"));
        }
        if !email_looks_valid(email) {
            return Err(Error::validation(format!(
                "'{}' does not look like an email address",
                email
            )));
        }

        Ok((activity, Email::new(email)))
    }

    /// Index of the selected activity in the roster, if it is still there.
    fn selected_index(&self, activities: &[Activity]) -> Option<usize> {
        self.activity
            .as_ref()
            .and_then(|name| activities.iter().position(|a| &a.name == name))
    }
}

/// Loose shape check: something@domain.tld, no whitespace.
pub fn email_looks_valid(email: &str) -> bool {
    lazy_static::lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}
