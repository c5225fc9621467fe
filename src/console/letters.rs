//! Apology letters for refused subscription requests.

use crate::error::Result;
use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::Path;
use tracing::info;

const LETTER_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const LETTER_SEPARATOR: &str = "* * * * * * * * *";

/// Letters collected during a session, written out when it ends.
#[derive(Clone, Debug, Default)]
pub struct LetterBox {
    letters: Vec<String>,
}

impl LetterBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a letter dated now.
    pub fn record(&mut self, first_name: &str, surname: &str, reason: &str) {
        self.record_at(first_name, surname, reason, Local::now().naive_local());
    }

    /// Record a letter with an explicit date.
    pub fn record_at(&mut self, first_name: &str, surname: &str, reason: &str, at: NaiveDateTime) {
        let letter = format!(
            "{date}\n\
             Food Company Office\n\
             Dear {first_name} {surname},\n\
             {reason} Therefore, we are sorry to let you know that this could not be added to your subscription and your request will not be fulfilled.\n\
             Please accept our apologies.\n\
             Sincerely,\n\
             Clerk on behalf of the Food Company\n\
             {LETTER_SEPARATOR}",
            date = at.format(LETTER_DATE_FORMAT),
        );
        self.letters.push(letter);
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.letters.iter().map(String::as_str)
    }

    /// All letters, one after another.
    pub fn render(&self) -> String {
        let mut text = String::new();
        for letter in &self.letters {
            text.push_str(letter);
            text.push('\n');
        }
        text
    }

    /// Write every letter to `path`, replacing its contents.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render())?;
        info!(path = %path.display(), letters = self.letters.len(), "Wrote letters");
        Ok(())
    }
}
