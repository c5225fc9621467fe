//! Initial catalog data.
//!
//! Two formats are accepted. The roster format is line oriented:
//!
//! ```text
//! 2
//! Ann Lee
//! Bob Kim
//! 1
//! Pasta Bake
//! 10
//! ```
//!
//! a subscriber count, that many `First Surname` lines, a meal count, then a
//! name line and a balance line per meal. Blank lines are ignored. The JSON
//! format mirrors [`Seed`] directly.

use crate::error::{Result, SubscriptionError};
use crate::types::{Meal, Subscriber};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Meals and subscribers to populate a manager with.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub subscribers: Vec<Subscriber>,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl Seed {
    /// Load a seed file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let seed = if is_json {
            Self::from_json(&text)?
        } else {
            Self::parse_roster(&text)?
        };

        info!(
            path = %path.display(),
            subscribers = seed.subscribers.len(),
            meals = seed.meals.len(),
            "Loaded seed"
        );
        Ok(seed)
    }

    /// Parse JSON seed data.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse roster-format seed data.
    pub fn parse_roster(text: &str) -> Result<Self> {
        let mut lines = RosterLines::new(text);
        let mut seed = Seed::default();

        let subscriber_count = lines.count("subscriber count")?;
        for _ in 0..subscriber_count {
            let (line, entry) = lines.next_line("subscriber name")?;
            let mut parts = entry.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(first), Some(surname), None) => {
                    seed.subscribers.push(Subscriber::new(first, surname));
                }
                _ => {
                    return Err(SubscriptionError::Seed {
                        line,
                        message: format!("expected \"First Surname\", got \"{}\"", entry),
                    });
                }
            }
        }

        let meal_count = lines.count("meal count")?;
        for _ in 0..meal_count {
            let (_, name) = lines.next_line("meal name")?;
            let (line, balance) = lines.next_line("meal balance")?;
            let balance = balance.parse::<u32>().map_err(|_| SubscriptionError::Seed {
                line,
                message: format!("invalid balance \"{}\" for meal \"{}\"", balance, name),
            })?;
            seed.meals.push(Meal::new(name, balance));
        }

        if let Some((line, extra)) = lines.peek() {
            return Err(SubscriptionError::Seed {
                line,
                message: format!("unexpected trailing data \"{}\"", extra),
            });
        }

        Ok(seed)
    }
}

/// Non-blank, trimmed lines with 1-based line numbers.
struct RosterLines<'a> {
    lines: std::iter::Peekable<Box<dyn Iterator<Item = (usize, &'a str)> + 'a>>,
    last_line: usize,
}

impl<'a> RosterLines<'a> {
    fn new(text: &'a str) -> Self {
        let iter: Box<dyn Iterator<Item = (usize, &'a str)> + 'a> = Box::new(
            text.lines()
                .enumerate()
                .map(|(i, line)| (i + 1, line.trim()))
                .filter(|(_, line)| !line.is_empty()),
        );
        Self {
            lines: iter.peekable(),
            last_line: 0,
        }
    }

    fn next_line(&mut self, expected: &str) -> Result<(usize, &'a str)> {
        match self.lines.next() {
            Some((line, text)) => {
                self.last_line = line;
                Ok((line, text))
            }
            None => Err(SubscriptionError::Seed {
                line: self.last_line + 1,
                message: format!("unexpected end of input, expected {}", expected),
            }),
        }
    }

    fn count(&mut self, expected: &str) -> Result<usize> {
        let (line, text) = self.next_line(expected)?;
        text.parse::<usize>().map_err(|_| SubscriptionError::Seed {
            line,
            message: format!("invalid {} \"{}\"", expected, text),
        })
    }

    fn peek(&mut self) -> Option<(usize, &'a str)> {
        self.lines.peek().copied()
    }
}
