//! Menu loop and staged prompts.

use crate::error::{parse_quantity, ErrorKind, Result, SubscriptionError};
use crate::manager::{SubscriptionChange, SubscriptionManager};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

use super::letters::LetterBox;

/// Default number of tries a clerk gets per prompt.
pub const DEFAULT_ATTEMPTS: usize = 3;

const DIVIDER: &str =
    "-------------------------------------------------------------------------------------------";
const UNSUCCESSFUL: &str = "Operation was unsuccessful, no changes have been made to subscriptions.";
const FULL_NAME_PROMPT: &str =
    "Please type the full name of a registered subscriber separated by space and press enter:";

/// Console configuration.
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    /// Tries per prompt before an operation is abandoned.
    /// Default: 3
    pub attempts: usize,

    /// Where apology letters go when the session ends (None = keep in memory).
    pub letters_path: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            letters_path: None,
        }
    }
}

/// Outcome of one prompt stage.
enum Step<T> {
    Done(T),
    /// Failed with an error the stage does not retry.
    Rejected(SubscriptionError),
    OutOfAttempts,
    EndOfInput,
}

/// Interactive session over a subscription manager.
pub struct Console<R, W> {
    manager: SubscriptionManager,
    input: R,
    output: W,
    config: ConsoleConfig,
    letters: LetterBox,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(manager: SubscriptionManager, input: R, output: W, config: ConsoleConfig) -> Self {
        Self {
            manager,
            input,
            output,
            config,
            letters: LetterBox::new(),
        }
    }

    pub fn manager(&self) -> &SubscriptionManager {
        &self.manager
    }

    pub fn letters(&self) -> &LetterBox {
        &self.letters
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Run the menu loop until the clerk finishes or input runs out.
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Welcome to the Food Company subscription management program!"
        )?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.read_choice()? else {
                break;
            };
            debug!(choice = %choice, "Menu choice");

            let finished = match choice.as_str() {
                "f" => true,
                "m" => {
                    self.print_meals()?;
                    false
                }
                "s" => {
                    self.print_subscribers()?;
                    false
                }
                "a" => self.add_subscription()?,
                "r" => self.remove_subscription()?,
                _ => {
                    writeln!(
                        self.output,
                        "The option you have chosen doesn't exist, try again."
                    )?;
                    false
                }
            };
            if finished {
                break;
            }
        }

        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.output, "Closing the program, see you later!")?;
        if let Some(path) = &self.config.letters_path {
            self.letters.write_to(path)?;
        }
        self.output.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "{}", DIVIDER)?;
        writeln!(self.output, "Choose one of the operations displayed below:")?;
        writeln!(self.output, "f - finish running the program")?;
        writeln!(self.output, "m - display information about all the meals")?;
        writeln!(self.output, "s - display information about all the subscribers")?;
        writeln!(
            self.output,
            "a - update the stored data, add meals to a registered subscriber's subscription"
        )?;
        writeln!(
            self.output,
            "r - update the stored data, remove meals from a registered subscriber's subscription"
        )?;
        writeln!(self.output, "{}", DIVIDER)?;
        Ok(())
    }

    fn print_meals(&mut self) -> Result<()> {
        let out = &mut self.output;
        writeln!(out, "Information about all the meals and their availability:\n")?;
        for meal in self.manager.meals() {
            writeln!(out, "Meal type: {}\nNumber available: {}\n", meal.name(), meal.balance())?;
        }
        Ok(())
    }

    fn print_subscribers(&mut self) -> Result<()> {
        let out = &mut self.output;
        let manager = &self.manager;

        writeln!(out, "Information about all the subscribers:\n")?;
        for subscriber in manager.subscribers() {
            writeln!(out, "Full name: {}", subscriber)?;

            let mut held = manager
                .subscriptions_for(subscriber.first_name(), subscriber.surname())
                .peekable();
            if held.peek().is_none() {
                writeln!(out, "Subscriptions: none")?;
            } else {
                writeln!(out, "Subscriptions:")?;
                for (n, subscription) in held.enumerate() {
                    writeln!(
                        out,
                        "{}. Meal type: {}, number of meals: {}",
                        n + 1,
                        subscription.meal(),
                        subscription.balance()
                    )?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// The `a` option. Returns true when input ran out.
    fn add_subscription(&mut self) -> Result<bool> {
        let retry = |kind: ErrorKind| {
            matches!(
                kind,
                ErrorKind::NoSuchSubscriber | ErrorKind::NoSuchMeal | ErrorKind::IllegalNumberInput
            )
        };

        let (first_name, surname) = match self.prompt(FULL_NAME_PROMPT, retry, |manager, line| {
            let (first, surname) = parse_full_name(line)?;
            manager.require_subscriber(&first, &surname)?;
            Ok((first, surname))
        })? {
            Step::Done(name) => name,
            other => return self.abandon(other),
        };

        let meal = match self.prompt(
            "Type the name of the meal type you would like to add and press enter:",
            retry,
            |manager, line| Ok(manager.require_meal(line)?.name().to_string()),
        )? {
            Step::Done(meal) => meal,
            other => return self.abandon(other),
        };

        let prompt = format!(
            "Type the number of {} meals you would like to add to subscription and press enter:",
            meal
        );
        let step = self.prompt(&prompt, retry, |manager, line| {
            let quantity = parse_quantity(line)?;
            manager.add_meal_subscription(&first_name, &surname, &meal, quantity)
        })?;

        match step {
            Step::Done(change) => {
                self.report_change(&change, "added to")?;
                Ok(false)
            }
            Step::Rejected(err) if err.kind() == ErrorKind::IllegalMealQuantity => {
                warn!(error = %err, "Subscription refused, writing apology letter");
                writeln!(self.output, "{}", err)?;
                self.letters.record(&first_name, &surname, &err.to_string());
                let destination = match &self.config.letters_path {
                    Some(path) => path.display().to_string(),
                    None => "the letters file".to_string(),
                };
                writeln!(
                    self.output,
                    "{}\nYou can find an apology letter in {} after you finish running this program.",
                    UNSUCCESSFUL, destination
                )?;
                Ok(false)
            }
            other => self.abandon(other),
        }
    }

    /// The `r` option. Returns true when input ran out.
    fn remove_subscription(&mut self) -> Result<bool> {
        let retry = |kind: ErrorKind| {
            matches!(
                kind,
                ErrorKind::NoSuchSubscriber
                    | ErrorKind::NoSuchSubscription
                    | ErrorKind::NoSuchMeal
                    | ErrorKind::IllegalNumberInput
                    | ErrorKind::IllegalMealQuantity
            )
        };

        let (first_name, surname) = match self.prompt(FULL_NAME_PROMPT, retry, |manager, line| {
            let (first, surname) = parse_full_name(line)?;
            manager.require_subscriber(&first, &surname)?;
            manager.require_subscriptions(&first, &surname)?;
            Ok((first, surname))
        })? {
            Step::Done(name) => name,
            other => return self.abandon(other),
        };

        let meal = match self.prompt(
            "Type the name of the meal type you would like to remove from the subscription and press enter:",
            retry,
            |manager, line| {
                manager.require_meal(line)?;
                Ok(manager
                    .require_subscription(&first_name, &surname, line)?
                    .meal()
                    .to_string())
            },
        )? {
            Step::Done(meal) => meal,
            other => return self.abandon(other),
        };

        let prompt = format!(
            "Type the number of {} meals you would like to remove from the subscription and press enter:",
            meal
        );
        match self.prompt(&prompt, retry, |manager, line| {
            let quantity = parse_quantity(line)?;
            manager.remove_meal_subscription(&first_name, &surname, &meal, quantity)
        })? {
            Step::Done(change) => {
                self.report_change(&change, "removed from")?;
                Ok(false)
            }
            other => self.abandon(other),
        }
    }

    fn report_change(&mut self, change: &SubscriptionChange, verb: &str) -> Result<()> {
        writeln!(
            self.output,
            "The {} meal (number of meals: {}) was {} {}'s subscription.",
            change.meal,
            change.quantity,
            verb,
            change.subscriber_name()
        )?;
        Ok(())
    }

    /// Report an operation that did not complete. Returns true on end of input.
    fn abandon<T>(&mut self, step: Step<T>) -> Result<bool> {
        match step {
            Step::Done(_) => Ok(false),
            Step::Rejected(err) => {
                warn!(error = %err, "Operation rejected");
                writeln!(self.output, "{}", err)?;
                writeln!(self.output, "{}", UNSUCCESSFUL)?;
                Ok(false)
            }
            Step::OutOfAttempts => {
                writeln!(self.output, "{}", UNSUCCESSFUL)?;
                Ok(false)
            }
            Step::EndOfInput => Ok(true),
        }
    }

    /// Ask `prompt` until `attempt` succeeds, fails with an error `retry`
    /// refuses, or the clerk runs out of tries.
    fn prompt<T, F>(
        &mut self,
        prompt: &str,
        retry: impl Fn(ErrorKind) -> bool,
        mut attempt: F,
    ) -> Result<Step<T>>
    where
        F: FnMut(&mut SubscriptionManager, &str) -> Result<T>,
    {
        let mut remaining = self.config.attempts.max(1);
        loop {
            writeln!(self.output, "{}", prompt)?;
            let Some(line) = self.read_line()? else {
                return Ok(Step::EndOfInput);
            };

            match attempt(&mut self.manager, &line) {
                Ok(value) => return Ok(Step::Done(value)),
                Err(err) if retry(err.kind()) => {
                    remaining -= 1;
                    warn!(error = %err, remaining, "Invalid input");
                    if remaining == 0 {
                        return Ok(Step::OutOfAttempts);
                    }
                    writeln!(self.output, "{} You have {} more chance(s)", err, remaining)?;
                }
                Err(err) => return Ok(Step::Rejected(err)),
            }
        }
    }

    /// Next non-blank line as a menu choice.
    fn read_choice(&mut self) -> Result<Option<String>> {
        loop {
            match self.read_line()? {
                Some(line) if line.is_empty() => continue,
                other => return Ok(other),
            }
        }
    }

    /// Next line, trimmed. None at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Split `First Surname`; anything after the surname is ignored.
fn parse_full_name(line: &str) -> Result<(String, String)> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(first), Some(surname)) => Ok((first.to_string(), surname.to_string())),
        _ => Err(SubscriptionError::NoSuchSubscriber(line.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_name() {
        assert_eq!(
            parse_full_name("  Ann   Lee ").unwrap(),
            ("Ann".to_string(), "Lee".to_string())
        );
        assert_eq!(
            parse_full_name("Ann Lee Junior").unwrap(),
            ("Ann".to_string(), "Lee".to_string())
        );
        let err = parse_full_name("Ann").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoSuchSubscriber);
    }
}
