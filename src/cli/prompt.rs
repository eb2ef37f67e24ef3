//! User-input seam.
//!
//! Everything that reads from the terminal goes through `Prompter`, so the
//! menu and download flow can be driven by a scripted implementation in tests.

use crate::error::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

/// Blocking terminal prompts.
pub trait Prompter {
    /// Asks for one of `choices` (case-insensitive) and re-prompts until one
    /// is given. Empty input selects `default`. Returns the matching entry of
    /// `choices`.
    fn choose(&self, prompt: &str, choices: &[&str], default: &str) -> Result<String>;

    /// Free-text input. With a default, empty input returns it; without one,
    /// empty input returns an empty string.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Waits for Enter.
    fn pause(&self, prompt: &str) -> Result<()>;
}

/// `dialoguer`-backed prompts with the colorful theme.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the canonical spelling of `answer` among `choices`.
pub fn match_choice<'a>(answer: &str, choices: &[&'a str]) -> Option<&'a str> {
    let answer = answer.trim();
    choices
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(answer))
}

impl Prompter for DialoguerPrompter {
    fn choose(&self, prompt: &str, choices: &[&str], default: &str) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(format!("{} [{}]", prompt, choices.join("/")))
            .default(default.to_string())
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                match match_choice(input, choices) {
                    Some(_) => Ok(()),
                    None => Err("Please select one of the available options".to_string()),
                }
            })
            .interact_text()?;

        Ok(match_choice(&answer, choices)
            .unwrap_or(default)
            .to_string())
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        input = match default {
            Some(default) => input.default(default.to_string()),
            None => input.allow_empty(true),
        };
        Ok(input.interact_text()?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn pause(&self, prompt: &str) -> Result<()> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(())
    }
}

/// Scripted prompts for tests.
#[cfg(test)]
pub mod testing {
    use super::{match_choice, Prompter};
    use crate::error::{AppError, Result};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Answers prompts from a queue. An empty string stands for pressing
    /// Enter; an exhausted queue behaves like a closed terminal.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: RefCell<VecDeque<String>>,
        asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompter {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
                asked: RefCell::new(Vec::new()),
            }
        }

        /// Prompts shown so far, in order (re-prompts included).
        pub fn asked(&self) -> Vec<String> {
            self.asked.borrow().clone()
        }

        pub fn remaining(&self) -> usize {
            self.answers.borrow().len()
        }

        fn next(&self, prompt: &str) -> Result<String> {
            self.asked.borrow_mut().push(prompt.to_string());
            self.answers.borrow_mut().pop_front().ok_or_else(|| {
                AppError::Prompt(std::sync::Arc::new(dialoguer::Error::IO(
                    std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "script exhausted"),
                )))
            })
        }
    }

    impl Prompter for ScriptedPrompter {
        fn choose(&self, prompt: &str, choices: &[&str], default: &str) -> Result<String> {
            loop {
                let answer = self.next(prompt)?;
                if answer.trim().is_empty() {
                    return Ok(default.to_string());
                }
                if let Some(choice) = match_choice(&answer, choices) {
                    return Ok(choice.to_string());
                }
            }
        }

        fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
            let answer = self.next(prompt)?;
            match default {
                Some(default) if answer.is_empty() => Ok(default.to_string()),
                _ => Ok(answer),
            }
        }

        fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
            let answer = self.next(prompt)?;
            Ok(match answer.trim().to_lowercase().as_str() {
                "" => default,
                "y" | "yes" => true,
                _ => false,
            })
        }

        fn pause(&self, prompt: &str) -> Result<()> {
            self.next(prompt).map(|_| ())
        }
    }
}
