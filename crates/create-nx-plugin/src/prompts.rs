//! Interactive prompts
//!
//! The resolver only talks to the terminal through [`Prompter`], so tests can
//! script answers and record the order questions were asked in.

use crate::output;
use anyhow::Result;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

/// Terminal interaction needed while resolving arguments
pub trait Prompter {
    /// Ask for free text; `required` rejects empty answers while interactive
    fn input(&mut self, prompt: &str, default: Option<&str>, required: bool) -> Result<String>;

    /// Pick one of `items`, returning its index
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    fn warn(&mut self, message: &str);
}

/// dialoguer-backed prompter
///
/// Without a terminal every prompt answers with its default (an empty
/// string for inputs that have none).
pub struct TerminalPrompter {
    interactive: bool,
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            interactive: Term::stderr().is_term(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>, required: bool) -> Result<String> {
        if !self.interactive {
            return Ok(default.unwrap_or_default().to_string());
        }

        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        if required {
            input = input.validate_with(|value: &String| -> std::result::Result<(), &str> {
                if value.trim().is_empty() {
                    Err("Name cannot be empty")
                } else {
                    Ok(())
                }
            });
        } else {
            input = input.allow_empty(true);
        }

        Ok(input.interact_text()?.trim().to_string())
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        if !self.interactive {
            return Ok(default);
        }

        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        if !self.interactive {
            return Ok(default);
        }

        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn warn(&mut self, message: &str) {
        output::warning(message);
    }
}
