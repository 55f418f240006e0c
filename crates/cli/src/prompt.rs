//! Interactive prompts for inputs missing from flags and config.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Prompts on stderr; only active when asked for and stdin is a terminal.
pub struct Prompter {
    enabled: bool,
    theme: ColorfulTheme,
}

impl Prompter {
    pub fn new(requested: bool) -> Self {
        let enabled = requested && std::io::stdin().is_terminal();
        if requested && !enabled {
            tracing::debug!("stdin is not a terminal, interactive prompts disabled");
        }
        Self {
            enabled,
            theme: ColorfulTheme::default(),
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Ask for a path until it names an existing file.
    pub fn existing_file(&self, prompt: &str) -> Result<PathBuf> {
        let path: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                if PathBuf::from(input.trim()).is_file() {
                    Ok(())
                } else {
                    Err("File not found, please try again")
                }
            })
            .interact_text()?;
        Ok(PathBuf::from(path.trim()))
    }

    pub fn text(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?.trim().to_string())
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    pub fn select(&self, prompt: &str, items: &[&str]) -> Result<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }
}
