//! Confirmation dialogs for promote and delete.
//!
//! Uses dialoguer for terminal prompts.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, theme::ColorfulTheme};

/// Asks the operator before anything is sent to the policy service.
pub struct Confirmer {
    /// Skip prompts (for CI/CD)
    assume_yes: bool,
    theme: ColorfulTheme,
}

impl Confirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            theme: ColorfulTheme::default(),
        }
    }

    /// Show `title` and `text`, then ask `action`? Declining is the default.
    pub fn confirm(&self, title: &str, text: &str, action: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        println!();
        println!("{}", style(format!("  {title}")).bold().cyan());
        println!();
        println!("{text}");
        println!();

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(action)
            .default(false)
            .interact()?;

        Ok(confirmed)
    }
}
