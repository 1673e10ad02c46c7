//! Operator confirmation for destructive operations.

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm};

pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

impl<C: Confirmer + ?Sized> Confirmer for Box<C> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        (**self).confirm(prompt)
    }
}

/// Asks on the terminal; anything but an explicit yes declines.
pub struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("failed to read confirmation from terminal")
    }
}

/// `--yes`: every prompt is accepted.
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        tracing::debug!(%prompt, "confirmation assumed");
        Ok(true)
    }
}
