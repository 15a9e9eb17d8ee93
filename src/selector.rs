//! Disambiguation: ask the user to pick one of several matching names.

use crate::error::KzError;

/// Presents an ordered list of options and returns the chosen one.
pub trait Selector {
    /// Return exactly one of `options`, or an error if the user cancelled or
    /// the prompt could not be shown.
    fn present_choices(&self, prompt: &str, options: &[String]) -> Result<String, KzError>;
}

/// Interactive terminal selector.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSelector;

impl Selector for TerminalSelector {
    fn present_choices(&self, prompt: &str, options: &[String]) -> Result<String, KzError> {
        use dialoguer::Select;

        let selection = Select::new()
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact_opt()
            .map_err(|e| KzError::Selection(e.to_string()))?;

        match selection {
            Some(index) => options
                .get(index)
                .cloned()
                .ok_or_else(|| KzError::Selection(format!("invalid selection index {}", index))),
            None => Err(KzError::SelectionCancelled),
        }
    }
}
