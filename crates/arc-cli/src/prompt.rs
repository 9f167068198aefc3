//! Interactive disambiguation

use arc_core::error::{ArcHelperError, Result};
use arc_core::types::UserRecord;
use arc_core::users::{Chooser, RefuseAmbiguity};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

/// Asks the user to pick one account on the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptChooser;

impl Chooser for PromptChooser {
    fn choose_one(&self, fragment: &str, candidates: &[&UserRecord]) -> Result<usize> {
        let items: Vec<String> = candidates
            .iter()
            .enumerate()
            .map(|(i, user)| format!("{:>2}. {}", i + 1, user))
            .collect();

        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("'{}' matches several people; who did you mean?", fragment))
            .items(&items)
            .default(0)
            .interact_on(&console::Term::stderr())
            .map_err(|e| ArcHelperError::Selection(e.to_string()))
    }
}

/// Prompts when a terminal is attached, fails on ambiguity otherwise
#[derive(Debug, Clone, Copy)]
pub enum CliChooser {
    Prompt(PromptChooser),
    Refuse(RefuseAmbiguity),
}

impl CliChooser {
    /// Pick the chooser for this process
    pub fn detect(non_interactive: bool) -> Self {
        if !non_interactive && console::Term::stderr().is_term() {
            CliChooser::Prompt(PromptChooser)
        } else {
            CliChooser::Refuse(RefuseAmbiguity)
        }
    }
}

impl Chooser for CliChooser {
    fn choose_one(&self, fragment: &str, candidates: &[&UserRecord]) -> Result<usize> {
        match self {
            CliChooser::Prompt(c) => c.choose_one(fragment, candidates),
            CliChooser::Refuse(c) => c.choose_one(fragment, candidates),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_interactive_refuses() {
        let chooser = CliChooser::detect(true);
        assert!(matches!(chooser, CliChooser::Refuse(_)));

        let a = UserRecord::new("a", "Ann");
        let b = UserRecord::new("b", "Ben");
        let err = chooser.choose_one("n", &[&a, &b]).unwrap_err();
        assert!(err.to_string().contains("'n' is ambiguous"));
    }
}
