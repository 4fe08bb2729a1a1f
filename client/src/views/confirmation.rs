//! Explicit confirmation step for destructive actions.

/// Asks the user to confirm an action described by `prompt`.
pub trait Confirmation {
    /// Return `true` only when the user agreed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms everything without asking, e.g. for `--yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
