//! Session wizard error types.

use thiserror::Error;

use crate::types::WizardStep;

/// Errors returned when a wizard action is not allowed.
///
/// None of these are fatal: the wizard's state is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The action has no transition from the current step.
    #[error("'{action}' is not available on the {step} step")]
    InvalidAction {
        /// Step the wizard was on
        step: WizardStep,
        /// Name of the attempted action
        action: &'static str,
    },

    /// A duration of zero seconds was chosen.
    #[error("session duration must be greater than zero")]
    InvalidDuration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WizardError::InvalidAction {
            step: WizardStep::Category,
            action: "select_duration",
        };
        assert!(err.to_string().contains("select_duration"));
        assert!(err.to_string().contains("category"));

        assert!(WizardError::InvalidDuration
            .to_string()
            .contains("greater than zero"));
    }
}
