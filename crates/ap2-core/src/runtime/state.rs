use crate::error::MandateError;
use crate::mandate::PaymentResult;
use serde::Serialize;
use std::fmt;

/// Progress of one purchase through the mandate chain.
///
/// Transitions only move forward; there is no revert, retry or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChainState {
    NoIntent,
    IntentCreated,
    CartCreated,
    Paid,
    Failed,
}

impl ChainState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoIntent => "NO_INTENT",
            Self::IntentCreated => "INTENT_CREATED",
            Self::CartCreated => "CART_CREATED",
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Failed)
    }

    pub fn can_transition_to(&self, next: ChainState) -> bool {
        matches!(
            (self, next),
            (Self::NoIntent, Self::IntentCreated)
                | (Self::IntentCreated, Self::CartCreated)
                | (Self::IntentCreated, Self::Failed)
                | (Self::CartCreated, Self::Paid)
                | (Self::CartCreated, Self::Failed)
        )
    }

    /// State reached by a cart creation attempt.
    pub fn after_cart<T>(outcome: &Result<T, MandateError>) -> Self {
        match outcome {
            Ok(_) => Self::CartCreated,
            Err(_) => Self::Failed,
        }
    }

    /// State reached by a payment attempt.
    pub fn after_payment(result: &PaymentResult) -> Self {
        if result.is_completed() {
            Self::Paid
        } else {
            Self::Failed
        }
    }
}

impl fmt::Display for ChainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const ALL: [ChainState; 5] = [
        ChainState::NoIntent,
        ChainState::IntentCreated,
        ChainState::CartCreated,
        ChainState::Paid,
        ChainState::Failed,
    ];

    #[test]
    fn test_happy_path_transitions() {
        assert!(ChainState::NoIntent.can_transition_to(ChainState::IntentCreated));
        assert!(ChainState::IntentCreated.can_transition_to(ChainState::CartCreated));
        assert!(ChainState::CartCreated.can_transition_to(ChainState::Paid));
    }

    #[test]
    fn test_failure_only_after_intent() {
        assert!(!ChainState::NoIntent.can_transition_to(ChainState::Failed));
        assert!(ChainState::IntentCreated.can_transition_to(ChainState::Failed));
        assert!(ChainState::CartCreated.can_transition_to(ChainState::Failed));
    }

    #[test]
    fn test_terminal_states_have_no_exit() {
        for terminal in [ChainState::Paid, ChainState::Failed] {
            assert!(terminal.is_terminal());
            for next in ALL {
                assert!(!terminal.can_transition_to(next), "{terminal} -> {next}");
            }
        }
    }

    #[test]
    fn test_no_backward_or_skipping_transitions() {
        assert!(!ChainState::CartCreated.can_transition_to(ChainState::IntentCreated));
        assert!(!ChainState::IntentCreated.can_transition_to(ChainState::NoIntent));
        assert!(!ChainState::NoIntent.can_transition_to(ChainState::CartCreated));
        assert!(!ChainState::IntentCreated.can_transition_to(ChainState::Paid));
        for state in ALL {
            assert!(!state.can_transition_to(state));
        }
    }

    #[test]
    fn test_state_after_outcomes() {
        let ok: Result<(), MandateError> = Ok(());
        assert_eq!(ChainState::after_cart(&ok), ChainState::CartCreated);

        let failed = PaymentResult::failed(
            "CM-UNKNOWN",
            MandateError::MandateNotFound {
                cart_mandate_id: "CM-UNKNOWN".to_string(),
            },
            Utc::now(),
        );
        assert_eq!(ChainState::after_payment(&failed), ChainState::Failed);
    }
}
