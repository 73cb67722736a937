//! Transition graphs for lifecycle status enums.
//!
//! A status type lists its successors; checking and applying a move come
//! for free. Aggregates add their own guards on top, such as refusing to
//! publish a path with no activities.

use std::fmt::Debug;

use super::DomainError;

pub trait StateMachine: Sized + Copy + PartialEq + Debug + 'static {
    /// Statuses reachable in one step.
    fn valid_transitions(&self) -> &'static [Self];

    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Returns `target` when the edge exists.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if !self.can_transition_to(&target) {
            return Err(DomainError::invalid_transition(format!(
                "Cannot transition from {:?} to {:?}",
                self, target
            )));
        }
        Ok(target)
    }

    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Ticket {
        Open,
        Closed,
        Deleted,
    }

    impl StateMachine for Ticket {
        fn valid_transitions(&self) -> &'static [Self] {
            match self {
                Ticket::Open => &[Ticket::Closed, Ticket::Deleted],
                Ticket::Closed => &[Ticket::Open, Ticket::Deleted],
                Ticket::Deleted => &[],
            }
        }
    }

    #[test]
    fn listed_successor_is_accepted() {
        assert!(Ticket::Open.can_transition_to(&Ticket::Closed));
        assert_eq!(Ticket::Closed.transition_to(Ticket::Open).unwrap(), Ticket::Open);
    }

    #[test]
    fn unlisted_move_names_both_states() {
        let err = Ticket::Deleted.transition_to(Ticket::Open).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert!(err.message.contains("Deleted") && err.message.contains("Open"));
    }

    #[test]
    fn self_loop_needs_an_explicit_edge() {
        assert!(!Ticket::Open.can_transition_to(&Ticket::Open));
    }

    #[test]
    fn state_without_successors_is_terminal() {
        assert!(Ticket::Deleted.is_terminal());
        assert!(!Ticket::Closed.is_terminal());
    }
}
