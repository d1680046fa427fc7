//! Guarded status transitions.
//!
//! `advance` is the single compare-and-set primitive used by every stateful
//! entity: the caller names the statuses it expects the entity to be in, and
//! the transition only happens if the entity is still in one of them. A
//! coordinator reads the latest revision, calls `advance`, and commits the
//! result in the same zome call, so a concurrent writer that already moved
//! the entity makes the second attempt fail instead of double-applying.
//!
//! Writers on different cells can still fork an entity by building on the
//! same revision. `winning_revision` settles such forks by lifecycle
//! precedence, so the outcome never depends on which write came last.

use std::fmt::Debug;

use crate::error::{CareError, CareResult};

/// A closed set of statuses with a fixed successor relation.
pub trait StateMachine: Copy + PartialEq + Debug + 'static {
    fn successors(self) -> &'static [Self];

    /// Rank among concurrent revisions of one entity. Forward-only
    /// machines rank every successor above its predecessor.
    fn precedence(self) -> u8;

    /// True when every edge leads to a higher precedence.
    fn is_forward_only(all: &[Self]) -> bool {
        all.iter().all(|status| {
            status
                .successors()
                .iter()
                .all(|next| next.precedence() > status.precedence())
        })
    }

    fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }

    fn can_transition(self, next: Self) -> bool {
        self.successors().contains(&next)
    }
}

/// An entity carrying a status of some state machine.
pub trait Lifecycle: Clone {
    type Status: StateMachine;

    fn status(&self) -> Self::Status;

    /// Set the new status and any bookkeeping tied to it.
    fn set_status(&mut self, next: Self::Status, at_micros: i64);
}

/// Check a single edge of the state machine.
pub fn check_transition<S: StateMachine>(from: S, to: S) -> CareResult<()> {
    if from == to {
        return Ok(());
    }
    if from.can_transition(to) {
        Ok(())
    } else {
        Err(CareError::InvalidState(format!(
            "Transition {:?} -> {:?} is not allowed",
            from, to
        )))
    }
}

/// Key of the revision that wins among `revisions` of one entity: highest
/// status precedence, then newest timestamp, then greatest key.
pub fn winning_revision<S, K>(revisions: impl IntoIterator<Item = (S, i64, K)>) -> Option<K>
where
    S: StateMachine,
    K: Ord,
{
    revisions
        .into_iter()
        .max_by(|a, b| {
            a.0.precedence()
                .cmp(&b.0.precedence())
                .then(a.1.cmp(&b.1))
                .then(a.2.cmp(&b.2))
        })
        .map(|(_, _, key)| key)
}

/// Move `entity` to `next` if its current status is one of `allowed_from`.
pub fn advance<L: Lifecycle>(
    entity: &L,
    allowed_from: &[L::Status],
    next: L::Status,
    at_micros: i64,
) -> CareResult<L> {
    let current = entity.status();
    if !allowed_from.contains(&current) {
        return Err(CareError::InvalidState(format!(
            "Expected status in {:?}, found {:?}",
            allowed_from, current
        )));
    }
    if !current.can_transition(next) {
        return Err(CareError::InvalidState(format!(
            "Transition {:?} -> {:?} is not allowed",
            current, next
        )));
    }
    let mut updated = entity.clone();
    updated.set_status(next, at_micros);
    Ok(updated)
}
