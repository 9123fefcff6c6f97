//! Cooperative cancellation of long-running computations.

use std::{
    sync::{atomic::{AtomicBool, Ordering}, Arc},
    time::Instant,
};

/// A token shared between a computation and whoever is waiting on it.
///
/// The computation calls [`CancelToken::is_cancelled`] (usually through
/// [`SolveError::check`](crate::symbolic::solve::SolveError::check)) at each iteration of its
/// loops, and stops as soon as the token has been cancelled or its deadline has passed. Clones
/// share the same flag, so cancelling any clone cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    /// Set once the token is cancelled.
    cancelled: Arc<AtomicBool>,

    /// The instant after which the token counts as cancelled, even if nobody cancelled it.
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Creates a token without a deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that cancels itself at the given instant.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::default(),
            deadline: Some(deadline),
        }
    }

    /// Returns the deadline of the token, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels the token, and every clone of it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true if the token was cancelled or its deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
            || self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn passed_deadline_cancels() {
        let token = CancelToken::with_deadline(Instant::now());
        assert!(token.is_cancelled());

        let token = CancelToken::with_deadline(Instant::now() + Duration::from_secs(60));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn independent_tokens() {
        let a = CancelToken::new();
        let b = CancelToken::new();
        a.cancel();
        assert!(!b.is_cancelled());
    }
}
