use std::sync::atomic::{AtomicBool, Ordering};

/// A render that stopped because a newer one superseded it.
///
/// Not a failure: the caller simply discards whatever was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "render cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Polled by render workers before every pixel.
pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;

    #[inline]
    fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Cancellation request shared between a job's owner and its workers.
///
/// Raised to supersede a job and lowered again once its workers have joined.
#[derive(Debug, Default)]
pub struct CancelFlag(AtomicBool);

impl CancelFlag {
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn lower(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CancelToken for CancelFlag {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn never_cancel_passes_every_check() {
        let token = NeverCancel;

        for _ in 0..3 {
            assert_eq!(token.check(), Ok(()));
        }
    }

    #[test]
    fn flag_follows_raise_and_lower() {
        let flag = CancelFlag::default();
        assert_eq!(flag.check(), Ok(()));

        flag.raise();
        assert_eq!(flag.check(), Err(Cancelled));

        flag.lower();
        assert!(!flag.is_cancelled());
    }

    #[test]
    fn flag_is_visible_across_threads() {
        let flag = CancelFlag::default();

        std::thread::scope(|s| {
            s.spawn(|| flag.raise());
        });

        assert!(flag.is_cancelled());
    }

    #[test]
    fn closure_token_can_trip_after_a_budget() {
        let polls = AtomicUsize::new(0);
        let token = || polls.fetch_add(1, Ordering::Relaxed) >= 3;

        assert_eq!(token.check(), Ok(()));
        assert_eq!(token.check(), Ok(()));
        assert_eq!(token.check(), Ok(()));
        assert_eq!(token.check(), Err(Cancelled));
    }
}
