//! Cooperative CPU yielding for solver threads.
//!
//! A solver configured with more solver threads than active-thread budget
//! hands each thread a shared [`SolverThreadThrottle`]. A thread acquires a
//! permit before doing work and periodically releases and re-acquires it,
//! giving a queued sibling a chance to run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

// Upper bound on how long a cancellation request can go unnoticed while a
// thread is parked waiting for a permit.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of waiting for a yield permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldOutcome {
    /// A permit was acquired; the caller may proceed.
    Acquired,
    /// Cancellation was observed while waiting. No permit is held.
    Interrupted,
}

/// Counting-permit primitive capping how many solver threads run at once.
///
/// Unlike an OS semaphore, a waiter also watches a cancellation flag so a
/// solver that was told to terminate early does not stay parked in the
/// queue.
#[derive(Debug)]
pub struct SolverThreadThrottle {
    capacity: usize,
    permits: Mutex<usize>,
    returned: Condvar,
}

impl SolverThreadThrottle {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "throttle capacity must be at least 1");
        SolverThreadThrottle {
            capacity,
            permits: Mutex::new(capacity),
            returned: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available_permits(&self) -> usize {
        *self.lock()
    }

    /// Blocks until a permit is free or `cancel` is raised.
    pub fn acquire(&self, cancel: &AtomicBool) -> YieldOutcome {
        let mut permits = self.lock();
        loop {
            if *permits > 0 {
                *permits -= 1;
                return YieldOutcome::Acquired;
            }
            if cancel.load(Ordering::Relaxed) {
                return YieldOutcome::Interrupted;
            }
            let (guard, _) = self
                .returned
                .wait_timeout(permits, CANCEL_POLL_INTERVAL)
                .unwrap_or_else(|e| e.into_inner());
            permits = guard;
        }
    }

    /// Returns a permit and wakes one waiter.
    pub fn release(&self) {
        let mut permits = self.lock();
        *permits += 1;
        debug_assert!(
            *permits <= self.capacity,
            "released more permits than the throttle capacity"
        );
        drop(permits);
        self.returned.notify_one();
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.permits.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{mpsc, Arc};
    use std::thread;
    use std::time::Duration;

    use super::{SolverThreadThrottle, YieldOutcome};

    #[test]
    fn acquires_up_to_capacity() {
        let throttle = SolverThreadThrottle::new(2);
        let cancel = AtomicBool::new(false);

        assert_eq!(throttle.available_permits(), 2);
        assert_eq!(throttle.acquire(&cancel), YieldOutcome::Acquired);
        assert_eq!(throttle.acquire(&cancel), YieldOutcome::Acquired);
        assert_eq!(throttle.available_permits(), 0);

        throttle.release();
        assert_eq!(throttle.available_permits(), 1);
    }

    #[test]
    fn excess_thread_blocks_until_a_release() {
        let throttle = Arc::new(SolverThreadThrottle::new(1));
        let cancel = Arc::new(AtomicBool::new(false));
        assert_eq!(throttle.acquire(&cancel), YieldOutcome::Acquired);

        let (tx, rx) = mpsc::channel();
        let waiter = thread::spawn({
            let throttle = Arc::clone(&throttle);
            let cancel = Arc::clone(&cancel);
            move || {
                let outcome = throttle.acquire(&cancel);
                tx.send(outcome).unwrap();
            }
        });

        // The permit is taken, so the waiter must still be parked.
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        throttle.release();
        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            YieldOutcome::Acquired
        );
        waiter.join().unwrap();
    }

    #[test]
    fn cancellation_interrupts_a_parked_waiter() {
        let throttle = Arc::new(SolverThreadThrottle::new(1));
        let cancel = Arc::new(AtomicBool::new(false));
        assert_eq!(throttle.acquire(&cancel), YieldOutcome::Acquired);

        let waiter = thread::spawn({
            let throttle = Arc::clone(&throttle);
            let cancel = Arc::clone(&cancel);
            move || throttle.acquire(&cancel)
        });

        thread::sleep(Duration::from_millis(20));
        cancel.store(true, Ordering::Relaxed);

        assert_eq!(waiter.join().unwrap(), YieldOutcome::Interrupted);
        // The interrupted waiter took nothing; the permit count is intact.
        throttle.release();
        assert_eq!(throttle.available_permits(), 1);
    }

    #[test]
    fn release_then_reacquire_lets_a_waiter_interleave() {
        let throttle = Arc::new(SolverThreadThrottle::new(1));
        let cancel = Arc::new(AtomicBool::new(false));
        assert_eq!(throttle.acquire(&cancel), YieldOutcome::Acquired);

        let (tx, rx) = mpsc::channel();
        let waiter = thread::spawn({
            let throttle = Arc::clone(&throttle);
            let cancel = Arc::clone(&cancel);
            move || {
                assert_eq!(throttle.acquire(&cancel), YieldOutcome::Acquired);
                tx.send(()).unwrap();
                throttle.release();
            }
        });

        // Mimic the periodic yield: release, give the waiter a beat, take
        // the permit back.
        while rx.try_recv().is_err() {
            throttle.release();
            thread::sleep(Duration::from_millis(1));
            assert_eq!(throttle.acquire(&cancel), YieldOutcome::Acquired);
        }
        waiter.join().unwrap();
        throttle.release();
        assert_eq!(throttle.available_permits(), 1);
    }
}
