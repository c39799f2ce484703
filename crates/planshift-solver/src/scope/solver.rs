//! Solver-level run scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use planshift_core::{PlanningSolution, Score};
use planshift_scoring::{ChildThreadType, ScoreDirector};

use crate::error::ScopeError;
use crate::yielding::{SolverThreadThrottle, YieldOutcome};

/// A best solution together with the score it was accepted at and the
/// moment it was found. The pair is replaced atomically so a reader never
/// observes a solution from one improvement and a score from another.
#[derive(Clone)]
pub struct BestSnapshot<S: PlanningSolution> {
    pub solution: S,
    pub score: Score<S::Value>,
    pub found_at: Instant,
}

/// Mutable state scoped to one solver run.
///
/// Owns the run's score director, random sequence and timing, and tracks
/// the best solution found so far. The best snapshot sits behind a shared
/// lock so consumer threads can read it while the solver keeps working.
///
/// Child scopes for partitioned or multi-threaded search are forked with
/// [`create_child_thread_scope`](Self::create_child_thread_scope); their
/// random seeds are drawn from the parent so a run is reproducible from a
/// single seed.
pub struct SolverScope<S: PlanningSolution, D: ScoreDirector<S>> {
    score_director: D,
    starting_solver_count: usize,
    working_random: ChaCha8Rng,
    starting_system_time: Option<Instant>,
    ending_system_time: Option<Instant>,
    starting_initialized_score: Option<Score<S::Value>>,
    best: Arc<RwLock<Option<BestSnapshot<S>>>>,
    terminate_early: Arc<AtomicBool>,
    throttle: Option<Arc<SolverThreadThrottle>>,
    holds_yield_permit: bool,
}

impl<S, D> SolverScope<S, D>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    /// Creates a scope seeded from the operating system.
    pub fn new(score_director: D) -> Self {
        Self::with_rng(score_director, ChaCha8Rng::from_os_rng())
    }

    /// Creates a scope with a fixed seed, for reproducible runs.
    pub fn with_seed(score_director: D, seed: u64) -> Self {
        Self::with_rng(score_director, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(score_director: D, working_random: ChaCha8Rng) -> Self {
        SolverScope {
            score_director,
            starting_solver_count: 0,
            working_random,
            starting_system_time: None,
            ending_system_time: None,
            starting_initialized_score: None,
            best: Arc::new(RwLock::new(None)),
            terminate_early: Arc::new(AtomicBool::new(false)),
            throttle: None,
            holds_yield_permit: false,
        }
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    /// The random sequence shared by every decision in this scope.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.working_random
    }

    pub fn starting_solver_count(&self) -> usize {
        self.starting_solver_count
    }

    pub fn set_starting_solver_count(&mut self, count: usize) {
        self.starting_solver_count = count;
    }

    // --- timing ---------------------------------------------------------

    /// Marks the start of the run. Restarting clears a previous end mark.
    pub fn starting_now(&mut self) {
        self.starting_system_time = Some(Instant::now());
        self.ending_system_time = None;
    }

    /// Marks the end of the run.
    pub fn ending_now(&mut self) {
        self.ending_system_time = Some(Instant::now());
    }

    pub fn starting_system_time(&self) -> Option<Instant> {
        self.starting_system_time
    }

    pub fn ending_system_time(&self) -> Option<Instant> {
        self.ending_system_time
    }

    /// Time spent so far in a run that is still going.
    pub fn calculate_time_spent_up_to_now(&self) -> Result<Duration, ScopeError> {
        let start = self.starting_system_time.ok_or(ScopeError::NotStarted)?;
        Ok(start.elapsed())
    }

    /// Total duration of a finished run.
    pub fn time_spent(&self) -> Result<Duration, ScopeError> {
        let start = self.starting_system_time.ok_or(ScopeError::NotStarted)?;
        let end = self.ending_system_time.ok_or(ScopeError::NotEnded)?;
        Ok(end.duration_since(start))
    }

    /// Score calculations per second over the finished run.
    ///
    /// A sub-millisecond run is clamped to one millisecond so the metric
    /// stays finite.
    pub fn score_calculation_speed(&self) -> Result<u64, ScopeError> {
        let millis = (self.time_spent()?.as_millis() as u64).max(1);
        Ok(self.score_director.calculation_count() * 1000 / millis)
    }

    pub fn score_calculation_count(&self) -> u64 {
        self.score_director.calculation_count()
    }

    // --- scoring --------------------------------------------------------

    pub fn calculate_score(&mut self) -> Score<S::Value> {
        self.score_director.calculate_score()
    }

    /// Score of the working solution when the run first became fully
    /// initialized, recorded by the construction phase.
    pub fn starting_initialized_score(&self) -> Option<&Score<S::Value>> {
        self.starting_initialized_score.as_ref()
    }

    pub fn set_starting_initialized_score(&mut self, score: Option<Score<S::Value>>) {
        self.starting_initialized_score = score;
    }

    // --- best solution --------------------------------------------------

    /// Recalculates the working score and promotes the working solution to
    /// the new best if it improves on the current one. Returns whether it
    /// did.
    pub fn update_best_solution(&mut self) -> bool {
        let score = self.score_director.calculate_score();
        let improved = match self.best_read().as_ref() {
            None => true,
            Some(snapshot) => score.compare(&snapshot.score).is_ok_and(|o| o.is_gt()),
        };
        if improved {
            let solution = self.score_director.clone_working_solution();
            debug!(score = %score, "new best solution");
            *self.best_write() = Some(BestSnapshot {
                solution,
                score,
                found_at: Instant::now(),
            });
        }
        improved
    }

    /// Installs a best snapshot directly, bypassing the improvement check.
    /// Used when restoring an externally provided solution.
    pub fn set_best_solution(&mut self, solution: S, score: Score<S::Value>) {
        *self.best_write() = Some(BestSnapshot {
            solution,
            score,
            found_at: Instant::now(),
        });
    }

    pub fn best_score(&self) -> Option<Score<S::Value>> {
        self.best_read().as_ref().map(|s| s.score.clone())
    }

    pub fn best_solution(&self) -> Option<S> {
        self.best_read().as_ref().map(|s| s.solution.clone())
    }

    pub fn best_solution_found_at(&self) -> Option<Instant> {
        self.best_read().as_ref().map(|s| s.found_at)
    }

    /// Handle for consumer threads that poll the best snapshot while the
    /// solver keeps running.
    pub fn best_solution_handle(&self) -> Arc<RwLock<Option<BestSnapshot<S>>>> {
        Arc::clone(&self.best)
    }

    pub fn is_best_solution_initialized(&self) -> bool {
        self.best_read()
            .as_ref()
            .is_some_and(|s| s.score.is_solution_initialized())
    }

    /// Replaces the working solution with a planning clone of the best one,
    /// so a later phase starts from the best rather than from wherever the
    /// previous phase wandered off to.
    pub fn set_working_solution_from_best_solution(&mut self) -> Result<(), ScopeError> {
        let clone = {
            let best = self.best_read();
            let snapshot = best.as_ref().ok_or(ScopeError::NoBestSolution)?;
            self.score_director.clone_solution(&snapshot.solution)
        };
        self.score_director.set_working_solution(clone);
        Ok(())
    }

    /// Consumes the scope, yielding the best solution if one was recorded
    /// and a clone of the working solution otherwise.
    pub fn take_best_or_working_solution(self) -> S {
        let best = self.best_write().take();
        match best {
            Some(snapshot) => snapshot.solution,
            None => self.score_director.clone_working_solution(),
        }
    }

    fn best_read(&self) -> RwLockReadGuard<'_, Option<BestSnapshot<S>>> {
        self.best.read().unwrap_or_else(|e| e.into_inner())
    }

    fn best_write(&self) -> RwLockWriteGuard<'_, Option<BestSnapshot<S>>> {
        self.best.write().unwrap_or_else(|e| e.into_inner())
    }

    // --- early termination ----------------------------------------------

    /// Asks the run to stop at the next cooperative checkpoint.
    pub fn terminate_early(&self) {
        self.terminate_early.store(true, Ordering::Relaxed);
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early.load(Ordering::Relaxed)
    }

    /// Handle another thread can use to request early termination.
    pub fn terminate_early_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.terminate_early)
    }

    // --- child scopes ---------------------------------------------------

    /// Forks a scope for a partition or move thread.
    ///
    /// The child gets its own score director and a random sequence seeded
    /// from the parent's, so the overall run stays reproducible no matter
    /// how the child threads are later scheduled. It shares the parent's
    /// early-termination flag but starts with no best solution and no
    /// throttle of its own.
    pub fn create_child_thread_scope(&mut self, child_thread_type: ChildThreadType) -> Self {
        let child_seed = self.working_random.next_u64();
        SolverScope {
            score_director: self
                .score_director
                .create_child_thread_score_director(child_thread_type),
            starting_solver_count: self.starting_solver_count,
            working_random: ChaCha8Rng::seed_from_u64(child_seed),
            starting_system_time: self.starting_system_time,
            ending_system_time: self.ending_system_time,
            starting_initialized_score: None,
            best: Arc::new(RwLock::new(None)),
            terminate_early: Arc::clone(&self.terminate_early),
            throttle: None,
            holds_yield_permit: false,
        }
    }

    // --- yielding -------------------------------------------------------

    /// Attaches the shared throttle this scope's thread must respect.
    pub fn set_throttle(&mut self, throttle: Arc<SolverThreadThrottle>) {
        self.throttle = Some(throttle);
    }

    /// Acquires the initial permit before the thread starts working.
    pub fn initialize_yielding(&mut self) {
        if let Some(throttle) = &self.throttle {
            match throttle.acquire(&self.terminate_early) {
                YieldOutcome::Acquired => self.holds_yield_permit = true,
                YieldOutcome::Interrupted => {
                    debug!("yield wait interrupted, requesting early termination");
                    self.terminate_early();
                }
            }
        }
    }

    /// Releases and re-acquires the permit, giving a queued sibling thread
    /// a chance to run. Called periodically from the search loop.
    pub fn check_yielding(&mut self) {
        if let Some(throttle) = &self.throttle {
            if self.holds_yield_permit {
                throttle.release();
                self.holds_yield_permit = false;
            }
            match throttle.acquire(&self.terminate_early) {
                YieldOutcome::Acquired => self.holds_yield_permit = true,
                YieldOutcome::Interrupted => {
                    debug!("yield wait interrupted, requesting early termination");
                    self.terminate_early();
                }
            }
        }
    }

    /// Returns the permit when the thread is done. Safe to call whether or
    /// not a permit is currently held.
    pub fn destroy_yielding(&mut self) {
        if let Some(throttle) = &self.throttle {
            if self.holds_yield_permit {
                throttle.release();
                self.holds_yield_permit = false;
            }
        }
    }
}
