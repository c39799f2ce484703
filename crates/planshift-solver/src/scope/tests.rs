use std::sync::Arc;

use planshift_core::{ConstraintRef, PlanningSolution, Score};
use planshift_scoring::{
    ChildThreadType, HolderScoreDirector, MatchContext, ScoreDirector, ScoreHolder,
};

use crate::error::ScopeError;
use crate::yielding::SolverThreadThrottle;

use super::SolverScope;

#[derive(Clone, Debug)]
struct PlanSolution {
    slots: Vec<Option<u32>>,
    score: Option<Score<i64>>,
}

impl PlanningSolution for PlanSolution {
    type Value = i64;

    fn score(&self) -> Option<&Score<i64>> {
        self.score.as_ref()
    }

    fn set_score(&mut self, score: Option<Score<i64>>) {
        self.score = score;
    }

    fn uninitialized_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }
}

// Hard: one penalty per pair of slots holding the same value.
// Soft: the negated sum of assigned values, so smaller values score better.
fn evaluate(solution: &PlanSolution, holder: &mut ScoreHolder<i64>) {
    let conflict = ConstraintRef::new("plan", "SameValue");
    let cost = ConstraintRef::new("plan", "ValueCost");
    let mut next_context = 0u64;
    for (i, a) in solution.slots.iter().enumerate() {
        for b in solution.slots.iter().skip(i + 1) {
            if a.is_some() && a == b {
                holder
                    .add_hard_constraint_match(MatchContext(next_context), &conflict, 0, -1)
                    .unwrap();
                next_context += 1;
            }
        }
    }
    for (i, slot) in solution.slots.iter().enumerate() {
        if let Some(value) = slot {
            holder
                .add_soft_constraint_match(
                    MatchContext(1000 + i as u64),
                    &cost,
                    0,
                    -i64::from(*value),
                )
                .unwrap();
        }
    }
}

fn create_scope(slots: Vec<Option<u32>>) -> SolverScope<PlanSolution, impl ScoreDirector<PlanSolution>> {
    let solution = PlanSolution { slots, score: None };
    let director = HolderScoreDirector::new(solution, 1, 1, evaluate);
    SolverScope::with_seed(director, 42)
}

#[test]
fn timing_queries_follow_the_run_lifecycle() {
    let mut scope = create_scope(vec![Some(1)]);

    assert_eq!(
        scope.calculate_time_spent_up_to_now(),
        Err(ScopeError::NotStarted)
    );
    assert_eq!(scope.time_spent(), Err(ScopeError::NotStarted));

    scope.starting_now();
    assert!(scope.calculate_time_spent_up_to_now().is_ok());
    assert_eq!(scope.time_spent(), Err(ScopeError::NotEnded));

    scope.ending_now();
    assert!(scope.time_spent().is_ok());

    // Restarting clears the previous end mark.
    scope.starting_now();
    assert_eq!(scope.time_spent(), Err(ScopeError::NotEnded));
}

#[test]
fn calculation_speed_stays_finite_on_a_fast_run() {
    let mut scope = create_scope(vec![Some(1), Some(2)]);
    scope.starting_now();
    scope.calculate_score();
    scope.calculate_score();
    scope.calculate_score();
    scope.ending_now();

    let millis = (scope.time_spent().unwrap().as_millis() as u64).max(1);
    let speed = scope.score_calculation_speed().unwrap();
    assert_eq!(speed, 3 * 1000 / millis);
    assert!(speed > 0);
}

#[test]
fn calculation_speed_requires_a_finished_run() {
    let mut scope = create_scope(vec![Some(1)]);
    scope.starting_now();
    assert_eq!(scope.score_calculation_speed(), Err(ScopeError::NotEnded));
}

#[test]
fn update_best_solution_promotes_only_improvements() {
    let mut scope = create_scope(vec![Some(3), Some(5)]);

    assert!(scope.update_best_solution());
    assert_eq!(scope.best_score(), Some(Score::hard_soft(0, -8)));
    assert!(scope.best_solution_found_at().is_some());

    // Worsen the working solution: a duplicate pair and a higher sum.
    scope.score_director_mut().working_solution_mut().slots[0] = Some(5);
    assert!(!scope.update_best_solution());
    assert_eq!(scope.best_score(), Some(Score::hard_soft(0, -8)));

    scope.score_director_mut().working_solution_mut().slots = vec![Some(1), Some(2)];
    assert!(scope.update_best_solution());
    assert_eq!(scope.best_score(), Some(Score::hard_soft(0, -3)));
}

#[test]
fn best_snapshot_is_a_planning_clone() {
    let mut scope = create_scope(vec![Some(2), Some(4)]);
    assert!(scope.update_best_solution());

    // Mutating the working solution must not leak into the snapshot.
    scope.score_director_mut().working_solution_mut().slots[0] = Some(9);
    let best = scope.best_solution().unwrap();
    assert_eq!(best.slots, vec![Some(2), Some(4)]);
    assert!(!std::ptr::eq(
        best.slots.as_ptr(),
        scope.score_director().working_solution().slots.as_ptr()
    ));
}

#[test]
fn working_solution_restores_from_best_without_aliasing() {
    let mut scope = create_scope(vec![Some(2), Some(4)]);
    assert_eq!(
        scope.set_working_solution_from_best_solution(),
        Err(ScopeError::NoBestSolution)
    );

    scope.update_best_solution();
    scope.score_director_mut().working_solution_mut().slots = vec![Some(7), Some(7)];

    scope.set_working_solution_from_best_solution().unwrap();
    assert_eq!(
        scope.score_director().working_solution().slots,
        vec![Some(2), Some(4)]
    );
    let best = scope.best_solution().unwrap();
    assert!(!std::ptr::eq(
        best.slots.as_ptr(),
        scope.score_director().working_solution().slots.as_ptr()
    ));
}

#[test]
fn best_solution_initialized_tracks_the_init_level() {
    let mut scope = create_scope(vec![Some(1), None]);
    assert!(!scope.is_best_solution_initialized());

    scope.update_best_solution();
    assert!(!scope.is_best_solution_initialized());

    scope.score_director_mut().working_solution_mut().slots[1] = Some(2);
    scope.update_best_solution();
    assert!(scope.is_best_solution_initialized());
}

#[test]
fn take_best_or_working_solution_prefers_the_best() {
    let mut scope = create_scope(vec![Some(1), Some(2)]);
    scope.update_best_solution();
    scope.score_director_mut().working_solution_mut().slots = vec![Some(8), Some(8)];
    assert_eq!(
        scope.take_best_or_working_solution().slots,
        vec![Some(1), Some(2)]
    );

    let scope = create_scope(vec![Some(4)]);
    assert_eq!(scope.take_best_or_working_solution().slots, vec![Some(4)]);
}

#[test]
fn child_scopes_are_seed_deterministic() {
    use rand::RngCore;

    let mut parent_a = create_scope(vec![Some(1)]);
    let mut parent_b = create_scope(vec![Some(1)]);

    let mut first_a = parent_a.create_child_thread_scope(ChildThreadType::PartThread);
    let mut second_a = parent_a.create_child_thread_scope(ChildThreadType::PartThread);
    let mut first_b = parent_b.create_child_thread_scope(ChildThreadType::PartThread);
    let mut second_b = parent_b.create_child_thread_scope(ChildThreadType::PartThread);

    // Same parent seed, same fork order: pairwise identical sequences.
    assert_eq!(first_a.rng().next_u64(), first_b.rng().next_u64());
    assert_eq!(second_a.rng().next_u64(), second_b.rng().next_u64());
    // Siblings draw distinct seeds from the parent.
    assert_ne!(first_a.rng().next_u64(), second_a.rng().next_u64());
}

#[test]
fn child_scope_inherits_run_state_but_not_best() {
    let mut scope = create_scope(vec![Some(1), Some(2)]);
    scope.set_starting_solver_count(4);
    scope.starting_now();
    scope.update_best_solution();

    let child = scope.create_child_thread_scope(ChildThreadType::MoveThread);
    assert_eq!(child.starting_solver_count(), 4);
    assert_eq!(child.starting_system_time(), scope.starting_system_time());
    assert!(child.best_score().is_none());
    assert!(child.starting_initialized_score().is_none());
    assert_eq!(child.score_calculation_count(), 0);

    // The early-termination flag is shared both ways.
    child.terminate_early();
    assert!(scope.is_terminate_early());
}

#[test]
fn yielding_holds_one_permit_across_checkpoints() {
    let throttle = Arc::new(SolverThreadThrottle::new(1));
    let mut scope = create_scope(vec![Some(1)]);
    scope.set_throttle(Arc::clone(&throttle));

    scope.initialize_yielding();
    assert_eq!(throttle.available_permits(), 0);

    scope.check_yielding();
    assert_eq!(throttle.available_permits(), 0);
    assert!(!scope.is_terminate_early());

    scope.destroy_yielding();
    assert_eq!(throttle.available_permits(), 1);

    // Destroy is idempotent.
    scope.destroy_yielding();
    assert_eq!(throttle.available_permits(), 1);
}

#[test]
fn yielding_without_a_throttle_is_a_no_op() {
    let mut scope = create_scope(vec![Some(1)]);
    scope.initialize_yielding();
    scope.check_yielding();
    scope.destroy_yielding();
    assert!(!scope.is_terminate_early());
}
