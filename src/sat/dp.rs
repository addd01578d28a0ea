//! The Davis-Putnam procedure.
//!
//! Each round simplifies the clause set to a fixed point and then runs one
//! resolution pass over what is left:
//!
//! - simplification yields the empty clause: UNSAT
//! - simplification empties the clause set: SAT
//! - the pass derives the empty clause: UNSAT
//! - the pass adds nothing: SAT
//!
//! Otherwise the extended set goes into the next round. Simplification never
//! grows the set and resolution only adds clauses over the existing
//! variables, so the rounds end.

use crate::sat::cnf::Cnf;
use crate::sat::resolution::{ResolutionStep, bounded_resolution_step_with};
use crate::sat::simplification::simplify_with;
use crate::sat::solver::{SolutionStats, Solver, Verdict};
use crate::sat::trace::{NoTrace, TraceEvent, Tracer};

#[derive(Debug, Clone)]
pub struct Dp<T: Tracer = NoTrace> {
    cnf: Cnf,
    tracer: T,
    stats: SolutionStats,
}

impl<T: Tracer> Dp<T> {
    pub fn with_tracer(cnf: Cnf, tracer: T) -> Self {
        Self {
            cnf,
            tracer,
            stats: SolutionStats::default(),
        }
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }
}

impl<T: Tracer + Default> Solver for Dp<T> {
    fn new(cnf: Cnf) -> Self {
        Self::with_tracer(cnf, T::default())
    }

    fn solve(&mut self) -> Verdict {
        self.stats = SolutionStats::default();
        let mut cnf = self.cnf.clone();

        loop {
            cnf = simplify_with(cnf, &mut self.tracer, &mut self.stats);
            if cnf.is_contradiction() {
                tracing::debug!(rounds = self.stats.resolution_rounds, "dp refuted by simplification");
                return Verdict::Unsatisfiable;
            }
            if cnf.is_empty() {
                self.tracer.event(&TraceEvent::Satisfied);
                tracing::debug!(rounds = self.stats.resolution_rounds, "dp satisfied by simplification");
                return Verdict::Satisfiable;
            }

            match bounded_resolution_step_with(cnf, &mut self.tracer, &mut self.stats) {
                ResolutionStep::Contradiction => {
                    tracing::debug!(rounds = self.stats.resolution_rounds, "dp refuted");
                    return Verdict::Unsatisfiable;
                }
                ResolutionStep::Saturated(_) => {
                    tracing::debug!(rounds = self.stats.resolution_rounds, "dp saturated");
                    return Verdict::Satisfiable;
                }
                ResolutionStep::Extended(next) => cnf = next,
            }
        }
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

/// Runs DP on `cnf`.
#[must_use]
pub fn dp_solve(cnf: Cnf) -> Verdict {
    Dp::<NoTrace>::new(cnf).solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::clause::Clause;
    use crate::sat::trace::RecordingTrace;

    #[test]
    fn test_empty_formula_is_sat() {
        assert_eq!(dp_solve(Cnf::default()), Verdict::Satisfiable);
    }

    #[test]
    fn test_complementary_units_are_unsat() {
        assert_eq!(dp_solve(Cnf::new(vec![vec![1], vec![-1]])), Verdict::Unsatisfiable);
    }

    #[test]
    fn test_unit_chain_is_unsat() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1], vec![-2]]);
        assert_eq!(dp_solve(cnf), Verdict::Unsatisfiable);
    }

    #[test]
    fn test_pure_literal_is_sat_without_resolution() {
        let mut solver = Dp::<NoTrace>::new(Cnf::new(vec![vec![1, 2]]));
        assert_eq!(solver.solve(), Verdict::Satisfiable);
        assert_eq!(solver.stats().resolution_rounds, 0);
    }

    #[test]
    fn test_two_variable_contradiction_needs_resolution() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]]);
        let mut solver = Dp::with_tracer(cnf, RecordingTrace::default());
        assert_eq!(solver.solve(), Verdict::Unsatisfiable);
        assert!(solver.stats().resolution_rounds >= 1);

        let trace = solver.into_tracer();
        assert!(trace.events.contains(&"round 1".to_owned()));
        assert!(trace.events.contains(&"contradiction".to_owned()));
    }

    #[test]
    fn test_input_empty_clause_is_unsat() {
        let cnf = Cnf::from_clauses([Clause::empty(), Clause::from(vec![1, 2])]);
        assert_eq!(dp_solve(cnf), Verdict::Unsatisfiable);
    }

    #[test]
    fn test_satisfiable_without_units_or_pures() {
        // 1 true, 2 false, 3 true is a model.
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, -2], vec![-1, 2, 3], vec![1, -3]]);
        assert_eq!(dp_solve(cnf), Verdict::Satisfiable);
    }
}
