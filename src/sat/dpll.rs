//! Defines the DPLL (Davis-Putnam-Logemann-Loveland) search.
//!
//! Each search node holds its own clause set and goes through:
//! 1.  **Unit propagation:** a contradiction closes the node as UNSAT, an
//!     empty clause set ends the whole search as SAT.
//! 2.  **Pure literal elimination:** an empty result ends the search as SAT.
//! 3.  **Split:** a literal `l` is chosen by the configured [`Heuristic`] and
//!     the node is replaced by `F ∪ {{l}}` followed by `F ∪ {{-l}}`.
//!
//! The positive child is explored completely before the negative one, and a
//! SAT answer anywhere stops the search, exactly as recursion with
//! short-circuiting would. Pending nodes live on an explicit stack rather
//! than the call stack, so deep formulas do not overflow it. Every pending
//! node owns its clause set; nothing is shared between branches.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::error::Result;
use crate::sat::literal::Lit;
use crate::sat::literal_selection::{Heuristic, LiteralSelector};
use crate::sat::simplification::{pure_literal_eliminate_with, unit_propagate_with};
use crate::sat::solver::{SolutionStats, Solver, Verdict};
use crate::sat::trace::{NoTrace, TraceEvent, Tracer};

/// Verdict and split count of one DPLL run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DpllOutcome {
    pub verdict: Verdict,
    pub splits: usize,
}

/// What a node turned into after simplification.
enum Node {
    Satisfied,
    Conflict,
    Split(Cnf, Lit),
}

/// A clause set waiting to be searched, and the decision that produced it.
struct Pending {
    cnf: Cnf,
    decision: Option<(Lit, bool)>,
}

#[derive(Debug, Clone)]
pub struct Dpll<T: Tracer = NoTrace> {
    cnf: Cnf,
    selector: LiteralSelector,
    tracer: T,
    stats: SolutionStats,
}

impl<T: Tracer> Dpll<T> {
    pub fn with_tracer(cnf: Cnf, heuristic: Heuristic, tracer: T) -> Self {
        Self {
            cnf,
            selector: LiteralSelector::new(heuristic),
            tracer,
            stats: SolutionStats::default(),
        }
    }

    /// Fixes the random source used by [`Heuristic::RandomLiteral`].
    pub fn seed(&mut self, seed: u64) {
        self.selector.seed(seed);
    }

    pub const fn heuristic(&self) -> Heuristic {
        self.selector.heuristic()
    }

    /// Splits made by the last call to `solve`.
    pub const fn splits(&self) -> usize {
        self.stats.splits
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    fn expand(&mut self, cnf: Cnf) -> Node {
        let cnf = unit_propagate_with(cnf, &mut self.tracer, &mut self.stats);
        if cnf.is_contradiction() {
            return Node::Conflict;
        }
        if cnf.is_empty() {
            self.tracer.event(&TraceEvent::Satisfied);
            return Node::Satisfied;
        }

        let cnf = pure_literal_eliminate_with(cnf, &mut self.tracer, &mut self.stats);
        if cnf.is_empty() {
            self.tracer.event(&TraceEvent::Satisfied);
            return Node::Satisfied;
        }

        match self.selector.pick(&cnf) {
            Some(lit) => Node::Split(cnf, lit),
            // Only literal-free clauses remain, i.e. the empty clause.
            None => Node::Conflict,
        }
    }
}

impl<T: Tracer + Default> Dpll<T> {
    pub fn with_heuristic(cnf: Cnf, heuristic: Heuristic) -> Self {
        Self::with_tracer(cnf, heuristic, T::default())
    }
}

impl<T: Tracer + Default> Solver for Dpll<T> {
    fn new(cnf: Cnf) -> Self {
        Self::with_heuristic(cnf, Heuristic::default())
    }

    fn solve(&mut self) -> Verdict {
        self.stats = SolutionStats::default();

        let mut stack = vec![Pending {
            cnf: self.cnf.clone(),
            decision: None,
        }];

        while let Some(Pending { cnf, decision }) = stack.pop() {
            if let Some((literal, positive)) = decision {
                self.tracer.event(&TraceEvent::Branch {
                    literal,
                    positive,
                    cnf: &cnf,
                });
            }

            match self.expand(cnf) {
                Node::Satisfied => {
                    tracing::debug!(splits = self.stats.splits, "dpll satisfiable");
                    return Verdict::Satisfiable;
                }
                Node::Conflict => {}
                Node::Split(cnf, lit) => {
                    self.stats.splits += 1;
                    let negative = cnf.with_clause(Clause::unit(-lit));
                    let positive = cnf.with_clause(Clause::unit(lit));
                    stack.push(Pending {
                        cnf: negative,
                        decision: Some((-lit, false)),
                    });
                    stack.push(Pending {
                        cnf: positive,
                        decision: Some((lit, true)),
                    });
                }
            }
        }

        tracing::debug!(splits = self.stats.splits, "dpll unsatisfiable");
        Verdict::Unsatisfiable
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

/// Runs DPLL on `cnf` with `heuristic`.
#[must_use]
pub fn dpll_solve(cnf: Cnf, heuristic: Heuristic) -> DpllOutcome {
    let mut solver = Dpll::<NoTrace>::with_heuristic(cnf, heuristic);
    let verdict = solver.solve();
    DpllOutcome {
        verdict,
        splits: solver.splits(),
    }
}

/// Like [`dpll_solve`], with the heuristic named by its tag.
///
/// # Errors
///
/// [`SolverError::UnknownHeuristic`](crate::sat::error::SolverError::UnknownHeuristic)
/// for a tag that names no strategy; no search is started then.
pub fn dpll_solve_tagged(cnf: Cnf, tag: &str) -> Result<DpllOutcome> {
    let heuristic: Heuristic = tag.parse()?;
    Ok(dpll_solve(cnf, heuristic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::error::SolverError;
    use crate::sat::trace::RecordingTrace;

    fn unsat_square() -> Cnf {
        Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]])
    }

    #[test]
    fn test_empty_formula_is_sat() {
        for heuristic in Heuristic::ALL {
            let outcome = dpll_solve(Cnf::default(), heuristic);
            assert_eq!(outcome.verdict, Verdict::Satisfiable);
            assert_eq!(outcome.splits, 0);
        }
    }

    #[test]
    fn test_complementary_units_need_no_split() {
        let outcome = dpll_solve(Cnf::new(vec![vec![1], vec![-1]]), Heuristic::FirstLiteral);
        assert_eq!(outcome.verdict, Verdict::Unsatisfiable);
        assert_eq!(outcome.splits, 0);
    }

    #[test]
    fn test_unit_chain_is_unsat() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1], vec![-2]]);
        let outcome = dpll_solve(cnf, Heuristic::Moms);
        assert_eq!(outcome.verdict, Verdict::Unsatisfiable);
        assert_eq!(outcome.splits, 0);
    }

    #[test]
    fn test_pure_literal_satisfies() {
        let outcome = dpll_solve(Cnf::new(vec![vec![1, 2]]), Heuristic::Dlis);
        assert_eq!(outcome.verdict, Verdict::Satisfiable);
        assert_eq!(outcome.splits, 0);
    }

    #[test]
    fn test_two_variable_contradiction_needs_a_split() {
        for heuristic in Heuristic::ALL {
            let outcome = dpll_solve(unsat_square(), heuristic);
            assert_eq!(outcome.verdict, Verdict::Unsatisfiable, "{heuristic}");
            assert!(outcome.splits >= 1, "{heuristic}");
        }
    }

    #[test]
    fn test_satisfiable_after_split() {
        // No unit or pure literal; 1 true, 2 false, 3 true is a model.
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, -2], vec![-1, 2, 3], vec![1, -3]]);
        for heuristic in Heuristic::ALL {
            let outcome = dpll_solve(cnf.clone(), heuristic);
            assert_eq!(outcome.verdict, Verdict::Satisfiable, "{heuristic}");
        }
    }

    #[test]
    fn test_positive_branch_first_and_short_circuit() {
        // Splitting on -2 (first literal) satisfies the formula immediately.
        let cnf = Cnf::new(vec![vec![-2, 1], vec![2, -1], vec![-2, -1], vec![2, 1, 3]]);
        let mut solver = Dpll::with_tracer(cnf, Heuristic::FirstLiteral, RecordingTrace::default());

        assert_eq!(solver.solve(), Verdict::Satisfiable);
        assert_eq!(solver.splits(), 1);

        let trace = solver.into_tracer();
        assert!(trace.events.contains(&"split -2 +".to_owned()));
        assert!(!trace.events.iter().any(|e| e.ends_with(" -")));
    }

    #[test]
    fn test_branches_do_not_share_state() {
        let cnf = unsat_square();
        let mut solver = Dpll::<NoTrace>::with_heuristic(cnf.clone(), Heuristic::FirstLiteral);
        assert_eq!(solver.solve(), Verdict::Unsatisfiable);
        // Solving again from the same input gives the same answer and count.
        let splits = solver.splits();
        assert_eq!(solver.solve(), Verdict::Unsatisfiable);
        assert_eq!(solver.splits(), splits);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let cnf = Cnf::new(vec![
            vec![1, 2, 3],
            vec![-1, -2],
            vec![-2, -3],
            vec![-1, -3],
            vec![1, -2, 4],
            vec![-4, 2, 3],
        ]);
        let run = |seed| {
            let mut solver = Dpll::<NoTrace>::with_heuristic(cnf.clone(), Heuristic::RandomLiteral);
            solver.seed(seed);
            let verdict = solver.solve();
            (verdict, solver.splits())
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_unknown_tag_rejected_before_search() {
        let result = dpll_solve_tagged(unsat_square(), "largest_first");
        assert!(matches!(result, Err(SolverError::UnknownHeuristic(_))));

        let outcome = dpll_solve_tagged(unsat_square(), "jeroslow_wang").unwrap();
        assert_eq!(outcome.verdict, Verdict::Unsatisfiable);
    }

    #[test]
    fn test_three_pigeons_two_holes() {
        // Pigeon i sits in hole h when variable 2 * (i - 1) + h is true.
        let var = |i: i32, h: i32| 2 * (i - 1) + h;
        let mut clauses: Vec<Vec<i32>> = (1..=3).map(|i| vec![var(i, 1), var(i, 2)]).collect();
        for h in 1..=2 {
            for i in 1..=3 {
                for j in i + 1..=3 {
                    clauses.push(vec![-var(i, h), -var(j, h)]);
                }
            }
        }
        let cnf = Cnf::new(clauses);
        for heuristic in Heuristic::ALL {
            let outcome = dpll_solve(cnf.clone(), heuristic);
            assert_eq!(outcome.verdict, Verdict::Unsatisfiable, "{heuristic}");
            assert!(outcome.splits >= 1, "{heuristic}");
        }
    }
}
