#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Unit propagation and pure-literal elimination.
//!
//! Both rules consume a clause set and return the simplified one. Unit
//! propagation returns [`Cnf::contradiction`] as soon as a clause is emptied.
//! Pure-literal elimination keeps the verdict but not logical equivalence.

use crate::sat::cnf::Cnf;
use crate::sat::solver::SolutionStats;
use crate::sat::trace::{NoTrace, TraceEvent, Tracer};

/// Applies the unit clause rule until no unit clause is left.
#[must_use]
pub fn unit_propagate(cnf: Cnf) -> Cnf {
    unit_propagate_with(cnf, &mut NoTrace, &mut SolutionStats::default())
}

pub fn unit_propagate_with<T: Tracer>(
    mut cnf: Cnf,
    tracer: &mut T,
    stats: &mut SolutionStats,
) -> Cnf {
    loop {
        let units = cnf.unit_literals();
        if units.is_empty() {
            return cnf;
        }

        for lit in units {
            if cnf.is_empty() {
                return cnf;
            }

            let mut next = Cnf::default();
            for clause in cnf {
                if clause.contains(lit) {
                    continue;
                }
                if clause.contains(-lit) {
                    let shortened = clause.without(-lit);
                    if shortened.is_empty() {
                        stats.unit_propagations += 1;
                        tracer.event(&TraceEvent::Contradiction);
                        return Cnf::contradiction();
                    }
                    next.insert(shortened);
                } else {
                    next.insert(clause);
                }
            }

            cnf = next;
            stats.unit_propagations += 1;
            tracer.event(&TraceEvent::UnitPropagated {
                literal: lit,
                cnf: &cnf,
            });
        }
    }
}

/// Removes every clause holding a pure literal, until none is left.
#[must_use]
pub fn pure_literal_eliminate(cnf: Cnf) -> Cnf {
    pure_literal_eliminate_with(cnf, &mut NoTrace, &mut SolutionStats::default())
}

pub fn pure_literal_eliminate_with<T: Tracer>(
    mut cnf: Cnf,
    tracer: &mut T,
    stats: &mut SolutionStats,
) -> Cnf {
    loop {
        if cnf.is_empty() {
            return cnf;
        }

        let pures = cnf.pure_literals();
        if pures.is_empty() {
            return cnf;
        }

        for lit in pures {
            cnf = cnf.without_literals(&std::iter::once(lit).collect());
            stats.pure_eliminations += 1;
            tracer.event(&TraceEvent::PureEliminated {
                literal: lit,
                cnf: &cnf,
            });
            if cnf.is_empty() {
                return cnf;
            }
        }
    }
}

/// Alternates both rules until the clause count stops changing or a
/// terminal shape is reached.
#[must_use]
pub fn simplify(cnf: Cnf) -> Cnf {
    simplify_with(cnf, &mut NoTrace, &mut SolutionStats::default())
}

pub fn simplify_with<T: Tracer>(mut cnf: Cnf, tracer: &mut T, stats: &mut SolutionStats) -> Cnf {
    let mut prev_len = None;
    while prev_len != Some(cnf.len()) {
        prev_len = Some(cnf.len());

        cnf = unit_propagate_with(cnf, tracer, stats);
        if cnf.is_contradiction() || cnf.is_empty() {
            return cnf;
        }

        cnf = pure_literal_eliminate_with(cnf, tracer, stats);
        if cnf.is_contradiction() || cnf.is_empty() {
            return cnf;
        }
    }
    cnf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::trace::RecordingTrace;

    #[test]
    fn test_complementary_units_contradict() {
        let cnf = Cnf::new(vec![vec![1], vec![-1]]);
        assert_eq!(unit_propagate(cnf), Cnf::contradiction());
    }

    #[test]
    fn test_chained_units_contradict() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1], vec![-2]]);
        assert_eq!(unit_propagate(cnf), Cnf::contradiction());
    }

    #[test]
    fn test_unit_propagation_shortens_and_removes() {
        let cnf = Cnf::new(vec![vec![1], vec![-1, 2, 3], vec![1, 4], vec![3, 4]]);
        let result = unit_propagate(cnf);
        assert_eq!(result, Cnf::new(vec![vec![2, 3], vec![3, 4]]));
    }

    #[test]
    fn test_unit_propagation_cascades() {
        let cnf = Cnf::new(vec![vec![1], vec![-1, 2], vec![-2, 3], vec![-3, 4, 5]]);
        let result = unit_propagate(cnf);
        assert_eq!(result, Cnf::new(vec![vec![4, 5]]));
    }

    #[test]
    fn test_unit_propagation_without_units_is_identity() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, -2]]);
        assert_eq!(unit_propagate(cnf.clone()), cnf);
    }

    #[test]
    fn test_pure_literal_clears_satisfiable_clause() {
        let cnf = Cnf::new(vec![vec![1, 2]]);
        assert!(pure_literal_eliminate(cnf).is_empty());
    }

    #[test]
    fn test_pure_literal_keeps_mixed_clauses() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, -2], vec![1, -2], vec![-1, 2]]);
        assert_eq!(pure_literal_eliminate(cnf.clone()), cnf);
    }

    #[test]
    fn test_pure_literal_repeats() {
        // Removing {1, 3} leaves -1 pure in the next round.
        let cnf = Cnf::new(vec![vec![3, 1], vec![-1, 2], vec![-1, -2]]);
        assert!(pure_literal_eliminate(cnf).is_empty());
    }

    #[test]
    fn test_simplify_reaches_fixpoint() {
        let cnf = Cnf::new(vec![
            vec![1, 2],
            vec![-1, 2],
            vec![1, -2],
            vec![-1, -2],
            vec![3, 4],
            vec![-3],
        ]);
        let once = simplify(cnf);
        assert_eq!(
            once,
            Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]])
        );
        assert_eq!(simplify(once.clone()), once);
    }

    #[test]
    fn test_simplify_empty_formula() {
        assert!(simplify(Cnf::default()).is_empty());
    }

    #[test]
    fn test_simplify_reports_steps() {
        let mut trace = RecordingTrace::default();
        let mut stats = SolutionStats::default();
        let cnf = Cnf::new(vec![vec![1], vec![-1, 2], vec![2, 3]]);
        let result = simplify_with(cnf, &mut trace, &mut stats);

        assert!(result.is_empty());
        assert_eq!(trace.events, vec!["unit 1", "unit 2"]);
        assert_eq!(stats.unit_propagations, 2);
        assert_eq!(stats.pure_eliminations, 0);
    }
}
