//! The resolution procedure.
//!
//! [`Resolution`] saturates a clause set: each pass resolves every unordered
//! pair of distinct clauses and adds the resolvents not seen before. The
//! empty resolvent refutes the formula; a pass adding nothing proves it
//! satisfiable. Only finitely many clauses exist over the variables of the
//! input, so the loop ends.
//!
//! [`bounded_resolution_step`] runs a single pass and is what DP uses between
//! rounds of simplification.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::solver::{SolutionStats, Solver, Verdict};
use crate::sat::trace::{NoTrace, TraceEvent, Tracer};
use rustc_hash::FxHashSet;

/// Result of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStep {
    /// The empty clause was derived.
    Contradiction,
    /// No new resolvent; the clause set is returned unchanged.
    Saturated(Cnf),
    /// At least one resolvent was added.
    Extended(Cnf),
}

impl ResolutionStep {
    /// Whether the pass added a clause.
    #[must_use]
    pub const fn added(&self) -> bool {
        matches!(self, Self::Extended(_))
    }
}

/// Resolves every pair `(clauses[i], clauses[j])` with `i < j`.
///
/// Returns `None` when the empty clause shows up, otherwise the resolvents
/// not in `known`, in derivation order. `index` numbers the derived clauses
/// for tracing.
fn resolution_pass<T: Tracer>(
    clauses: &[Clause],
    known: &FxHashSet<Clause>,
    index: &mut usize,
    tracer: &mut T,
) -> Option<Vec<Clause>> {
    let mut fresh = Vec::new();
    let mut seen = FxHashSet::default();

    for (i, left) in clauses.iter().enumerate() {
        for right in &clauses[i + 1..] {
            for resolvent in left.resolve(right) {
                if resolvent.is_empty() {
                    tracer.event(&TraceEvent::Resolvent {
                        index: *index,
                        resolvent: &resolvent,
                        left,
                        right,
                    });
                    tracer.event(&TraceEvent::Contradiction);
                    return None;
                }
                if known.contains(&resolvent) || seen.contains(&resolvent) {
                    continue;
                }
                tracer.event(&TraceEvent::Resolvent {
                    index: *index,
                    resolvent: &resolvent,
                    left,
                    right,
                });
                *index += 1;
                seen.insert(resolvent.clone());
                fresh.push(resolvent);
            }
        }
    }

    Some(fresh)
}

/// One pass of resolution over `cnf`.
#[must_use]
pub fn bounded_resolution_step(cnf: Cnf) -> ResolutionStep {
    bounded_resolution_step_with(cnf, &mut NoTrace, &mut SolutionStats::default())
}

pub fn bounded_resolution_step_with<T: Tracer>(
    cnf: Cnf,
    tracer: &mut T,
    stats: &mut SolutionStats,
) -> ResolutionStep {
    if cnf.is_contradiction() {
        tracer.event(&TraceEvent::Contradiction);
        return ResolutionStep::Contradiction;
    }

    let clauses: Vec<Clause> = cnf.iter().cloned().collect();
    let known: FxHashSet<Clause> = clauses.iter().cloned().collect();
    let mut index = clauses.len() + 1;

    stats.resolution_rounds += 1;
    tracer.event(&TraceEvent::ResolutionRound {
        round: stats.resolution_rounds,
        clauses: clauses.len(),
    });

    match resolution_pass(&clauses, &known, &mut index, tracer) {
        None => ResolutionStep::Contradiction,
        Some(fresh) if fresh.is_empty() => {
            tracer.event(&TraceEvent::Saturated);
            ResolutionStep::Saturated(cnf)
        }
        Some(fresh) => {
            stats.resolvents += fresh.len();
            let mut cnf = cnf;
            for clause in fresh {
                cnf.insert(clause);
            }
            ResolutionStep::Extended(cnf)
        }
    }
}

/// Saturation by resolution.
#[derive(Debug, Clone)]
pub struct Resolution<T: Tracer = NoTrace> {
    cnf: Cnf,
    tracer: T,
    stats: SolutionStats,
}

impl<T: Tracer> Resolution<T> {
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

impl<T: Tracer + Default> Solver for Resolution<T> {
    fn new(cnf: Cnf) -> Self {
        Self::with_tracer(cnf, T::default())
    }

    /// Runs passes until the empty clause appears or nothing new is derived.
    ///
    /// Unlike [`bounded_resolution_step`], the working list keeps derivation
    /// order: new resolvents are appended after the clauses they came from.
    fn solve(&mut self) -> Verdict {
        self.stats = SolutionStats::default();

        if self.cnf.is_contradiction() {
            self.tracer.event(&TraceEvent::Contradiction);
            return Verdict::Unsatisfiable;
        }

        let mut clauses: Vec<Clause> = self.cnf.iter().cloned().collect();
        let mut known: FxHashSet<Clause> = clauses.iter().cloned().collect();
        let mut index = clauses.len() + 1;

        loop {
            if clauses.is_empty() {
                self.tracer.event(&TraceEvent::Satisfied);
                return Verdict::Satisfiable;
            }

            self.stats.resolution_rounds += 1;
            self.tracer.event(&TraceEvent::ResolutionRound {
                round: self.stats.resolution_rounds,
                clauses: clauses.len(),
            });

            let Some(fresh) = resolution_pass(&clauses, &known, &mut index, &mut self.tracer)
            else {
                tracing::debug!(rounds = self.stats.resolution_rounds, "resolution refuted");
                return Verdict::Unsatisfiable;
            };

            if fresh.is_empty() {
                self.tracer.event(&TraceEvent::Saturated);
                tracing::debug!(rounds = self.stats.resolution_rounds, "resolution saturated");
                return Verdict::Satisfiable;
            }

            self.stats.resolvents += fresh.len();
            known.extend(fresh.iter().cloned());
            clauses.extend(fresh);
        }
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

/// Runs resolution to saturation on `cnf`.
#[must_use]
pub fn resolution_solve(cnf: Cnf) -> Verdict {
    Resolution::<NoTrace>::new(cnf).solve()
}
