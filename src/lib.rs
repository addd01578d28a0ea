//! Decision procedures for propositional satisfiability of formulas in
//! conjunctive normal form: resolution, Davis-Putnam and DPLL.

/// Clause sets, their simplification rules, the three procedures and the
/// DPLL branching heuristics.
pub mod sat;
