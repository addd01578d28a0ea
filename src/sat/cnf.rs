#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clause sets.
//!
//! A [`Cnf`] is the conjunction of a set of unique clauses. It is treated as
//! a value: every simplification or branching step builds a new `Cnf`, and a
//! DPLL branch owns its own copy.
//!
//! Two shapes are terminal. The empty clause set is trivially satisfiable,
//! and any set holding the empty clause is unsatisfiable; [`Cnf::contradiction`]
//! builds the canonical `{∅}` sentinel for the latter.

use crate::sat::clause::Clause;
use crate::sat::literal::{Lit, Variable};
use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cnf {
    clauses: BTreeSet<Clause>,
}

impl Cnf {
    /// Builds a clause set from signed integers. Zeros and `i32::MIN` are
    /// dropped; a clause left with no literals stays as the empty clause.
    pub fn new<J, I>(clauses: I) -> Self
    where
        J: IntoIterator<Item = i32>,
        I: IntoIterator<Item = J>,
    {
        clauses
            .into_iter()
            .map(|c| c.into_iter().filter_map(Lit::try_from_i32).collect::<Clause>())
            .collect()
    }

    pub fn from_clauses<I: IntoIterator<Item = Clause>>(clauses: I) -> Self {
        Self {
            clauses: clauses.into_iter().collect(),
        }
    }

    /// The set containing only the empty clause.
    #[must_use]
    pub fn contradiction() -> Self {
        Self::from_clauses([Clause::empty()])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// `true` when no clause is left, i.e. the formula is satisfied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// `true` when the empty clause is a member.
    #[must_use]
    pub fn is_contradiction(&self) -> bool {
        self.clauses.contains(&Clause::empty())
    }

    #[must_use]
    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.contains(clause)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Every literal occurring in some clause.
    #[must_use]
    pub fn literals(&self) -> BTreeSet<Lit> {
        self.iter().flat_map(Clause::iter).copied().collect()
    }

    #[must_use]
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.iter().flat_map(Clause::iter).map(|l| l.variable()).collect()
    }

    /// Highest variable index that occurs, or 0.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.variables().last().map_or(0, |&v| v as usize)
    }

    /// Literals standing alone in some clause.
    ///
    /// May hold both `l` and `-l`; propagating them yields the contradiction.
    #[must_use]
    pub fn unit_literals(&self) -> BTreeSet<Lit> {
        self.iter().filter_map(Clause::unit_literal).collect()
    }

    /// Literals whose complement occurs nowhere.
    #[must_use]
    pub fn pure_literals(&self) -> BTreeSet<Lit> {
        let literals = self.literals();
        literals
            .iter()
            .copied()
            .filter(|&lit| !literals.contains(&-lit))
            .collect()
    }

    /// A copy with `clause` added.
    #[must_use]
    pub fn with_clause(&self, clause: Clause) -> Self {
        let mut clauses = self.clauses.clone();
        clauses.insert(clause);
        Self { clauses }
    }

    /// Keeps only the clauses not containing any of `lits`.
    #[must_use]
    pub fn without_literals(self, lits: &BTreeSet<Lit>) -> Self {
        let mut clauses = self.clauses;
        clauses.retain(|clause| !clause.iter().any(|lit| lits.contains(lit)));
        Self { clauses }
    }

    pub fn insert(&mut self, clause: Clause) -> bool {
        self.clauses.insert(clause)
    }

    /// Evaluates the formula under `model`, a list of true literals.
    ///
    /// A clause is satisfied when one of its literals is in the model.
    #[must_use]
    pub fn verify(&self, model: &[i32]) -> bool {
        let model: BTreeSet<i32> = model.iter().copied().collect();
        self.iter()
            .all(|clause| clause.iter().any(|l| model.contains(&l.to_i32())))
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self::from_clauses(iter)
    }
}

impl IntoIterator for Cnf {
    type Item = Clause;
    type IntoIter = btree_set::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl<'a> IntoIterator for &'a Cnf {
    type Item = &'a Clause;
    type IntoIter = btree_set::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl From<Vec<Vec<i32>>> for Cnf {
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        Self::new(clauses)
    }
}

/// One clause per line, literals separated by spaces and ended by `0`.
impl Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in self {
            for lit in clause {
                write!(f, "{lit} ")?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}
