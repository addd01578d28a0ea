#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clauses as literal sets.
//!
//! Literals are kept sorted and deduplicated, so two clauses holding the same
//! literals are equal and hash alike regardless of how they were built.

use crate::sat::literal::Lit;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display};

/// Inline capacity before a clause spills to the heap.
pub type LiteralStorage = SmallVec<[Lit; 8]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: LiteralStorage,
}

impl Clause {
    pub fn new<I: IntoIterator<Item = Lit>>(literals: I) -> Self {
        let mut literals: LiteralStorage = literals.into_iter().collect();
        literals.sort_unstable();
        literals.dedup();
        Self { literals }
    }

    /// The empty clause. Unsatisfiable.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            literals: SmallVec::new_const(),
        }
    }

    #[must_use]
    pub fn unit(lit: Lit) -> Self {
        let mut literals = LiteralStorage::new();
        literals.push(lit);
        Self { literals }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// The literal of a unit clause.
    #[must_use]
    pub fn unit_literal(&self) -> Option<Lit> {
        if self.is_unit() {
            Some(self.literals[0])
        } else {
            None
        }
    }

    /// `true` if some literal occurs together with its complement.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.iter().any(|&lit| self.contains(-lit))
    }

    #[must_use]
    pub fn contains(&self, lit: Lit) -> bool {
        self.literals.binary_search(&lit).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lit> {
        self.literals.iter()
    }

    /// A copy of this clause with `lit` removed.
    #[must_use]
    pub fn without(&self, lit: Lit) -> Self {
        Self {
            literals: self.iter().copied().filter(|&l| l != lit).collect(),
        }
    }

    /// A copy of this clause with `lit` added.
    #[must_use]
    pub fn with(&self, lit: Lit) -> Self {
        Self::new(self.iter().copied().chain(std::iter::once(lit)))
    }

    /// Resolves `self` against `other` on every complementary pair.
    ///
    /// For each `l` in `self` with `-l` in `other` the candidate
    /// `(self \ {l}) ∪ (other \ {-l})` is formed; tautologies are dropped.
    /// Two clauses may share several complementary pairs, so more than one
    /// resolvent can come back.
    #[must_use]
    pub fn resolve(&self, other: &Self) -> Vec<Self> {
        self.iter()
            .copied()
            .filter(|&lit| other.contains(-lit))
            .map(|lit| {
                Self::new(
                    self.iter()
                        .copied()
                        .filter(|&l| l != lit)
                        .chain(other.iter().copied().filter(|&l| l != -lit)),
                )
            })
            .filter(|resolvent| !resolvent.is_tautology())
            .collect()
    }
}

impl Index<usize> for Clause {
    type Output = Lit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = std::slice::Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Zeros are dropped, matching the loader's handling of DIMACS terminators.
impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        literals.into_iter().filter_map(Lit::try_from_i32).collect()
    }
}

impl From<&[i32]> for Clause {
    fn from(literals: &[i32]) -> Self {
        literals.iter().copied().filter_map(Lit::try_from_i32).collect()
    }
}

impl From<&Clause> for Vec<i32> {
    fn from(clause: &Clause) -> Self {
        clause.iter().map(|l| l.to_i32()).collect()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}
