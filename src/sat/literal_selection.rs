#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching heuristics for DPLL.
//!
//! Each strategy looks at the current clause set and names one literal to
//! split on. All of them except [`Heuristic::RandomLiteral`] are
//! deterministic: ties go to the smallest literal, which is the order the
//! clause set iterates in.

use crate::sat::cnf::Cnf;
use crate::sat::error::SolverError;
use crate::sat::literal::Lit;
use clap::ValueEnum;
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Heuristic {
    /// First literal of the first clause.
    #[default]
    #[value(name = "first_literal")]
    FirstLiteral,
    /// Uniform choice over every literal that occurs.
    #[value(name = "random_literal")]
    RandomLiteral,
    /// Literal with the most occurrences.
    #[value(name = "most_frequent_literal")]
    MostFrequentLiteral,
    /// Dynamic Largest Individual Sum.
    #[value(name = "dlis")]
    Dlis,
    /// Jeroslow-Wang: occurrences weighted by `2^-|clause|`.
    #[value(name = "jeroslow_wang")]
    JeroslowWang,
    /// Maximum Occurrences in clauses of Minimum Size.
    #[value(name = "moms")]
    Moms,
}

impl Heuristic {
    pub const ALL: [Self; 6] = [
        Self::FirstLiteral,
        Self::RandomLiteral,
        Self::MostFrequentLiteral,
        Self::Dlis,
        Self::JeroslowWang,
        Self::Moms,
    ];

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::FirstLiteral => "first_literal",
            Self::RandomLiteral => "random_literal",
            Self::MostFrequentLiteral => "most_frequent_literal",
            Self::Dlis => "dlis",
            Self::JeroslowWang => "jeroslow_wang",
            Self::Moms => "moms",
        }
    }

    /// Picks a branching literal, or `None` when `cnf` has no literal.
    pub fn select(self, cnf: &Cnf, rng: &mut fastrand::Rng) -> Option<Lit> {
        match self {
            Self::FirstLiteral => first_literal(cnf),
            Self::RandomLiteral => random_literal(cnf, rng),
            Self::MostFrequentLiteral => most_frequent_literal(cnf),
            Self::Dlis => dlis(cnf),
            Self::JeroslowWang => jeroslow_wang(cnf),
            Self::Moms => moms(cnf),
        }
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Heuristic {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.tag() == s)
            .ok_or_else(|| SolverError::UnknownHeuristic(s.to_owned()))
    }
}

/// A heuristic with its own random source.
#[derive(Debug, Clone)]
pub struct LiteralSelector {
    heuristic: Heuristic,
    rng: fastrand::Rng,
}

impl LiteralSelector {
    #[must_use]
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn with_seed(heuristic: Heuristic, seed: u64) -> Self {
        Self {
            heuristic,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn seed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }

    #[must_use]
    pub const fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn pick(&mut self, cnf: &Cnf) -> Option<Lit> {
        self.heuristic.select(cnf, &mut self.rng)
    }
}

/// The first maximum, unlike `Iterator::max_by_key` which keeps the last.
fn first_max_by_key<I, K, F>(iter: I, mut key: F) -> Option<Lit>
where
    I: IntoIterator<Item = Lit>,
    K: PartialOrd,
    F: FnMut(Lit) -> K,
{
    let mut best: Option<(Lit, K)> = None;
    for lit in iter {
        let score = key(lit);
        if best.as_ref().is_none_or(|(_, top)| score > *top) {
            best = Some((lit, score));
        }
    }
    best.map(|(lit, _)| lit)
}

fn occurrences(cnf: &Cnf) -> FxHashMap<Lit, usize> {
    let mut counts = FxHashMap::default();
    for lit in cnf.iter().flat_map(|c| c.iter()) {
        *counts.entry(*lit).or_insert(0) += 1;
    }
    counts
}

#[must_use]
pub fn first_literal(cnf: &Cnf) -> Option<Lit> {
    cnf.iter().find_map(|clause| clause.iter().next().copied())
}

pub fn random_literal(cnf: &Cnf, rng: &mut fastrand::Rng) -> Option<Lit> {
    rng.choice(cnf.literals())
}

#[must_use]
pub fn most_frequent_literal(cnf: &Cnf) -> Option<Lit> {
    let counts = occurrences(cnf);
    first_max_by_key(cnf.literals(), |lit| counts[&lit])
}

/// Scores a literal by the occurrences of its variable in both polarities,
/// and of the two literals with the top score returns the more frequent one.
#[must_use]
pub fn dlis(cnf: &Cnf) -> Option<Lit> {
    let counts = occurrences(cnf);
    let count = |lit: Lit| counts.get(&lit).copied().unwrap_or(0);

    let best = first_max_by_key(cnf.literals(), |lit| count(lit) + count(-lit))?;
    if count(-best) > count(best) {
        Some(-best)
    } else {
        Some(best)
    }
}

#[must_use]
pub fn jeroslow_wang(cnf: &Cnf) -> Option<Lit> {
    let mut scores: FxHashMap<Lit, f64> = FxHashMap::default();
    for clause in cnf {
        let len = i32::try_from(clause.len()).unwrap_or(i32::MAX);
        let weight = 2f64.powi(-len);
        for lit in clause {
            *scores.entry(*lit).or_insert(0.0) += weight;
        }
    }
    first_max_by_key(cnf.literals(), |lit| OrderedFloat(scores[&lit]))
}

#[must_use]
pub fn moms(cnf: &Cnf) -> Option<Lit> {
    let min_len = cnf.iter().map(|c| c.len()).filter(|&len| len > 0).min()?;

    let mut counts: FxHashMap<Lit, usize> = FxHashMap::default();
    for clause in cnf.iter().filter(|c| c.len() == min_len) {
        for lit in clause {
            *counts.entry(*lit).or_insert(0) += 1;
        }
    }

    let mut candidates: Vec<Lit> = counts.keys().copied().collect();
    candidates.sort_unstable();
    first_max_by_key(candidates, |lit| counts[&lit])
}
