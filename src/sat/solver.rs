//! The common surface of the three decision procedures.
//!
//! Every procedure implements [`Solver`]: it is built from a [`Cnf`], answers
//! with a [`Verdict`], and exposes [`SolutionStats`] about the run.
//! [`SolverImpls`] lets callers pick a procedure at runtime from a
//! [`SolverType`].

use crate::sat::cnf::Cnf;
use crate::sat::dp::Dp;
use crate::sat::dpll::Dpll;
use crate::sat::error::SolverError;
use crate::sat::literal_selection::Heuristic;
use crate::sat::resolution::Resolution;
use crate::sat::trace::{NoTrace, Tracer};
use clap::ValueEnum;
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Satisfiable,
    Unsatisfiable,
}

impl Verdict {
    #[must_use]
    pub const fn is_sat(self) -> bool {
        matches!(self, Self::Satisfiable)
    }
}

impl From<bool> for Verdict {
    fn from(sat: bool) -> Self {
        if sat {
            Self::Satisfiable
        } else {
            Self::Unsatisfiable
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
        }
    }
}

/// Counters collected while solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SolutionStats {
    /// DPLL branching decisions.
    pub splits: usize,
    /// Unit clause rule applications.
    pub unit_propagations: usize,
    /// Pure literal rule applications.
    pub pure_eliminations: usize,
    /// Resolvents added to the clause set.
    pub resolvents: usize,
    /// Passes over all clause pairs.
    pub resolution_rounds: usize,
}

pub trait Solver {
    fn new(cnf: Cnf) -> Self
    where
        Self: Sized;

    fn solve(&mut self) -> Verdict;

    fn stats(&self) -> SolutionStats;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum SolverType {
    /// Saturation by pairwise resolution.
    Resolution,
    /// Davis-Putnam: simplification interleaved with single resolution rounds.
    Dp,
    /// Davis-Putnam-Logemann-Loveland backtracking search.
    #[default]
    Dpll,
}

impl SolverType {
    pub const ALL: [Self; 3] = [Self::Resolution, Self::Dp, Self::Dpll];
}

impl Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution => write!(f, "Resolution"),
            Self::Dp => write!(f, "DP"),
            Self::Dpll => write!(f, "DPLL"),
        }
    }
}

impl FromStr for SolverType {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resolution" => Ok(Self::Resolution),
            "dp" => Ok(Self::Dp),
            "dpll" => Ok(Self::Dpll),
            _ => Err(SolverError::UnknownSolver(s.to_owned())),
        }
    }
}

/// A solver chosen at runtime.
#[derive(Debug)]
pub enum SolverImpls<T: Tracer = NoTrace> {
    Resolution(Resolution<T>),
    Dp(Dp<T>),
    Dpll(Dpll<T>),
}

impl<T: Tracer + Default> SolverImpls<T> {
    /// Builds the solver named by `solver_type`. The heuristic and seed only
    /// matter for DPLL.
    pub fn from_parts(
        solver_type: SolverType,
        cnf: Cnf,
        heuristic: Heuristic,
        seed: Option<u64>,
        tracer: T,
    ) -> Self {
        match solver_type {
            SolverType::Resolution => Self::Resolution(Resolution::with_tracer(cnf, tracer)),
            SolverType::Dp => Self::Dp(Dp::with_tracer(cnf, tracer)),
            SolverType::Dpll => {
                let mut dpll = Dpll::with_tracer(cnf, heuristic, tracer);
                if let Some(seed) = seed {
                    dpll.seed(seed);
                }
                Self::Dpll(dpll)
            }
        }
    }

    pub fn solve(&mut self) -> Verdict {
        match self {
            Self::Resolution(s) => s.solve(),
            Self::Dp(s) => s.solve(),
            Self::Dpll(s) => s.solve(),
        }
    }

    pub fn stats(&self) -> SolutionStats {
        match self {
            Self::Resolution(s) => s.stats(),
            Self::Dp(s) => s.stats(),
            Self::Dpll(s) => s.stats(),
        }
    }
}
