#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Signed-integer literals.
//!
//! A literal is a nonzero `i32`: its absolute value names the variable and
//! its sign the polarity. `l` and `-l` are complementary.

use core::ops::{Neg, Not};
use std::fmt::{self, Display};

/// A propositional variable, numbered from 1.
pub type Variable = u32;

/// A literal in signed-integer form. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit(i32);

impl Lit {
    /// Creates the literal of `var` with the given polarity.
    ///
    /// # Panics
    ///
    /// If `var` is zero or does not fit in an `i32`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        assert!(var != 0, "variable 0 has no literal");
        let var = i32::try_from(var).expect("literal variable overflowed");

        if polarity { Self(var) } else { Self(-var) }
    }

    /// Wraps a signed integer, or returns `None` for `0` and `i32::MIN`.
    #[must_use]
    pub const fn try_from_i32(value: i32) -> Option<Self> {
        if value == 0 || value == i32::MIN {
            None
        } else {
            Some(Self(value))
        }
    }

    /// # Panics
    ///
    /// If `value` is `0`.
    #[must_use]
    pub fn from_i32(value: i32) -> Self {
        Self::try_from_i32(value).unwrap_or_else(|| panic!("{value} is not a literal"))
    }

    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.is_positive()
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Lit {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Neg for &Lit {
    type Output = Lit;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.0
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
