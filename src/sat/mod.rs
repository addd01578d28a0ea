#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod clause;
pub mod cnf;
pub mod dimacs;
pub mod dp;
pub mod dpll;
pub mod error;
pub mod literal;
pub mod literal_selection;
pub mod resolution;
pub mod simplification;
pub mod solver;
pub mod trace;
