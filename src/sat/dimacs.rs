#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Loading clause sets from text.
//!
//! Every line holds one clause as whitespace-separated integers. A `0` token
//! carries no meaning and is dropped wherever it appears, so both plain
//! clause lists and DIMACS CNF files load:
//!
//! - lines starting with `c` (comments) or `p` (problem line) are skipped,
//!   and the counts on the problem line are not checked
//! - a line starting with `%` ends the data
//! - lines with no literal left after dropping zeros are ignored
//!
//! Repeated clauses collapse into one.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::error::{Result, SolverError};
use crate::sat::literal::Lit;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Parses one clause line, dropping zeros. `line` is 1-based.
fn parse_clause_line(text: &str, line: usize) -> Result<Option<Clause>> {
    let literals: Vec<Lit> = text
        .split_whitespace()
        .filter_map(|token| parse_literal(token, line).transpose())
        .collect::<Result<_>>()?;

    if literals.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Clause::new(literals)))
    }
}

/// `None` for the `0` terminator. Values outside the literal range
/// (`i32::MIN` has no negation) are rejected like any other bad token.
fn parse_literal(token: &str, line: usize) -> Result<Option<Lit>> {
    let invalid = || SolverError::Parse {
        line,
        token: token.to_owned(),
    };
    match token.parse::<i32>().map_err(|_| invalid())? {
        0 => Ok(None),
        value => Lit::try_from_i32(value).map(Some).ok_or_else(invalid),
    }
}

/// Reads a clause set from `reader`.
///
/// # Errors
///
/// [`SolverError::Parse`] for a token that is not an integer, or
/// [`SolverError::Io`] if reading fails.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf> {
    let mut cnf = Cnf::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        match line.split_whitespace().next() {
            Some(token) if token.starts_with('%') => break,
            Some(token) if token.starts_with('c') || token.starts_with('p') => {}
            None => {}
            Some(_) => {
                if let Some(clause) = parse_clause_line(&line, idx + 1)? {
                    cnf.insert(clause);
                }
            }
        }
    }

    tracing::trace!(clauses = cnf.len(), "parsed clause set");
    Ok(cnf)
}

/// Reads a clause set from an in-memory string.
///
/// # Errors
///
/// As [`parse_dimacs`].
pub fn parse_str(text: &str) -> Result<Cnf> {
    parse_dimacs(Cursor::new(text))
}

/// Reads a clause set from the file at `path`.
///
/// # Errors
///
/// [`SolverError::NotFound`] if `path` does not exist, otherwise as
/// [`parse_dimacs`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Cnf> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SolverError::NotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    parse_dimacs(BufReader::new(file))
}

/// Every `.cnf` or `.txt` file below `dir`, in path order.
///
/// # Errors
///
/// [`SolverError::NotFound`] if `dir` does not exist, [`SolverError::Io`]
/// if walking it fails.
pub fn formula_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(SolverError::NotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let is_formula = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == "cnf" || ext == "txt");
        if entry.file_type().is_file() && is_formula {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_clause_list() {
        let cnf = parse_str("1 -2\n2 3\n").unwrap();
        assert_eq!(cnf, Cnf::new(vec![vec![1, -2], vec![2, 3]]));
    }

    #[test]
    fn test_parse_dimacs_header_and_comments() {
        let text = "c a comment\n\
                    p cnf 3 2\n\
                    1 -2 0\n\
                    2 3 0\n";
        let cnf = parse_str(text).unwrap();
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.num_vars(), 3);
    }

    #[test]
    fn test_zeros_anywhere_are_dropped() {
        let cnf = parse_str("0 1 0 -2 0\n").unwrap();
        assert_eq!(cnf, Cnf::new(vec![vec![1, -2]]));
    }

    #[test]
    fn test_blank_and_zero_only_lines_are_ignored() {
        let cnf = parse_str("\n1 0\n   \n0\n-2 0\n").unwrap();
        assert_eq!(cnf, Cnf::new(vec![vec![1], vec![-2]]));
    }

    #[test]
    fn test_end_marker_stops_reading() {
        let cnf = parse_str("1 0\n%\n0\nc ignored\n-1 0\n").unwrap();
        assert_eq!(cnf, Cnf::new(vec![vec![1]]));
    }

    #[test]
    fn test_duplicate_clauses_collapse() {
        let cnf = parse_str("1 2\n2 1\n1 2 2\n").unwrap();
        assert_eq!(cnf.len(), 1);
    }

    #[test]
    fn test_malformed_literal_reports_line() {
        let err = parse_str("1 2 0\n\n1 abc 0\n").unwrap_err();
        assert!(matches!(
            err,
            SolverError::Parse { line: 3, ref token } if token == "abc"
        ));
        assert_eq!(err.to_string(), "line 3: cannot parse literal `abc`");
    }

    #[test]
    fn test_out_of_range_literal_is_rejected() {
        let err = parse_str("1 2 0\n-2147483648 0\n").unwrap_err();
        assert!(matches!(
            err,
            SolverError::Parse { line: 2, ref token } if token == "-2147483648"
        ));

        // Dropping the bad literal would leave the unsatisfiable `{1}, {-1}`.
        let err = parse_str("1 -2147483648 0\n-1 0\n").unwrap_err();
        assert!(matches!(err, SolverError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_largest_literal_is_accepted() {
        let cnf = parse_str("2147483647 -3 0\n").unwrap();
        assert_eq!(cnf.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_file("/definitely/not/here.cnf").unwrap_err();
        assert!(matches!(err, SolverError::NotFound(_)));
    }

    #[test]
    fn test_formula_files_filters_extensions() {
        let dir = std::env::temp_dir().join(format!("sat-procedures-walk-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("a.cnf"), "1 0\n").unwrap();
        std::fs::write(dir.join("nested").join("b.txt"), "-1 0\n").unwrap();
        std::fs::write(dir.join("notes.md"), "not a formula\n").unwrap();

        let files = formula_files(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().is_some_and(|e| e != "md")));
    }
}
