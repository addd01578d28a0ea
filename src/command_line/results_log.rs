//! Appends timing lines for solver runs to a plain-text log.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

pub(crate) const DEFAULT_LOG_FILE: &str = "test_results.txt";

const SEPARATOR: &str = "------------";

/// The two lines recorded for one run.
pub(crate) fn format_entry(algorithm: &str, file: &str, elapsed: Duration) -> String {
    format!(
        " {algorithm},  {file}, {:.6} seconds\n{SEPARATOR}\n",
        elapsed.as_secs_f64()
    )
}

pub(crate) fn append_entry(
    log: &Path,
    algorithm: &str,
    file: &str,
    elapsed: Duration,
) -> io::Result<()> {
    let mut out = OpenOptions::new().create(true).append(true).open(log)?;
    out.write_all(format_entry(algorithm, file, elapsed).as_bytes())
}

/// Like [`append_entry`], reporting a failed write on stderr instead of
/// returning it.
pub(crate) fn log_results(log: &Path, algorithm: &str, file: &str, elapsed: Duration) {
    if let Err(e) = append_entry(log, algorithm, file, elapsed) {
        eprintln!("Error writing to {}: {e}", log.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_entry() {
        let line = format_entry("DPLL moms", "php.cnf", Duration::from_millis(1500));
        assert_eq!(line, " DPLL moms,  php.cnf, 1.500000 seconds\n------------\n");
    }

    #[test]
    fn test_append_keeps_previous_entries() {
        let log = std::env::temp_dir().join(format!("sat-procedures-log-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&log);

        append_entry(&log, "Resolution", "a.txt", Duration::ZERO).unwrap();
        append_entry(&log, "DP", "a.txt", Duration::from_micros(5)).unwrap();
        let content = std::fs::read_to_string(&log).unwrap();
        std::fs::remove_file(&log).unwrap();

        assert_eq!(
            content,
            " Resolution,  a.txt, 0.000000 seconds\n------------\n \
             DP,  a.txt, 0.000005 seconds\n------------\n"
        );
    }

    #[test]
    fn test_unwritable_log_does_not_panic() {
        let log = Path::new("/definitely/not/a/dir/results.txt");
        log_results(log, "DP", "a.txt", Duration::ZERO);
    }
}
