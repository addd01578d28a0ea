//! Step-by-step observation of the decision procedures.
//!
//! Every solver reports the rules it applies to a [`Tracer`]. The verdict
//! never depends on the tracer; [`NoTrace`] drops everything and is the
//! default.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Lit;
use std::io::{self, Write};

/// One applied rule, with a view of the clause set it produced.
#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    /// Unit clause rule applied with `literal` set true.
    UnitPropagated { literal: Lit, cnf: &'a Cnf },
    /// Clauses containing the pure `literal` were removed.
    PureEliminated { literal: Lit, cnf: &'a Cnf },
    /// DPLL added `{literal}` to the formula and recursed on `cnf`.
    Branch {
        literal: Lit,
        positive: bool,
        cnf: &'a Cnf,
    },
    /// A new resolvent was derived. `index` continues the clause numbering.
    Resolvent {
        index: usize,
        resolvent: &'a Clause,
        left: &'a Clause,
        right: &'a Clause,
    },
    /// A resolution pass is about to run over `clauses` clauses.
    ResolutionRound { round: usize, clauses: usize },
    /// A resolution pass derived nothing new.
    Saturated,
    /// The empty clause was reached.
    Contradiction,
    /// The clause set became empty.
    Satisfied,
}

pub trait Tracer {
    fn event(&mut self, event: &TraceEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl Tracer for NoTrace {
    fn event(&mut self, _: &TraceEvent<'_>) {}
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl Tracer for LogTrace {
    fn event(&mut self, event: &TraceEvent<'_>) {
        match *event {
            TraceEvent::UnitPropagated { literal, cnf } => {
                tracing::debug!(%literal, clauses = cnf.len(), "unit clause rule");
            }
            TraceEvent::PureEliminated { literal, cnf } => {
                tracing::debug!(%literal, clauses = cnf.len(), "pure literal rule");
            }
            TraceEvent::Branch {
                literal,
                positive,
                cnf,
            } => {
                tracing::debug!(%literal, positive, clauses = cnf.len(), "split");
            }
            TraceEvent::Resolvent {
                index,
                resolvent,
                left,
                right,
            } => {
                tracing::debug!(index, %resolvent, %left, %right, "resolvent");
            }
            TraceEvent::ResolutionRound { round, clauses } => {
                tracing::debug!(round, clauses, "resolution round");
            }
            TraceEvent::Saturated => tracing::debug!("no new resolvent"),
            TraceEvent::Contradiction => tracing::debug!("empty clause derived"),
            TraceEvent::Satisfied => tracing::debug!("empty clause set"),
        }
    }
}

/// Prints numbered snapshots of the clause set after every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintTrace;

/// Writes `cnf` one clause per line, numbered from 1. An empty clause is
/// written as a bare `EMPTY SET` but still takes its number; an empty
/// clause set writes nothing.
fn write_snapshot<W: Write>(out: &mut W, cnf: &Cnf) -> io::Result<()> {
    for (idx, clause) in cnf.iter().enumerate() {
        if clause.is_empty() {
            writeln!(out, "EMPTY SET")?;
        } else {
            writeln!(out, "{}: {clause}", idx + 1)?;
        }
    }
    Ok(())
}

fn write_event<W: Write>(out: &mut W, event: &TraceEvent<'_>) -> io::Result<()> {
    match *event {
        TraceEvent::UnitPropagated { literal, cnf } => {
            writeln!(out, "Applying unit clause rule with literal {literal}")?;
            write_snapshot(out, cnf)
        }
        TraceEvent::PureEliminated { literal, cnf } => {
            writeln!(out, "Applying pure literal rule for literal {literal}")?;
            write_snapshot(out, cnf)
        }
        TraceEvent::Branch {
            literal,
            positive,
            cnf,
        } => {
            let side = if positive { "positive" } else { "negative" };
            writeln!(out, "Splitting on {literal}, {side} branch")?;
            write_snapshot(out, cnf)
        }
        TraceEvent::Resolvent {
            index,
            resolvent,
            left,
            right,
        } => writeln!(out, "{index}: {resolvent} from {left} and {right}"),
        TraceEvent::ResolutionRound { round, clauses } => {
            writeln!(out, "Resolution round {round} over {clauses} clauses")
        }
        TraceEvent::Saturated => writeln!(out, "No new resolvent can be added"),
        TraceEvent::Contradiction => writeln!(out, "Empty clause found"),
        TraceEvent::Satisfied => writeln!(out, "Empty clause set"),
    }
}

impl Tracer for PrintTrace {
    fn event(&mut self, event: &TraceEvent<'_>) {
        // A closed stdout must not change the verdict.
        let _ = write_event(&mut io::stdout().lock(), event);
    }
}

/// Keeps every event as text.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct RecordingTrace {
    pub events: Vec<String>,
}

#[cfg(test)]
impl Tracer for RecordingTrace {
    fn event(&mut self, event: &TraceEvent<'_>) {
        let line = match *event {
            TraceEvent::UnitPropagated { literal, .. } => format!("unit {literal}"),
            TraceEvent::PureEliminated { literal, .. } => format!("pure {literal}"),
            TraceEvent::Branch {
                literal, positive, ..
            } => format!("split {literal} {}", if positive { "+" } else { "-" }),
            TraceEvent::Resolvent { resolvent, .. } => format!("resolvent {resolvent}"),
            TraceEvent::ResolutionRound { round, .. } => format!("round {round}"),
            TraceEvent::Saturated => "saturated".to_owned(),
            TraceEvent::Contradiction => "contradiction".to_owned(),
            TraceEvent::Satisfied => "satisfied".to_owned(),
        };
        self.events.push(line);
    }
}

/// A tracer chosen at runtime.
#[derive(Debug, Clone, Copy, Default)]
pub enum TracerImpls {
    #[default]
    NoTrace,
    LogTrace,
    PrintTrace,
}

impl TracerImpls {
    /// `verbose` wins over `debug`.
    #[must_use]
    pub const fn from_flags(verbose: bool, debug: bool) -> Self {
        if verbose {
            Self::PrintTrace
        } else if debug {
            Self::LogTrace
        } else {
            Self::NoTrace
        }
    }
}

impl Tracer for TracerImpls {
    fn event(&mut self, event: &TraceEvent<'_>) {
        match self {
            Self::NoTrace => NoTrace.event(event),
            Self::LogTrace => LogTrace.event(event),
            Self::PrintTrace => PrintTrace.event(event),
        }
    }
}
