//! The processing loop around the parser and the state machine.
//!
//! A [`Simulator`] owns the single [`RobotState`] for a session and feeds it
//! one line at a time. Reports (`X,Y,F`) and per-line diagnostics
//! (`MOVE - OK`, `PLACE - avoid fall`, ...) are written to two separate sinks
//! so callers can route program output and meta output independently.

use std::io::{self, BufRead, Write};

use tracing::{debug, error};

use crate::command::Command;
use crate::robot::{self, Outcome, RobotState, Table};

/// Errors that end a run. Individual bad commands never do.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    /// The line source failed (I/O error or invalid UTF-8).
    #[error("failed to read input at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// Writing a report or diagnostic failed.
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}

/// The result of feeding one line to the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub command: Command,
    pub outcome: Outcome,
    /// State after the command was applied.
    pub state: RobotState,
}

impl Step {
    /// The one-line diagnostic describing this step.
    pub fn diagnostic(&self) -> String {
        let keyword = self.command.keyword().unwrap_or("input");
        match &self.outcome {
            Outcome::Accepted(_) => format!("{keyword} - OK"),
            Outcome::Rejected(_) => format!("{keyword} - avoid fall"),
            Outcome::Ignored(reason) => format!("ignoring input - {reason}"),
        }
    }
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub accepted: usize,
    pub ignored: usize,
    pub rejected: usize,
    pub reports: usize,
}

impl Summary {
    fn record(&mut self, outcome: &Outcome) {
        self.lines += 1;
        match outcome {
            Outcome::Accepted(report) => {
                self.accepted += 1;
                if report.is_some() {
                    self.reports += 1;
                }
            }
            Outcome::Ignored(_) => self.ignored += 1,
            Outcome::Rejected(_) => self.rejected += 1,
        }
    }
}

/// Drives a robot on a table from a stream of text commands.
pub struct Simulator {
    table: Table,
    state: RobotState,
    diagnostics: bool,
    debug: bool,
}

impl Simulator {
    /// A simulator with an unplaced robot on `table`.
    pub fn new(table: Table) -> Self {
        Self {
            table,
            state: RobotState::default(),
            diagnostics: true,
            debug: false,
        }
    }

    /// Enable or disable the per-line diagnostic output.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// In debug mode `run` writes a step-by-step table to the report sink
    /// instead of reports and diagnostics.
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn state(&self) -> RobotState {
        self.state
    }

    /// Take the robot off the table.
    pub fn reset(&mut self) {
        self.state = RobotState::default();
    }

    /// Parse and apply a single raw line.
    pub fn step(&mut self, line: &str) -> Step {
        let command = Command::parse_line(line);
        let (state, outcome) = robot::apply(&command, self.state, &self.table);
        debug!(%command, ?outcome, %state, "applied command");
        self.state = state;
        Step { command, outcome, state }
    }

    /// Write the report (if any) and the diagnostic line for `step`.
    pub fn emit<O: Write, D: Write>(
        &self,
        step: &Step,
        reports: &mut O,
        diagnostics: &mut D,
    ) -> Result<(), SimulatorError> {
        if self.diagnostics {
            writeln!(diagnostics, "{}", step.diagnostic()).map_err(SimulatorError::Write)?;
        }
        if let Some(report) = step.outcome.report() {
            writeln!(reports, "{report}").map_err(SimulatorError::Write)?;
        }
        Ok(())
    }

    /// Process every line of `input` in order.
    ///
    /// Returns the run summary, or the first I/O failure on the line source
    /// or either sink.
    pub fn run<R, O, D>(
        &mut self,
        input: R,
        mut reports: O,
        mut diagnostics: D,
    ) -> Result<Summary, SimulatorError>
    where
        R: BufRead,
        O: Write,
        D: Write,
    {
        let mut summary = Summary::default();

        if self.debug {
            writeln!(reports, "STEP | INPUT                | OUTCOME                                            | STATE")
                .map_err(SimulatorError::Write)?;
            writeln!(reports, "-----+----------------------+----------------------------------------------------+-------------")
                .map_err(SimulatorError::Write)?;
        }

        for (index, line) in input.lines().enumerate() {
            let number = index + 1;
            let line = line.map_err(|source| {
                error!(line = number, %source, "failed to read input");
                SimulatorError::Read { line: number, source }
            })?;

            let step = self.step(&line);
            summary.record(&step.outcome);

            if self.debug {
                let mut outcome = step.diagnostic();
                if let Some(report) = step.outcome.report() {
                    outcome = format!("{outcome} -> {report}");
                }
                writeln!(
                    reports,
                    "{:<4} | {:<20} | {:<50} | {}",
                    number,
                    line.trim(),
                    outcome,
                    step.state
                )
                .map_err(SimulatorError::Write)?;
            } else {
                self.emit(&step, &mut reports, &mut diagnostics)?;
            }
        }

        reports.flush().map_err(SimulatorError::Write)?;
        diagnostics.flush().map_err(SimulatorError::Write)?;
        debug!(?summary, "run complete");
        Ok(summary)
    }
}
