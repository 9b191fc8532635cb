//! A toy robot simulator.
//!
//! The robot lives on a square table (0..=5 on both axes by default) and is
//! driven by a tiny line-oriented command language:
//!
//! - `PLACE X,Y,F` puts the robot at `X,Y` facing NORTH, EAST, SOUTH or WEST.
//!   The origin `0,0` is the south-west corner.
//! - `MOVE` moves one unit forward in the current direction.
//! - `LEFT` / `RIGHT` rotate 90 degrees without moving.
//! - `REPORT` announces `X,Y,F`.
//!
//! Features and behaviors:
//! - Everything before the first valid PLACE is ignored.
//! - A PLACE or MOVE that would put the robot off the table is ignored; later
//!   valid commands still apply.
//! - Malformed or unknown lines are ignored with a diagnostic and never end
//!   the run.
//!
//! Quick start:
//!
//! ```
//! use toy_robot::{Simulator, Table};
//!
//! let script = "PLACE 1,2,EAST\nMOVE\nMOVE\nLEFT\nMOVE\nREPORT\n";
//! let mut reports = Vec::new();
//! let mut sim = Simulator::new(Table::default());
//! sim.run(script.as_bytes(), &mut reports, std::io::sink())
//!     .expect("in-memory run");
//! assert_eq!(String::from_utf8(reports).unwrap(), "3,3,NORTH\n");
//! ```
//!
//! For single transitions without any I/O, use [`robot::apply`] directly.

pub mod cli_util;
pub mod command;
pub mod commands;
pub mod config;
pub mod repl;
pub mod robot;
pub mod simulator;
pub mod theme;

pub use command::{Command, Orientation, ParseError, PlaceArgError};
pub use config::{ConfigError, TableOverrides};
pub use robot::{apply, CommandError, Outcome, Position, Report, RobotState, Table};
pub use simulator::{Simulator, SimulatorError, Step, Summary};
