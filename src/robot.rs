//! The robot state machine.
//!
//! [`apply`] is a pure transition function: it takes the current
//! [`RobotState`] by value and returns the next state together with an
//! [`Outcome`] describing what happened. Nothing here performs I/O.

use std::fmt;

use crate::command::{Command, Orientation, ParseError};

/// Inclusive upper bounds of the table. The lower bound is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub max_x: i32,
    pub max_y: i32,
}

impl Table {
    pub const DEFAULT_MAX: i32 = 5;

    pub fn new(max_x: i32, max_y: i32) -> Self {
        Self { max_x, max_y }
    }

    pub fn contains(&self, position: Position) -> bool {
        (0..=self.max_x).contains(&position.x) && (0..=self.max_y).contains(&position.y)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX, Self::DEFAULT_MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one unit ahead when facing `orientation`, or `None` if
    /// that leaves the `i32` range. Not bound checked against any table.
    pub fn step(self, orientation: Orientation) -> Option<Self> {
        let (dx, dy) = orientation.delta();
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Widen a placement target; `None` if it cannot be a cell of any table.
    fn from_wide(x: i64, y: i64) -> Option<Self> {
        Some(Self::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
    }
}

/// Where the robot is, which way it faces, and whether it has been placed.
///
/// While `placed` is false, `position` and `orientation` hold their defaults
/// and carry no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotState {
    pub position: Position,
    pub orientation: Orientation,
    pub placed: bool,
}

impl Default for RobotState {
    fn default() -> Self {
        Self {
            position: Position::default(),
            orientation: Orientation::North,
            placed: false,
        }
    }
}

impl RobotState {
    /// A placed robot. Callers are responsible for the bound check.
    pub fn placed_at(x: i32, y: i32, orientation: Orientation) -> Self {
        Self {
            position: Position::new(x, y),
            orientation,
            placed: true,
        }
    }

    /// The REPORT payload, or `None` while unplaced.
    pub fn report(&self) -> Option<Report> {
        self.placed.then_some(Report {
            position: self.position,
            orientation: self.orientation,
        })
    }
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.report() {
            Some(report) => write!(f, "{report}"),
            None => f.write_str("unplaced"),
        }
    }
}

/// Payload of an accepted REPORT, displayed as `X,Y,F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub position: Position,
    pub orientation: Orientation,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.position.x, self.position.y, self.orientation)
    }
}

/// Reason a command had no effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The line did not parse, or named an unknown command.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// MOVE/LEFT/RIGHT/REPORT arrived before the first valid PLACE.
    #[error("still expecting first PLACE")]
    NotPlaced,

    /// PLACE or MOVE targeted a cell outside the table.
    #[error("({x},{y}) is off the table")]
    WouldFall { x: i64, y: i64 },
}

/// What applying a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command took effect. REPORT carries its payload.
    Accepted(Option<Report>),
    /// The command was not applicable and was skipped.
    Ignored(CommandError),
    /// The command was refused because it would break the table bound.
    Rejected(CommandError),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn report(&self) -> Option<Report> {
        match self {
            Outcome::Accepted(report) => *report,
            _ => None,
        }
    }
}

/// Apply `command` to `state` on `table`.
///
/// Returns the next state and the outcome. A rejected or ignored command
/// always returns `state` unchanged.
pub fn apply(command: &Command, state: RobotState, table: &Table) -> (RobotState, Outcome) {
    // Everything but PLACE (and unparsed input) needs a robot on the table.
    let needs_placement = !matches!(command, Command::Place { .. } | Command::Unknown(_));
    if needs_placement && !state.placed {
        return (state, Outcome::Ignored(CommandError::NotPlaced));
    }

    match command {
        Command::Place { x, y, facing } => match Position::from_wide(*x, *y) {
            Some(target) if table.contains(target) => (
                RobotState::placed_at(target.x, target.y, *facing),
                Outcome::Accepted(None),
            ),
            _ => (state, Outcome::Rejected(CommandError::WouldFall { x: *x, y: *y })),
        },
        Command::Move => match state.position.step(state.orientation) {
            Some(target) if table.contains(target) => {
                (RobotState { position: target, ..state }, Outcome::Accepted(None))
            }
            _ => {
                let (dx, dy) = state.orientation.delta();
                let x = i64::from(state.position.x) + i64::from(dx);
                let y = i64::from(state.position.y) + i64::from(dy);
                (state, Outcome::Rejected(CommandError::WouldFall { x, y }))
            }
        },
        Command::Left => (
            RobotState { orientation: state.orientation.left(), ..state },
            Outcome::Accepted(None),
        ),
        Command::Right => (
            RobotState { orientation: state.orientation.right(), ..state },
            Outcome::Accepted(None),
        ),
        Command::Report => (state, Outcome::Accepted(state.report())),
        Command::Unknown(err) => (state, Outcome::Ignored(CommandError::Parse(err.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> (RobotState, Vec<Outcome>) {
        let table = Table::default();
        let mut state = RobotState::default();
        let mut outcomes = Vec::new();
        for line in lines {
            let (next, outcome) = apply(&Command::parse_line(line), state, &table);
            state = next;
            outcomes.push(outcome);
        }
        (state, outcomes)
    }

    fn reports(outcomes: &[Outcome]) -> Vec<String> {
        outcomes.iter().filter_map(Outcome::report).map(|r| r.to_string()).collect()
    }

    #[test]
    fn scenario_move_north() {
        let (_, outcomes) = run(&["PLACE 0,0,NORTH", "MOVE", "REPORT"]);
        assert_eq!(reports(&outcomes), vec!["0,1,NORTH"]);
    }

    #[test]
    fn scenario_turn_left() {
        let (_, outcomes) = run(&["PLACE 0,0,NORTH", "LEFT", "REPORT"]);
        assert_eq!(reports(&outcomes), vec!["0,0,WEST"]);
    }

    #[test]
    fn scenario_mixed_walk() {
        let (_, outcomes) = run(&["PLACE 1,2,EAST", "MOVE", "MOVE", "LEFT", "MOVE", "REPORT"]);
        assert_eq!(reports(&outcomes), vec!["3,3,NORTH"]);
    }

    #[test]
    fn scenario_commands_before_place_are_ignored() {
        let (state, outcomes) = run(&["MOVE", "REPORT"]);
        assert_eq!(state, RobotState::default());
        assert!(reports(&outcomes).is_empty());
        assert!(outcomes.iter().all(|o| *o == Outcome::Ignored(CommandError::NotPlaced)));
    }

    #[test]
    fn scenario_move_off_far_corner_is_rejected() {
        let (state, outcomes) = run(&["PLACE 5,5,NORTH", "MOVE"]);
        assert_eq!(state, RobotState::placed_at(5, 5, Orientation::North));
        assert_eq!(outcomes[1], Outcome::Rejected(CommandError::WouldFall { x: 5, y: 6 }));
    }

    #[test]
    fn move_off_origin_edges_is_rejected() {
        let (state, outcomes) = run(&["PLACE 0,0,SOUTH", "MOVE", "RIGHT", "MOVE"]);
        assert_eq!(state, RobotState::placed_at(0, 0, Orientation::West));
        assert!(matches!(outcomes[1], Outcome::Rejected(CommandError::WouldFall { x: 0, y: -1 })));
        assert!(matches!(outcomes[3], Outcome::Rejected(CommandError::WouldFall { x: -1, y: 0 })));
    }

    #[test]
    fn failed_replace_keeps_existing_placement() {
        let (state, outcomes) = run(&["PLACE 2,2,EAST", "PLACE 6,0,NORTH", "PLACE 0,-1,NORTH"]);
        assert_eq!(state, RobotState::placed_at(2, 2, Orientation::East));
        assert!(matches!(outcomes[1], Outcome::Rejected(_)));
        assert!(matches!(outcomes[2], Outcome::Rejected(_)));
    }

    #[test]
    fn out_of_bounds_first_place_leaves_robot_unplaced() {
        let (state, _) = run(&["PLACE 9,9,NORTH", "MOVE"]);
        assert!(!state.placed);
    }

    #[test]
    fn valid_replace_moves_the_robot() {
        let (_, outcomes) = run(&["PLACE 0,0,NORTH", "PLACE 4,1,WEST", "REPORT"]);
        assert_eq!(reports(&outcomes), vec!["4,1,WEST"]);
    }

    #[test]
    fn unknown_lines_are_ignored_without_touching_state() {
        let (state, outcomes) = run(&["PLACE 1,1,NORTH", "JUMP", "", "PLACE x,1,NORTH"]);
        assert_eq!(state, RobotState::placed_at(1, 1, Orientation::North));
        assert!(matches!(outcomes[1], Outcome::Ignored(CommandError::Parse(ParseError::UnknownKeyword { .. }))));
        assert!(matches!(outcomes[2], Outcome::Ignored(CommandError::Parse(ParseError::Empty))));
        assert!(matches!(outcomes[3], Outcome::Ignored(CommandError::Parse(ParseError::MalformedPlace { .. }))));
    }

    #[test]
    fn unknown_before_place_reports_the_parse_reason() {
        let (_, outcomes) = run(&["HELLO"]);
        assert!(matches!(outcomes[0], Outcome::Ignored(CommandError::Parse(_))));
    }

    #[test]
    fn custom_table_bounds_are_respected() {
        let table = Table::new(1, 3);
        let (state, outcome) = apply(&Command::parse_line("PLACE 2,0,NORTH"), RobotState::default(), &table);
        assert!(matches!(outcome, Outcome::Rejected(_)));
        assert!(!state.placed);

        let (state, outcome) = apply(&Command::parse_line("PLACE 1,3,EAST"), state, &table);
        assert!(outcome.is_accepted());
        let (_, outcome) = apply(&Command::Move, state, &table);
        assert!(matches!(outcome, Outcome::Rejected(_)));
    }

    #[test]
    fn move_past_the_widest_table_is_rejected() {
        let table = Table::new(i32::MAX, 5);
        let start = RobotState::placed_at(i32::MAX, 0, Orientation::East);
        let (state, outcome) = apply(&Command::Move, start, &table);
        assert_eq!(state, start);
        assert_eq!(
            outcome,
            Outcome::Rejected(CommandError::WouldFall { x: i64::from(i32::MAX) + 1, y: 0 })
        );

        let (state, outcome) = apply(&Command::Move, RobotState::placed_at(i32::MAX, 0, Orientation::West), &table);
        assert!(outcome.is_accepted());
        assert_eq!(state.position, Position::new(i32::MAX - 1, 0));
    }

    #[test]
    fn oversized_place_is_a_boundary_rejection() {
        let table = Table::new(i32::MAX, i32::MAX);
        let (state, outcome) = apply(&Command::parse_line("PLACE 99999999999,0,NORTH"), RobotState::default(), &table);
        assert!(!state.placed);
        assert_eq!(outcome, Outcome::Rejected(CommandError::WouldFall { x: 99_999_999_999, y: 0 }));

        let (state, outcome) = apply(&Command::parse_line("PLACE 2147483647,0,NORTH"), state, &table);
        assert!(outcome.is_accepted());
        assert_eq!(state, RobotState::placed_at(i32::MAX, 0, Orientation::North));
    }

    #[test]
    fn report_display_has_no_spaces() {
        let report = RobotState::placed_at(3, 4, Orientation::South).report().unwrap();
        assert_eq!(report.to_string(), "3,4,SOUTH");
        assert!(RobotState::default().report().is_none());
    }
}
