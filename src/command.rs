//! Parsing of raw input lines into robot commands.
//!
//! The command language is line oriented and case-sensitive:
//!
//! ```text
//! PLACE X,Y,F
//! MOVE
//! LEFT
//! RIGHT
//! REPORT
//! ```
//!
//! Parsing never fails hard: [`Command::parse_line`] folds every malformed or
//! unrecognized line into [`Command::Unknown`], which the state machine ignores.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

/// Compass direction the robot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    /// All orientations in clockwise order, starting at NORTH.
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Rotate 90 degrees counter-clockwise.
    pub fn left(self) -> Self {
        match self {
            Orientation::North => Orientation::West,
            Orientation::West => Orientation::South,
            Orientation::South => Orientation::East,
            Orientation::East => Orientation::North,
        }
    }

    /// Rotate 90 degrees clockwise.
    pub fn right(self) -> Self {
        match self {
            Orientation::North => Orientation::East,
            Orientation::East => Orientation::South,
            Orientation::South => Orientation::West,
            Orientation::West => Orientation::North,
        }
    }

    /// Unit step `(dx, dy)` for one MOVE in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Orientation::North => (0, 1),
            Orientation::East => (1, 0),
            Orientation::South => (0, -1),
            Orientation::West => (-1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::North => "NORTH",
            Orientation::East => "EAST",
            Orientation::South => "SOUTH",
            Orientation::West => "WEST",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = PlaceArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORTH" => Ok(Orientation::North),
            "EAST" => Ok(Orientation::East),
            "SOUTH" => Ok(Orientation::South),
            "WEST" => Ok(Orientation::West),
            other => Err(PlaceArgError::Facing(other.to_string())),
        }
    }
}

/// Why a line could not be turned into a recognized command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line was blank after trimming.
    #[error("no command given")]
    Empty,

    /// The first token is not one of PLACE/MOVE/LEFT/RIGHT/REPORT.
    #[error("not a valid command: {keyword}")]
    UnknownKeyword { keyword: String },

    /// PLACE was given but its `X,Y,F` argument could not be parsed.
    #[error("malformed PLACE arguments: {reason}")]
    MalformedPlace {
        #[source]
        reason: PlaceArgError,
    },
}

/// Detail for [`ParseError::MalformedPlace`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceArgError {
    #[error("expected X,Y,F after PLACE")]
    Missing,

    #[error("expected 3 comma-separated values, found {found} in '{raw}'")]
    Arity { found: usize, raw: String },

    #[error("coordinate '{0}' is not an integer")]
    Coordinate(String),

    #[error("unknown orientation '{0}'")]
    Facing(String),
}

/// A single parsed instruction.
///
/// PLACE coordinates are wider than any table bound so that out-of-range
/// integers still reach the bound check as a placement off the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place { x: i64, y: i64, facing: Orientation },
    Move,
    Left,
    Right,
    Report,
    /// Anything that failed to parse. Carries the reason for diagnostics.
    Unknown(ParseError),
}

impl Command {
    /// Parse one raw input line. Never fails: malformed lines become
    /// [`Command::Unknown`].
    pub fn parse_line(line: &str) -> Command {
        line.parse().unwrap_or_else(Command::Unknown)
    }

    /// The keyword this command was written with, or `None` for `Unknown`.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Command::Place { .. } => Some("PLACE"),
            Command::Move => Some("MOVE"),
            Command::Left => Some("LEFT"),
            Command::Right => Some("RIGHT"),
            Command::Report => Some("REPORT"),
            Command::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Place { x, y, facing } => write!(f, "PLACE {x},{y},{facing}"),
            Command::Unknown(err) => write!(f, "<{err}>"),
            other => f.write_str(other.keyword().unwrap_or_default()),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        // Single-space separated; extra tokens past what a command needs are ignored.
        let mut tokens = trimmed.split(' ');
        let keyword = tokens.next().unwrap_or_default();

        match keyword {
            "PLACE" => parse_place_args(tokens.next())
                .map_err(|reason| ParseError::MalformedPlace { reason }),
            "MOVE" => Ok(Command::Move),
            "LEFT" => Ok(Command::Left),
            "RIGHT" => Ok(Command::Right),
            "REPORT" => Ok(Command::Report),
            other => Err(ParseError::UnknownKeyword {
                keyword: other.to_string(),
            }),
        }
    }
}

fn parse_place_args(arg: Option<&str>) -> Result<Command, PlaceArgError> {
    let raw = match arg {
        Some(a) if !a.is_empty() => a,
        _ => return Err(PlaceArgError::Missing),
    };

    let parts: Vec<&str> = raw.split(',').collect();
    let [x, y, facing] = parts.as_slice() else {
        return Err(PlaceArgError::Arity {
            found: parts.len(),
            raw: raw.to_string(),
        });
    };

    Ok(Command::Place {
        x: parse_coordinate(x)?,
        y: parse_coordinate(y)?,
        facing: facing.parse()?,
    })
}

/// Parse one PLACE coordinate. Integers too large for `i64` saturate, which
/// keeps them off every table instead of turning them into a parse failure.
pub fn parse_coordinate(s: &str) -> Result<i64, PlaceArgError> {
    match s.parse::<i64>() {
        Ok(v) => Ok(v),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(PlaceArgError::Coordinate(s.to_string())),
        },
    }
}
