//! Robot state, headings and the movement table.

use crate::board::{Board, BoardId};
use crate::error::{Result, SimulatorError};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction the robot faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

/// Direction of a 90 degree rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
}

/// One row of the heading transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeadingRule {
    pub heading: Heading,
    /// Heading after a LEFT.
    pub left: Heading,
    /// Heading after a RIGHT.
    pub right: Heading,
    /// Unit step applied by MOVE.
    pub displacement: IVec2,
}

/// The only place rotation and straight-line movement are defined.
///
/// Adding diagonal headings means adding rows here; nothing else needs to know.
pub static HEADING_TABLE: [HeadingRule; 4] = [
    HeadingRule {
        heading: Heading::North,
        left: Heading::West,
        right: Heading::East,
        displacement: IVec2::new(0, 1),
    },
    HeadingRule {
        heading: Heading::East,
        left: Heading::North,
        right: Heading::South,
        displacement: IVec2::new(1, 0),
    },
    HeadingRule {
        heading: Heading::West,
        left: Heading::South,
        right: Heading::North,
        displacement: IVec2::new(-1, 0),
    },
    HeadingRule {
        heading: Heading::South,
        left: Heading::East,
        right: Heading::West,
        displacement: IVec2::new(0, -1),
    },
];

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Looks up this heading's row in [`HEADING_TABLE`].
    pub fn rule(self) -> &'static HeadingRule {
        let row = match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::West => 2,
            Heading::South => 3,
        };
        &HEADING_TABLE[row]
    }

    /// Returns the heading reached by turning once in `turn`'s direction.
    pub fn turned(self, turn: Turn) -> Heading {
        let rule = self.rule();
        match turn {
            Turn::Left => rule.left,
            Turn::Right => rule.right,
        }
    }

    pub fn displacement(self) -> IVec2 {
        self.rule().displacement
    }

    /// Upper-case name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Heading::North => "NORTH",
            Heading::East => "EAST",
            Heading::South => "SOUTH",
            Heading::West => "WEST",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heading {
    type Err = SimulatorError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Heading::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SimulatorError::MalformedCommand(format!("unknown heading '{wanted}'")))
    }
}

/// Where the robot is and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pose {
    pub position: IVec2,
    pub heading: Heading,
}

impl Pose {
    /// Tile one step ahead.
    pub fn ahead(&self) -> IVec2 {
        self.position + self.heading.displacement()
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.position.x, self.position.y, self.heading)
    }
}

/// A robot that may or may not be standing on a board.
///
/// An unplaced robot has no pose at all; position and heading are set
/// together by the first successful [`place`](Self::place), which also ties
/// the robot to that board. From then on the robot's tile stays marked
/// occupied there, and every operation taking a board refuses any other one
/// with [`SimulatorError::ForeignBoard`].
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct Robot {
    pose: Option<Pose>,

    /// Set together with `pose`.
    #[serde(skip)]
    board: Option<BoardId>,
}

impl Robot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_placed(&self) -> bool {
        self.pose.is_some()
    }

    /// True iff the robot is placed on `board`.
    pub fn is_on(&self, board: &Board) -> bool {
        self.board == Some(board.id())
    }

    pub fn pose(&self) -> Option<Pose> {
        self.pose
    }

    pub fn position(&self) -> Option<IVec2> {
        self.pose.map(|p| p.position)
    }

    pub fn heading(&self) -> Option<Heading> {
        self.pose.map(|p| p.heading)
    }

    /// Fails unless the robot is placed on `board`.
    pub fn check_board(&self, board: &Board) -> Result<()> {
        match self.board {
            None => Err(SimulatorError::NotPlaced),
            Some(id) if id == board.id() => Ok(()),
            Some(_) => Err(SimulatorError::ForeignBoard),
        }
    }

    /// Puts the robot on `board` at `position` facing `heading`.
    ///
    /// On first placement the target tile must accept an obstruction.
    /// When already placed, placing on the current tile only changes the
    /// heading; placing elsewhere claims the new tile before releasing the
    /// old one. A placed robot cannot be placed on a different board.
    /// Nothing changes on failure.
    pub fn place(&mut self, position: IVec2, heading: Heading, board: &mut Board) -> Result<()> {
        match self.pose {
            None => {
                board.try_add_obstruction(position)?;
                tracing::debug!(x = position.x, y = position.y, %heading, "robot placed");
            }
            Some(current) => {
                self.check_board(board)?;
                if current.position == position {
                    tracing::debug!(from = %current.heading, to = %heading, "robot re-faced in place");
                } else {
                    relocate(board, current.position, position)?;
                    tracing::debug!(
                        from_x = current.position.x,
                        from_y = current.position.y,
                        x = position.x,
                        y = position.y,
                        %heading,
                        "robot repositioned"
                    );
                }
            }
        }
        self.pose = Some(Pose { position, heading });
        self.board = Some(board.id());
        Ok(())
    }

    /// Rotates 90 degrees. Does nothing when the robot is not placed.
    pub fn rotate(&mut self, turn: Turn) {
        if let Some(pose) = self.pose.as_mut() {
            let from = pose.heading;
            pose.heading = from.turned(turn);
            tracing::debug!(%from, to = %pose.heading, "robot rotated");
        }
    }

    /// Steps one tile forward. Fails without any change when the tile ahead
    /// is off the board or occupied, when the robot is not placed, or when
    /// `board` is not the one it stands on.
    pub fn move_forward(&mut self, board: &mut Board) -> Result<()> {
        self.check_board(board)?;
        let pose = self.pose.as_mut().ok_or(SimulatorError::NotPlaced)?;
        let target = pose.ahead();
        relocate(board, pose.position, target)?;
        tracing::debug!(x = target.x, y = target.y, "robot moved");
        pose.position = target;
        Ok(())
    }

    /// `x,y,HEADING`, or `None` when the robot is not placed.
    pub fn report(&self) -> Option<String> {
        self.pose.map(|p| p.to_string())
    }
}

/// Moves an obstruction from `from` to `to`, claiming the destination first
/// so the robot is never without a tile.
fn relocate(board: &mut Board, from: IVec2, to: IVec2) -> Result<()> {
    board.try_add_obstruction(to)?;
    board.remove_obstruction(from);
    Ok(())
}
