use crate::error::{Result, SimulatorError};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default side length of the tabletop.
pub const DEFAULT_BOARD_SIZE: u32 = 5;

static NEXT_BOARD_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a board instance, handed out once per constructed board.
///
/// A robot remembers the id of the board it was placed on and refuses to be
/// driven against any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardId(u64);

impl Default for BoardId {
    fn default() -> Self {
        Self(NEXT_BOARD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A square tabletop of `side_length × side_length` tiles.
///
/// Coordinates run from `0` to `side_length - 1` on both axes, with `(0, 0)`
/// in the south-west corner. The board only knows which tiles are occupied;
/// it does not know who occupies them.
///
/// Boards are not `Clone`: each one has its own [`BoardId`]. Equality compares
/// size and occupancy only.
#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    #[serde(skip)]
    id: BoardId,

    /// Number of tiles along each edge.
    side_length: u32,

    /// Tiles currently marked as obstructed. Every entry is on the board.
    occupied: HashSet<IVec2>,
}

/// Unchecked wire form of a [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    side_length: u32,
    occupied: HashSet<IVec2>,
}

impl TryFrom<RawBoard> for Board {
    type Error = SimulatorError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        let mut board = Board::new(raw.side_length)?;
        for pos in raw.occupied {
            board.try_add_obstruction(pos)?;
        }
        Ok(board)
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.side_length == other.side_length && self.occupied == other.occupied
    }
}

impl Eq for Board {}

impl Board {
    /// Creates an empty board. Fails when `side_length` is zero.
    pub fn new(side_length: u32) -> Result<Self> {
        if side_length == 0 {
            return Err(SimulatorError::InvalidBoardSize(side_length));
        }
        Ok(Self {
            id: BoardId::default(),
            side_length,
            occupied: HashSet::new(),
        })
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn side_length(&self) -> u32 {
        self.side_length
    }

    /// Iterates over the occupied tiles in no particular order.
    pub fn occupied(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.occupied.iter().copied()
    }

    /// True iff both components are non-negative and strictly less than the side length.
    pub fn is_valid_coordinate(&self, pos: IVec2) -> bool {
        let side = i64::from(self.side_length);
        (0..side).contains(&i64::from(pos.x)) && (0..side).contains(&i64::from(pos.y))
    }

    /// True iff no obstruction sits on `pos`.
    pub fn is_empty(&self, pos: IVec2) -> bool {
        !self.occupied.contains(&pos)
    }

    /// Checks that `pos` could accept an obstruction, without marking it.
    pub fn check_available(&self, pos: IVec2) -> Result<()> {
        if !self.is_valid_coordinate(pos) {
            return Err(SimulatorError::OutOfBounds { x: pos.x, y: pos.y });
        }
        if !self.is_empty(pos) {
            return Err(SimulatorError::TileOccupied { x: pos.x, y: pos.y });
        }
        Ok(())
    }

    /// Marks `pos` as occupied, or explains why it cannot be. Leaves the
    /// board untouched on failure.
    pub fn try_add_obstruction(&mut self, pos: IVec2) -> Result<()> {
        self.check_available(pos)?;
        self.occupied.insert(pos);
        Ok(())
    }

    /// Boolean form of [`try_add_obstruction`](Self::try_add_obstruction).
    pub fn add_obstruction(&mut self, pos: IVec2) -> bool {
        self.try_add_obstruction(pos).is_ok()
    }

    /// Clears `pos`. Returns whether it was occupied.
    pub fn remove_obstruction(&mut self, pos: IVec2) -> bool {
        self.occupied.remove(&pos)
    }

    /// Snapshot of the board as rows of `0`/`1`.
    ///
    /// Row 0 is the top edge (largest y); the column index is x.
    pub fn state(&self) -> Vec<Vec<u8>> {
        let side = self.side_length as usize;
        let mut rows = vec![vec![0u8; side]; side];
        let max_y = side - 1;
        for pos in &self.occupied {
            rows[max_y - pos.y as usize][pos.x as usize] = 1;
        }
        rows
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.state() {
            let line: Vec<String> = row.iter().map(u8::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
