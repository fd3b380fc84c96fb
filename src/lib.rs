// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! knight-tour: finds a knight's tour over a square board.
//!
//! A knight's tour is a sequence of knight jumps which visits every square of the board exactly
//! once. This library searches for the first such tour from a given starting square by plain
//! depth-first backtracking: squares are visited, their candidate jumps explored in a fixed
//! order, and the visit undone on the way back out. No move-ordering heuristics are applied, so
//! the search is exhaustive and, for boards without a tour, exponential; the result is
//! nonetheless deterministic for a given problem.
//!
//! Squares are addressed by 1-indexed `(file, rank)` pairs, as on a chessboard.
//!
//! ```
//! use knight_tour::{Coordinate, search};
//!
//! let tour = search(5u8, Coordinate::new(1, 1)).unwrap().unwrap();
//! assert_eq!(25, tour.len());
//! ```

#![no_std]

use core::error::Error;
use core::fmt::{Debug, Display, Formatter};
use core::ops::Neg;
use num_traits::{CheckedAdd, CheckedSub, One, Unsigned, Zero};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod board;
pub mod monitor;
pub mod search;
pub mod tour;

pub use board::BoardState;
pub use search::TourSearch;
pub use tour::{InvalidTourError, InvalidTourType, Tour};

/// Marker trait: specifies that a value may be used for board sizes and coordinates.
pub trait BoardValue:
    One
    + Ord
    + CheckedAdd
    + CheckedSub
    + Copy
    + Into<usize>
    + TryFrom<usize>
    + Zero
    + Debug
    + Display
    + Unsigned
    + DeserializeOwned
    + Serialize
    + 'static
{
}

impl<V> BoardValue for V where
    V: One
        + Ord
        + CheckedAdd
        + CheckedSub
        + Copy
        + Into<usize>
        + TryFrom<usize>
        + Zero
        + Debug
        + Display
        + Unsigned
        + DeserializeOwned
        + Serialize
        + 'static
{
}

/// One of the eight jumps a knight may make. The name gives the long leg of the jump first:
/// [`KnightMove::RightUp`] moves two files right and one rank up.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum KnightMove {
    /// `(+2, +1)`
    RightUp,
    /// `(+1, +2)`
    UpRight,
    /// `(-1, +2)`
    UpLeft,
    /// `(-2, +1)`
    LeftUp,
    /// `(-2, -1)`
    LeftDown,
    /// `(-1, -2)`
    DownLeft,
    /// `(+1, -2)`
    DownRight,
    /// `(+2, -1)`
    RightDown,
}

impl KnightMove {
    /// All jumps in the order in which the search tries them: counter-clockwise around the
    /// square, starting from two right and one up.
    pub const ALL: [KnightMove; 8] = [
        KnightMove::RightUp,
        KnightMove::UpRight,
        KnightMove::UpLeft,
        KnightMove::LeftUp,
        KnightMove::LeftDown,
        KnightMove::DownLeft,
        KnightMove::DownRight,
        KnightMove::RightDown,
    ];

    /// The `(file, rank)` offset of this jump.
    pub const fn offset(self) -> (i8, i8) {
        match self {
            KnightMove::RightUp => (2, 1),
            KnightMove::UpRight => (1, 2),
            KnightMove::UpLeft => (-1, 2),
            KnightMove::LeftUp => (-2, 1),
            KnightMove::LeftDown => (-2, -1),
            KnightMove::DownLeft => (-1, -2),
            KnightMove::DownRight => (1, -2),
            KnightMove::RightDown => (2, -1),
        }
    }

    /// The jump which takes a knight from `from` to `to`, if the two squares are a knight's
    /// jump apart.
    pub fn between<V>(from: &Coordinate<V>, to: &Coordinate<V>) -> Option<Self>
    where
        V: BoardValue,
    {
        KnightMove::ALL
            .into_iter()
            .find(|mv| from.jump(*mv).is_some_and(|landed| landed == *to))
    }
}

impl Display for KnightMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let (file, rank) = self.offset();
        f.write_fmt(format_args!("({file:+},{rank:+})"))
    }
}

impl Neg for KnightMove {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            KnightMove::RightUp => KnightMove::LeftDown,
            KnightMove::UpRight => KnightMove::DownLeft,
            KnightMove::UpLeft => KnightMove::DownRight,
            KnightMove::LeftUp => KnightMove::RightDown,
            KnightMove::LeftDown => KnightMove::RightUp,
            KnightMove::DownLeft => KnightMove::UpRight,
            KnightMove::DownRight => KnightMove::UpLeft,
            KnightMove::RightDown => KnightMove::LeftUp,
        }
    }
}

/// A square of the board as a 1-indexed `(file, rank)` pair. A coordinate is not tied to a board;
/// whether it lies on one is checked with [`Coordinate::in_bounds`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Coordinate<V> {
    file: V,
    rank: V,
}

impl<V> Coordinate<V> {
    /// Create a new coordinate. No bounds are checked.
    pub const fn new(file: V, rank: V) -> Self {
        Self { file, rank }
    }

    /// The file (column) of the coordinate.
    pub fn file(&self) -> &V {
        &self.file
    }

    /// The rank (row) of the coordinate.
    pub fn rank(&self) -> &V {
        &self.rank
    }
}

impl<V> From<(V, V)> for Coordinate<V> {
    fn from((file, rank): (V, V)) -> Self {
        Self { file, rank }
    }
}

fn step<V>(value: V, delta: i8) -> Option<V>
where
    V: BoardValue,
{
    let magnitude = V::try_from(usize::from(delta.unsigned_abs())).ok()?;
    if delta < 0 {
        value.checked_sub(&magnitude)
    } else {
        value.checked_add(&magnitude)
    }
}

impl<V> Coordinate<V>
where
    V: BoardValue,
{
    /// Whether this coordinate lies within `[1, size] × [1, size]`.
    pub fn in_bounds(&self, size: V) -> bool {
        let one = V::one();
        one <= self.file && self.file <= size && one <= self.rank && self.rank <= size
    }

    /// The coordinate a knight lands on when jumping `mv` from here, or `None` if the landing
    /// square cannot be represented. The result may still lie outside of any particular board.
    pub fn jump(&self, mv: KnightMove) -> Option<Self> {
        let (file, rank) = mv.offset();
        Some(Self {
            file: step(self.file, file)?,
            rank: step(self.rank, rank)?,
        })
    }

    /// The coordinate encoded as an index into the occupancy grid of a board with the provided
    /// size, or `None` if it is not on that board.
    pub fn as_index(&self, size: V) -> Option<usize> {
        if !self.in_bounds(size) {
            return None;
        }
        let file: usize = self.file.into();
        let rank: usize = self.rank.into();
        Some((file - 1) * size.into() + (rank - 1))
    }
}

impl<V> Display for Coordinate<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("({},{})", self.file, self.rank))
    }
}

/// The reason a problem was rejected, associated with an [`OutOfBoundsError`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutOfBoundsType {
    /// The starting square is not on the board.
    Start,
    /// The number of squares on the board does not fit in a `usize`.
    Area,
}

/// An error which denotes that a problem does not fit its board: either the starting square is
/// not on the board, or the board is too large to be addressed at all.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct OutOfBoundsError<V> {
    size: V,
    start: Coordinate<V>,
    variant: OutOfBoundsType,
}

impl<V> OutOfBoundsError<V> {
    /// The size of the board the problem was posed on.
    pub fn size(&self) -> &V {
        &self.size
    }

    /// The starting square of the rejected problem.
    pub fn start(&self) -> &Coordinate<V> {
        &self.start
    }

    /// Why the problem was rejected.
    pub fn variant(&self) -> OutOfBoundsType {
        self.variant
    }
}

impl<V> Display for OutOfBoundsError<V>
where
    V: BoardValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self.variant {
            OutOfBoundsType::Start => f.write_fmt(format_args!(
                "initial square {} is out of the {}x{} board",
                self.start, self.size, self.size
            )),
            OutOfBoundsType::Area => f.write_fmt(format_args!(
                "a {}x{} board has too many squares to be addressed",
                self.size, self.size
            )),
        }
    }
}

impl<V> Error for OutOfBoundsError<V> where V: BoardValue {}

/// The number of squares of a `size`×`size` board, or `None` if it does not fit in a `usize`.
pub(crate) fn area<V>(size: V) -> Option<usize>
where
    V: BoardValue,
{
    let size: usize = size.into();
    size.checked_mul(size)
}

/// A knight's tour problem: a board size and a starting square on that board. A problem can
/// only be constructed with a starting square on the board, so every problem may be searched.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Problem<V> {
    size: V,
    start: Coordinate<V>,
}

impl<V> Problem<V> {
    /// The size (number of files and of ranks) of the board.
    pub fn size(&self) -> &V {
        &self.size
    }

    /// The square the knight starts on.
    pub fn start(&self) -> &Coordinate<V> {
        &self.start
    }
}

impl<V> Problem<V>
where
    V: BoardValue,
{
    /// Define a new problem, or an error if `start` does not lie on a `size`×`size` board or the
    /// board has more squares than a `usize` can count.
    pub fn new<C: Into<Coordinate<V>>>(size: V, start: C) -> Result<Self, OutOfBoundsError<V>> {
        let start = start.into();
        let variant = if !start.in_bounds(size) {
            OutOfBoundsType::Start
        } else if area(size).is_none() {
            OutOfBoundsType::Area
        } else {
            return Ok(Self { size, start });
        };
        Err(OutOfBoundsError {
            size,
            start,
            variant,
        })
    }

    /// The number of squares on the board, which is also the length of any tour.
    pub fn area(&self) -> usize {
        let size: usize = self.size.into();
        size * size
    }

    /// Search for the first tour of this problem. `None` means no tour exists from the starting
    /// square.
    pub fn search(&self) -> Option<Tour<V>> {
        self.search_with(&mut monitor::NoOpMonitor)
    }

    /// Search for the first tour of this problem, reporting progress to `monitor`.
    pub fn search_with<M>(&self, monitor: &mut M) -> Option<Tour<V>>
    where
        M: monitor::SearchMonitor<V> + ?Sized,
    {
        TourSearch::new(self, monitor).run()
    }
}

/// Search a `size`×`size` board for a knight's tour starting at `start`.
///
/// Fails only if `start` is not on the board, or the board is too large to be addressed. Finding
/// no tour is not an error: the result is then `Ok(None)`.
pub fn search<V, C>(size: V, start: C) -> Result<Option<Tour<V>>, OutOfBoundsError<V>>
where
    V: BoardValue,
    C: Into<Coordinate<V>>,
{
    Ok(Problem::new(size, start)?.search())
}
