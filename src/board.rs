// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Occupancy of the squares of a board.

use crate::{BoardValue, Coordinate};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};

fn checked_area<V>(size: V) -> usize
where
    V: BoardValue,
{
    match crate::area(size) {
        Some(area) => area,
        None => panic!("a {size}x{size} board has too many squares to be addressed"),
    }
}

/// Which squares of a `size`×`size` board are currently occupied. Squares are addressed by
/// [`Coordinate`] and stored row-major by file.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BoardState<V> {
    size: V,
    free: Vec<bool>,
    occupied: usize,
}

impl<V> BoardState<V> {
    /// The size of the board.
    pub fn size(&self) -> &V {
        &self.size
    }

    /// The number of squares which are currently occupied.
    pub fn occupied(&self) -> usize {
        self.occupied
    }
}

impl<V> BoardState<V>
where
    V: BoardValue,
{
    /// An empty board of the provided size, with every square free.
    ///
    /// # Panics
    ///
    /// Panics if the number of squares does not fit in a `usize`; [`Problem::new`] rejects such
    /// sizes.
    ///
    /// [`Problem::new`]: crate::Problem::new
    pub fn new(size: V) -> Self {
        Self {
            size,
            free: vec![true; checked_area(size)],
            occupied: 0,
        }
    }

    /// Replace this board with an empty board of the provided size. Panics like
    /// [`BoardState::new`].
    pub fn reset(&mut self, size: V) {
        self.size = size;
        self.free.clear();
        self.free.resize(checked_area(size), true);
        self.occupied = 0;
    }

    fn slot(&mut self, square: &Coordinate<V>) -> &mut bool {
        match square.as_index(self.size).and_then(|idx| self.free.get_mut(idx)) {
            Some(slot) => slot,
            None => panic!(
                "square {square} is not on the {}x{} board",
                self.size, self.size
            ),
        }
    }

    /// Mark a square as occupied. The square must be on the board and currently free.
    pub fn occupy(&mut self, square: &Coordinate<V>) {
        let slot = self.slot(square);
        debug_assert!(*slot, "square {square} was occupied twice");
        *slot = false;
        self.occupied += 1;
    }

    /// Mark a square as free again. The square must be on the board and currently occupied.
    pub fn release(&mut self, square: &Coordinate<V>) {
        let slot = self.slot(square);
        debug_assert!(!*slot, "square {square} was released while free");
        *slot = true;
        self.occupied -= 1;
    }

    /// Whether the square is on the board and free. Squares off the board are never free.
    pub fn is_free(&self, square: &Coordinate<V>) -> bool {
        square
            .as_index(self.size)
            .and_then(|idx| self.free.get(idx).copied())
            .unwrap_or(false)
    }
}

impl<V> Display for BoardState<V>
where
    V: BoardValue,
{
    /// Draws the board with the highest rank on top; `.` is free, `N` is occupied.
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let size: usize = self.size.into();
        for rank in (0..size).rev() {
            for file in 0..size {
                let free = self.free[file * size + rank];
                let mark = if free { '.' } else { 'N' };
                write!(f, "{mark}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
