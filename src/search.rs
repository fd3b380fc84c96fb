// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! The backtracking search for a knight's tour.
//!
//! A search owns the occupancy of the board and the path built so far. Both change only through
//! a [`Visit`]: entering a visit occupies the square and appends it to the path, and dropping the
//! visit undoes both. Since the undo happens on drop, it runs on every way out of a recursion
//! step (a completed tour, a dead end or exhausted candidates alike), so squares on the path and
//! occupied squares always coincide.

use crate::monitor::{SearchMonitor, SearchStatistics};
use crate::{BoardState, BoardValue, Coordinate, KnightMove, Problem, Tour};
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

/// A single run of the search over one [`Problem`].
pub struct TourSearch<'p, 'm, V, M>
where
    M: ?Sized,
{
    problem: &'p Problem<V>,
    board: BoardState<V>,
    path: Vec<Coordinate<V>>,
    solution: Option<Tour<V>>,
    statistics: SearchStatistics,
    monitor: &'m mut M,
}

impl<V, M> TourSearch<'_, '_, V, M>
where
    M: ?Sized,
{
    /// The path built so far, starting with the starting square.
    pub fn path(&self) -> &[Coordinate<V>] {
        &self.path
    }

    /// The square the knight is currently on, or `None` before the search started or once it has
    /// unwound.
    pub fn current(&self) -> Option<&Coordinate<V>> {
        self.path.last()
    }

    /// The occupancy of the board.
    pub fn board(&self) -> &BoardState<V> {
        &self.board
    }

    /// The statistics collected so far.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

impl<'p, 'm, V, M> TourSearch<'p, 'm, V, M>
where
    V: BoardValue,
    M: SearchMonitor<V> + ?Sized,
{
    /// Prepare a search over `problem`: an empty path on a board with every square free.
    pub fn new(problem: &'p Problem<V>, monitor: &'m mut M) -> Self {
        Self {
            problem,
            board: BoardState::new(*problem.size()),
            path: Vec::with_capacity(problem.area()),
            solution: None,
            statistics: SearchStatistics::default(),
            monitor,
        }
    }

    /// Run the search to completion, returning the first tour found.
    pub fn run(mut self) -> Option<Tour<V>> {
        self.monitor.on_enter_search(self.problem, &self.statistics);
        let start = *self.problem.start();
        let found = self.backtrack(start);
        debug_assert!(self.path.is_empty());
        debug_assert_eq!(0, self.board.occupied());
        debug_assert_eq!(found, self.solution.is_some());
        self.monitor.on_exit_search(found, &self.statistics);
        self.solution
    }

    /// Visit `square` and explore onwards from it. Returns whether a tour was found, in which case
    /// no further squares are visited.
    fn backtrack(&mut self, square: Coordinate<V>) -> bool {
        let mut visit = Visit::enter(self, square);
        if visit.is_complete() {
            visit.capture();
            return true;
        }
        for next in visit.candidates().into_iter().flatten() {
            if visit.backtrack(next) {
                return true;
            }
        }
        false
    }

    /// Jumps from the current square which land on a free square of the board, in the order of
    /// [`KnightMove::ALL`].
    fn candidates(&mut self) -> [Option<Coordinate<V>>; 8] {
        let Some(current) = self.path.last().copied() else {
            return [None; 8];
        };
        let board = &self.board;
        let candidates = KnightMove::ALL.map(|mv| current.jump(mv).filter(|sq| board.is_free(sq)));
        let count = candidates.iter().flatten().count();
        self.statistics.on_candidates(count);
        candidates
    }

    fn is_complete(&self) -> bool {
        self.path.len() == self.problem.area()
    }

    fn capture(&mut self) {
        let tour = Tour::from(self.path.clone());
        self.monitor.on_solution_found(&tour, &self.statistics);
        self.solution = Some(tour);
    }
}

/// A visited square, released again when dropped.
struct Visit<'s, 'p, 'm, V, M>
where
    V: BoardValue,
    M: SearchMonitor<V> + ?Sized,
{
    search: &'s mut TourSearch<'p, 'm, V, M>,
}

impl<'s, 'p, 'm, V, M> Visit<'s, 'p, 'm, V, M>
where
    V: BoardValue,
    M: SearchMonitor<V> + ?Sized,
{
    fn enter(search: &'s mut TourSearch<'p, 'm, V, M>, square: Coordinate<V>) -> Self {
        search.board.occupy(&square);
        search.path.push(square);
        let depth = search.path.len();
        search.statistics.on_visit(depth);
        search.monitor.on_visit(&square, depth, &search.statistics);
        Self { search }
    }
}

impl<'p, 'm, V, M> Deref for Visit<'_, 'p, 'm, V, M>
where
    V: BoardValue,
    M: SearchMonitor<V> + ?Sized,
{
    type Target = TourSearch<'p, 'm, V, M>;

    fn deref(&self) -> &Self::Target {
        &*self.search
    }
}

impl<V, M> DerefMut for Visit<'_, '_, '_, V, M>
where
    V: BoardValue,
    M: SearchMonitor<V> + ?Sized,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.search
    }
}

impl<V, M> Drop for Visit<'_, '_, '_, V, M>
where
    V: BoardValue,
    M: SearchMonitor<V> + ?Sized,
{
    fn drop(&mut self) {
        let search = &mut *self.search;
        if let Some(square) = search.path.pop() {
            search.board.release(&square);
            if search.solution.is_none() {
                search.statistics.on_backtrack();
                search.monitor.on_backtrack(&square, &search.statistics);
            }
        }
    }
}
