// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Observing a running search.
//!
//! A [`SearchMonitor`] is told when the search starts and ends, when a square is visited, when a
//! visit is undone and when a tour is found. Every callback receives the [`SearchStatistics`]
//! collected so far. Monitors only observe: they cannot change which tour is found.
//!
//! Two monitors may be combined by passing them as a tuple `(a, b)`.

use crate::{BoardValue, Coordinate, Problem, Tour};
use core::fmt::{Debug, Display, Formatter};

/// Counters collected while searching.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SearchStatistics {
    /// Squares visited, including the starting square.
    pub nodes_visited: u64,
    /// Visits undone without a tour having been found.
    pub backtracks: u64,
    /// Candidate jumps generated (on the board and free at the time).
    pub candidates_generated: u64,
    /// The longest path built so far.
    pub max_depth: usize,
}

impl SearchStatistics {
    #[inline]
    pub(crate) fn on_visit(&mut self, depth: usize) {
        self.nodes_visited = self.nodes_visited.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub(crate) fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_candidates(&mut self, count: usize) {
        self.candidates_generated = self.candidates_generated.saturating_add(count as u64);
    }
}

impl Display for SearchStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "nodes visited: {}, backtracks: {}, candidates generated: {}, max depth: {}",
            self.nodes_visited, self.backtracks, self.candidates_generated, self.max_depth
        )
    }
}

/// Callbacks invoked over the lifetime of a search.
pub trait SearchMonitor<V>
where
    V: BoardValue,
{
    /// The name of the monitor.
    fn name(&self) -> &str;

    /// Called once before the starting square is visited.
    fn on_enter_search(&mut self, _problem: &Problem<V>, _statistics: &SearchStatistics) {}

    /// Called after `square` was appended to the path, which is now `depth` squares long.
    fn on_visit(
        &mut self,
        _square: &Coordinate<V>,
        _depth: usize,
        _statistics: &SearchStatistics,
    ) {
    }

    /// Called after the visit of `square` was undone without a tour having been found.
    fn on_backtrack(&mut self, _square: &Coordinate<V>, _statistics: &SearchStatistics) {}

    /// Called once, when the first tour is found.
    fn on_solution_found(&mut self, _tour: &Tour<V>, _statistics: &SearchStatistics) {}

    /// Called once after the search has unwound completely.
    fn on_exit_search(&mut self, _found: bool, _statistics: &SearchStatistics) {}
}

impl<V> Debug for dyn SearchMonitor<V>
where
    V: BoardValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

/// A monitor which does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoOpMonitor;

impl<V> SearchMonitor<V> for NoOpMonitor
where
    V: BoardValue,
{
    fn name(&self) -> &str {
        "NoOpMonitor"
    }
}

/// A monitor which keeps the statistics of the last search it observed.
#[derive(Copy, Clone, Debug, Default)]
pub struct StatisticsMonitor {
    statistics: SearchStatistics,
    found: bool,
}

impl StatisticsMonitor {
    /// Statistics of the last completed search.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Whether the last completed search found a tour.
    pub fn found(&self) -> bool {
        self.found
    }
}

impl<V> SearchMonitor<V> for StatisticsMonitor
where
    V: BoardValue,
{
    fn name(&self) -> &str {
        "StatisticsMonitor"
    }

    fn on_enter_search(&mut self, _problem: &Problem<V>, statistics: &SearchStatistics) {
        self.statistics = *statistics;
        self.found = false;
    }

    fn on_exit_search(&mut self, found: bool, statistics: &SearchStatistics) {
        self.statistics = *statistics;
        self.found = found;
    }
}

impl<V, A, B> SearchMonitor<V> for (A, B)
where
    V: BoardValue,
    A: SearchMonitor<V>,
    B: SearchMonitor<V>,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, problem: &Problem<V>, statistics: &SearchStatistics) {
        self.0.on_enter_search(problem, statistics);
        self.1.on_enter_search(problem, statistics);
    }

    fn on_visit(&mut self, square: &Coordinate<V>, depth: usize, statistics: &SearchStatistics) {
        self.0.on_visit(square, depth, statistics);
        self.1.on_visit(square, depth, statistics);
    }

    fn on_backtrack(&mut self, square: &Coordinate<V>, statistics: &SearchStatistics) {
        self.0.on_backtrack(square, statistics);
        self.1.on_backtrack(square, statistics);
    }

    fn on_solution_found(&mut self, tour: &Tour<V>, statistics: &SearchStatistics) {
        self.0.on_solution_found(tour, statistics);
        self.1.on_solution_found(tour, statistics);
    }

    fn on_exit_search(&mut self, found: bool, statistics: &SearchStatistics) {
        self.0.on_exit_search(found, statistics);
        self.1.on_exit_search(found, statistics);
    }
}

#[cfg(feature = "std")]
pub use log::LogMonitor;

#[cfg(feature = "std")]
mod log {
    use super::{SearchMonitor, SearchStatistics};
    use crate::{BoardValue, Coordinate, Problem, Tour};
    use std::time::{Duration, Instant};
    use std::{eprintln, format};

    /// A monitor which prints progress lines to standard error at a fixed interval, and a
    /// summary once the search is done.
    #[derive(Debug, Clone)]
    pub struct LogMonitor {
        start_time: Instant,
        last_log_time: Instant,
        log_interval: Duration,
        clock_check_mask: u64,
    }

    impl LogMonitor {
        /// Log at most once per `log_interval`. The clock is only read when the number of
        /// visited squares has no bits in common with `clock_check_mask`.
        pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
            Self {
                start_time: Instant::now(),
                last_log_time: Instant::now(),
                log_interval,
                clock_check_mask,
            }
        }

        fn log_line(&mut self, depth: usize, statistics: &SearchStatistics) {
            let now = Instant::now();
            let elapsed = now.duration_since(self.start_time).as_secs_f32();
            let elapsed_field = format!("{elapsed:.1}s");
            eprintln!(
                "{:<9} | {:<14} | {:<7} | {:<10}",
                elapsed_field,
                statistics.nodes_visited,
                depth,
                statistics.backtracks
            );
            self.last_log_time = now;
        }
    }

    impl Default for LogMonitor {
        fn default() -> Self {
            Self::new(Duration::from_secs(1), 4095)
        }
    }

    impl<V> SearchMonitor<V> for LogMonitor
    where
        V: BoardValue,
    {
        fn name(&self) -> &str {
            "LogMonitor"
        }

        fn on_enter_search(&mut self, problem: &Problem<V>, _statistics: &SearchStatistics) {
            self.start_time = Instant::now();
            self.last_log_time = self.start_time;
            let (size, start) = (problem.size(), problem.start());
            eprintln!("searching a {size}x{size} board from {start}");
            eprintln!(
                "{:<9} | {:<14} | {:<7} | {:<10}",
                "Elapsed",
                "Nodes",
                "Depth",
                "Backtracks"
            );
            eprintln!("{:-<47}", "");
        }

        fn on_visit(
            &mut self,
            _square: &Coordinate<V>,
            depth: usize,
            statistics: &SearchStatistics,
        ) {
            if (statistics.nodes_visited & self.clock_check_mask) == 0
                && self.last_log_time.elapsed() >= self.log_interval
            {
                self.log_line(depth, statistics);
            }
        }

        fn on_solution_found(&mut self, _tour: &Tour<V>, statistics: &SearchStatistics) {
            eprintln!("tour found after {} nodes", statistics.nodes_visited);
        }

        fn on_exit_search(&mut self, found: bool, statistics: &SearchStatistics) {
            eprintln!("{:-<47}", "");
            eprintln!(
                "search {} in {:.3}s ({statistics})",
                if found { "succeeded" } else { "exhausted" },
                self.start_time.elapsed().as_secs_f32()
            );
        }
    }
}
