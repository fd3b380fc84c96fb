// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

use knight_tour::monitor::StatisticsMonitor;
use knight_tour::{Coordinate, KnightMove, OutOfBoundsError, Problem, Tour, search};
use std::collections::HashSet;
use std::error::Error;

fn assert_is_tour(size: u8, start: Coordinate<u8>, tour: &Tour<u8>) {
    let area = usize::from(size) * usize::from(size);
    assert_eq!(area, tour.len());
    assert_eq!(Some(&start), tour.first());

    let distinct: HashSet<_> = tour.iter().collect();
    assert_eq!(area, distinct.len());
    assert!(tour.iter().all(|square| square.in_bounds(size)));

    for pair in tour.windows(2) {
        let file = i32::from(*pair[1].file()) - i32::from(*pair[0].file());
        let rank = i32::from(*pair[1].rank()) - i32::from(*pair[0].rank());
        let mut deltas = [file.abs(), rank.abs()];
        deltas.sort();
        assert_eq!(
            [1, 2],
            deltas,
            "{} -> {} is not a knight's jump",
            pair[0],
            pair[1]
        );
        assert!(KnightMove::between(&pair[0], &pair[1]).is_some());
    }
}

#[test]
fn five_by_five_from_corner() -> Result<(), Box<dyn Error>> {
    let start = Coordinate::new(1u8, 1);
    let tour = search(5u8, start)?.ok_or("no tour from (1,1)")?;
    assert_is_tour(5, start, &tour);
    tour.verify(&Problem::new(5, start)?)?;
    Ok(())
}

#[test]
fn five_by_five_from_centre() -> Result<(), Box<dyn Error>> {
    let start = Coordinate::new(3u8, 3);
    let tour = search(5u8, start)?.ok_or("no tour from (3,3)")?;
    assert_is_tour(5, start, &tour);
    Ok(())
}

#[test]
fn single_square_board() -> Result<(), Box<dyn Error>> {
    let tour = search(1u8, (1, 1))?.ok_or("a single square is a tour")?;
    assert_eq!(vec![Coordinate::new(1, 1)], tour.into_inner());
    Ok(())
}

#[test]
fn small_boards_have_no_tour() -> Result<(), Box<dyn Error>> {
    for size in 2u8..=4 {
        for file in 1..=size {
            for rank in 1..=size {
                assert_eq!(
                    None,
                    search(size, (file, rank))?,
                    "unexpected tour on {size}x{size} from ({file},{rank})"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn centre_of_three_by_three_is_a_dead_end() -> Result<(), Box<dyn Error>> {
    let problem = Problem::new(3u8, (2, 2))?;
    let mut monitor = StatisticsMonitor::default();
    assert_eq!(None, problem.search_with(&mut monitor));
    // no jump leaves the centre of a 3x3 board
    assert_eq!(1, monitor.statistics().nodes_visited);
    assert_eq!(0, monitor.statistics().candidates_generated);
    Ok(())
}

#[test]
fn start_off_the_board() {
    for size in 1u8..=6 {
        for (file, rank) in [(0, 1), (1, 0), (size + 1, 1), (1, size + 1), (0, 0)] {
            let err: OutOfBoundsError<u8> = search(size, (file, rank)).unwrap_err();
            assert_eq!(Coordinate::new(file, rank), *err.start());
            assert_eq!(size, *err.size());
        }
    }
    assert!(search(0u8, (1, 1)).is_err());
}

#[test]
fn repeated_searches_agree() -> Result<(), Box<dyn Error>> {
    let problem = Problem::new(5u8, (1, 3))?;
    let first = problem.search();
    let second = problem.search();
    assert_eq!(first, second);
    assert_eq!(first, search(5u8, (1, 3))?);
    Ok(())
}

#[test]
fn other_board_values() -> Result<(), Box<dyn Error>> {
    let narrow = search(5u8, (1, 1))?.ok_or("no tour")?;
    let wide = search(5usize, (1, 1))?.ok_or("no tour")?;
    assert_eq!(narrow.to_string(), wide.to_string());
    Ok(())
}

#[test]
fn rendered_tour_round_trips_through_json() -> Result<(), Box<dyn Error>> {
    let problem = Problem::new(5u8, (1, 1))?;
    let tour = problem.search().ok_or("no tour")?;
    let json = serde_json::to_string(&tour)?;
    let parsed: Tour<u8> = serde_json::from_str(&json)?;
    parsed.verify(&problem)?;
    assert!(tour.to_string().starts_with("[(1,1),(3,2),"));
    Ok(())
}
