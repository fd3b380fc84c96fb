// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Knight's tours, and checking that a sequence of squares is one.

use crate::{BoardState, BoardValue, Coordinate, KnightMove, Problem};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::error::Error;
use core::fmt::{Display, Formatter};
use core::ops::Deref;
use serde::{Deserialize, Serialize};

/// The squares of a tour in the order the knight visits them.
///
/// Tours produced by a search are always complete; a tour obtained otherwise (e.g. deserialized)
/// may be checked with [`Tour::verify`].
#[derive(Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Tour<V> {
    squares: Vec<Coordinate<V>>,
}

impl<V> Tour<V> {
    /// The visited squares.
    pub fn squares(&self) -> &[Coordinate<V>] {
        &self.squares
    }

    /// Take the visited squares out of the tour.
    pub fn into_inner(self) -> Vec<Coordinate<V>> {
        self.squares
    }
}

impl<V> From<Vec<Coordinate<V>>> for Tour<V> {
    fn from(squares: Vec<Coordinate<V>>) -> Self {
        Self { squares }
    }
}

impl<V> Deref for Tour<V> {
    type Target = [Coordinate<V>];

    fn deref(&self) -> &Self::Target {
        &self.squares
    }
}

impl<V> IntoIterator for Tour<V> {
    type Item = Coordinate<V>;
    type IntoIter = alloc::vec::IntoIter<Coordinate<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.squares.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Tour<V> {
    type Item = &'a Coordinate<V>;
    type IntoIter = core::slice::Iter<'a, Coordinate<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.squares.iter()
    }
}

impl<V> Display for Tour<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("[")?;
        for (idx, square) in self.squares.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{square}")?;
        }
        f.write_str("]")
    }
}

/// Render the result of a search: the tour if one was found, `[]` otherwise.
pub fn render<V>(tour: Option<&Tour<V>>) -> String
where
    V: Display,
{
    tour.map_or_else(|| String::from("[]"), ToString::to_string)
}

/// The way in which a sequence of squares failed to be a tour, associated with an
/// [`InvalidTourError`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InvalidTourType<V> {
    /// The sequence does not visit as many squares as the board has.
    WrongLength {
        /// The area of the board.
        expected: usize,
    },
    /// The first square is not the starting square of the problem.
    WrongStart(Coordinate<V>),
    /// The square is not on the board.
    OutOfBounds(Coordinate<V>),
    /// The square was already visited earlier in the sequence.
    Revisited(Coordinate<V>),
    /// The square cannot be reached with a single jump from the previous one.
    NotAKnightJump(Coordinate<V>, Coordinate<V>),
}

/// An error which denotes that a sequence of squares is not a tour of a given problem.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct InvalidTourError<V> {
    index: usize,
    variant: InvalidTourType<V>,
}

impl<V> InvalidTourError<V> {
    /// The position in the sequence at which the problem was found. For
    /// [`InvalidTourType::WrongLength`], this is the length of the sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The way in which the sequence failed to be a tour.
    pub fn variant(&self) -> &InvalidTourType<V> {
        &self.variant
    }
}

impl<V> Display for InvalidTourError<V>
where
    V: BoardValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.variant {
            InvalidTourType::WrongLength { expected } => f.write_fmt(format_args!(
                "tour visits {} squares, but the board has {expected}",
                self.index
            )),
            InvalidTourType::WrongStart(square) => f.write_fmt(format_args!(
                "tour starts at {square} instead of the initial square"
            )),
            InvalidTourType::OutOfBounds(square) => f.write_fmt(format_args!(
                "square {} of the tour, {square}, is out of the board",
                self.index
            )),
            InvalidTourType::Revisited(square) => f.write_fmt(format_args!(
                "square {} of the tour, {square}, was already visited",
                self.index
            )),
            InvalidTourType::NotAKnightJump(from, to) => f.write_fmt(format_args!(
                "square {} of the tour, {to}, is not a knight's jump away from {from}",
                self.index
            )),
        }
    }
}

impl<V> Error for InvalidTourError<V> where V: BoardValue {}

impl<V> Tour<V>
where
    V: BoardValue,
{
    /// Check that this is a tour of `problem`: it starts on the starting square, visits every
    /// square of the board exactly once, and each square is a knight's jump from the previous one.
    pub fn verify(&self, problem: &Problem<V>) -> Result<(), InvalidTourError<V>> {
        if self.squares.len() != problem.area() {
            return Err(InvalidTourError {
                index: self.squares.len(),
                variant: InvalidTourType::WrongLength {
                    expected: problem.area(),
                },
            });
        }
        let start = problem.start();
        if let Some(first) = self.squares.first().filter(|first| *first != start) {
            return Err(InvalidTourError {
                index: 0,
                variant: InvalidTourType::WrongStart(*first),
            });
        }

        let mut board = BoardState::new(*problem.size());
        let mut previous: Option<&Coordinate<V>> = None;
        for (index, square) in self.squares.iter().enumerate() {
            let variant = if !square.in_bounds(*problem.size()) {
                Some(InvalidTourType::OutOfBounds(*square))
            } else if !board.is_free(square) {
                Some(InvalidTourType::Revisited(*square))
            } else {
                previous
                    .filter(|from| KnightMove::between(from, square).is_none())
                    .map(|from| InvalidTourType::NotAKnightJump(*from, *square))
            };
            if let Some(variant) = variant {
                return Err(InvalidTourError { index, variant });
            }
            board.occupy(square);
            previous = Some(square);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    extern crate std;

    use crate::tour::render;
    use crate::{Coordinate, InvalidTourError, InvalidTourType, Problem, Tour};
    use alloc::boxed::Box;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::error::Error;

    fn tour(squares: &[(u8, u8)]) -> Tour<u8> {
        let squares: Vec<_> = squares.iter().copied().map(Coordinate::from).collect();
        Tour::from(squares)
    }

    #[test]
    fn rendering() {
        let path = tour(&[(1, 1), (3, 2), (5, 3)]);
        assert_eq!("[(1,1),(3,2),(5,3)]", path.to_string());
        assert_eq!("[(1,1),(3,2),(5,3)]", render(Some(&path)));
        assert_eq!("[]", render::<u8>(None));
        assert_eq!("[(1,1)]", tour(&[(1, 1)]).to_string());
    }

    #[test]
    fn found_tour_verifies() -> Result<(), Box<dyn Error>> {
        let problem = Problem::new(5u8, (1, 1))?;
        let found = problem.search().ok_or("no tour")?;
        found.verify(&problem)?;
        Ok(())
    }

    #[test]
    fn invalid_tours() -> Result<(), Box<dyn Error>> {
        let single = Problem::new(1u8, (1, 1))?;
        assert_eq!(Ok(()), tour(&[(1, 1)]).verify(&single));
        assert_eq!(
            Err(InvalidTourError {
                index: 0,
                variant: InvalidTourType::WrongLength { expected: 1 }
            }),
            tour(&[]).verify(&single)
        );

        let problem = Problem::new(5u8, (1, 1))?;
        let mut squares = problem.search().ok_or("no tour")?.into_inner();

        let mut wrong_start = squares.clone();
        wrong_start.reverse();
        let err = Tour::from(wrong_start).verify(&problem).unwrap_err();
        assert!(matches!(err.variant(), InvalidTourType::WrongStart(_)));
        assert_eq!(0, err.index());

        let mut truncated = squares.clone();
        truncated.pop();
        let err = Tour::from(truncated).verify(&problem).unwrap_err();
        assert_eq!(
            InvalidTourType::WrongLength { expected: 25 },
            *err.variant()
        );
        assert_eq!(24, err.index());

        let mut revisited = squares.clone();
        revisited[2] = revisited[0];
        let err = Tour::from(revisited).verify(&problem).unwrap_err();
        assert_eq!(
            InvalidTourType::Revisited(Coordinate::new(1, 1)),
            *err.variant()
        );
        assert_eq!(2, err.index());

        let mut off_board = squares.clone();
        off_board[24] = Coordinate::new(6, 1);
        let err = Tour::from(off_board).verify(&problem).unwrap_err();
        assert_eq!(
            InvalidTourType::OutOfBounds(Coordinate::new(6, 1)),
            *err.variant()
        );
        assert_eq!(
            "square 24 of the tour, (6,1), is out of the board",
            err.to_string()
        );

        squares.swap(1, 2);
        let err = Tour::from(squares.clone()).verify(&problem).unwrap_err();
        assert_eq!(1, err.index());
        assert_eq!(
            InvalidTourType::NotAKnightJump(Coordinate::new(1, 1), squares[1]),
            *err.variant()
        );

        Ok(())
    }

    #[test]
    fn json() -> Result<(), Box<dyn Error>> {
        let path = tour(&[(1, 1), (3, 2)]);
        let json = serde_json::to_string(&path)?;
        assert_eq!(r#"[{"file":1,"rank":1},{"file":3,"rank":2}]"#, json);
        assert_eq!(path, serde_json::from_str::<Tour<u8>>(&json)?);
        assert_eq!(
            vec![Coordinate::new(1, 1), Coordinate::new(3, 2)],
            path.into_inner()
        );
        Ok(())
    }
}
