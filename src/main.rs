// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! knight-tour: prints the first knight's tour found from a square of a square board.

use clap::{Parser, ValueEnum};
use knight_tour::monitor::{LogMonitor, NoOpMonitor, SearchMonitor};
use knight_tour::tour::render;
use knight_tour::{Coordinate, Problem, Tour};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::process::ExitCode;
use std::thread;

/// The board value used by the command line. Boards larger than this cannot be searched
/// exhaustively anyway.
///
/// The search recurses once per square, so it runs on a thread whose stack grows with the area
/// of the board (see [`stack_size`]); a full 255x255 board needs a little under 256 MiB of stack.
type Value = u8;

/// Stack reserved per square of the board, comfortably above one frame of the recursion in
/// unoptimised builds.
const STACK_PER_SQUARE: usize = 4 * 1024;
/// Stack reserved for everything around the recursion.
const STACK_BASE: usize = 1024 * 1024;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    /// `[(1,1),(3,2),...]`
    Text,
    /// `{"size":5,"start":{"file":1,"rank":1},"tour":[...]}`
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "knight-tour")]
#[command(about = "Find a knight's tour over a square board by backtracking")]
struct Args {
    /// Board size
    #[arg(allow_negative_numbers = true)]
    size: i64,
    /// Rank of the initial square
    #[arg(allow_negative_numbers = true)]
    rank: i64,
    /// File of the initial square
    #[arg(allow_negative_numbers = true)]
    file: i64,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Report search progress and statistics on standard error
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug)]
enum CliError {
    OutOfBoard { size: i64, file: i64, rank: i64 },
    BoardTooLarge(i64),
    Spawn(io::Error),
    SearchPanicked,
    Json(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::OutOfBoard { size, file, rank } => write!(
                f,
                "initial square ({file},{rank}) is out of the {size}x{size} board"
            ),
            CliError::BoardTooLarge(size) => write!(
                f,
                "board size {size} is too large, at most {} is supported",
                Value::MAX
            ),
            CliError::Spawn(e) => write!(f, "could not start the search: {e}"),
            CliError::SearchPanicked => write!(f, "the search panicked"),
            CliError::Json(e) => write!(f, "could not write the tour as JSON: {e}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CliError::Spawn(e) => Some(e),
            CliError::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    problem: &'a Problem<Value>,
    tour: Option<&'a Tour<Value>>,
}

/// Interpret the arguments as a problem. A negative size is an empty board and negative
/// coordinates lie on no board, so both are reported as an initial square out of the board.
fn problem(args: &Args) -> Result<Problem<Value>, CliError> {
    let off_board = || CliError::OutOfBoard {
        size: args.size,
        file: args.file,
        rank: args.rank,
    };
    let size = match Value::try_from(args.size) {
        Ok(size) => size,
        Err(_) if args.size > 0 => return Err(CliError::BoardTooLarge(args.size)),
        Err(_) => 0,
    };
    let file = Value::try_from(args.file).map_err(|_| off_board())?;
    let rank = Value::try_from(args.rank).map_err(|_| off_board())?;
    Problem::new(size, Coordinate::new(file, rank)).map_err(|_| off_board())
}

/// The stack needed to search `problem` without overflowing.
fn stack_size(problem: &Problem<Value>) -> usize {
    problem
        .area()
        .saturating_mul(STACK_PER_SQUARE)
        .saturating_add(STACK_BASE)
}

/// Search on a thread whose stack is large enough for the recursion over the whole board.
fn search(problem: Problem<Value>, verbose: bool) -> Result<Option<Tour<Value>>, CliError> {
    let handle = thread::Builder::new()
        .name("search".into())
        .stack_size(stack_size(&problem))
        .spawn(move || {
            let mut monitor: Box<dyn SearchMonitor<Value>> = if verbose {
                Box::new(LogMonitor::default())
            } else {
                Box::new(NoOpMonitor)
            };
            problem.search_with(monitor.as_mut())
        })
        .map_err(CliError::Spawn)?;
    handle.join().map_err(|_| CliError::SearchPanicked)
}

/// The output for `problem` and the tour found for it, if any.
fn report(
    format: Format,
    problem: &Problem<Value>,
    tour: Option<&Tour<Value>>,
) -> Result<String, CliError> {
    match format {
        Format::Text => Ok(format!("The Knight Travel path is:\n{}", render(tour))),
        Format::Json => {
            let report = Report { problem, tour };
            serde_json::to_string(&report).map_err(CliError::Json)
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let problem = problem(args)?;
    let tour = search(problem, args.verbose)?;
    println!("{}", report(args.format, &problem, tour.as_ref())?);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{Args, CliError, Format, Problem, STACK_BASE, report, search, stack_size};
    use clap::Parser;
    use std::error::Error;

    fn args(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(["knight-tour"].iter().chain(argv).copied())
    }

    fn problem(argv: &[&str]) -> Result<Problem<u8>, CliError> {
        crate::problem(&args(argv).unwrap())
    }

    #[test]
    fn arguments() -> Result<(), Box<dyn Error>> {
        let parsed = args(&["5", "2", "3"])?;
        assert_eq!((5, 2, 3), (parsed.size, parsed.rank, parsed.file));
        assert!(matches!(parsed.format, Format::Text));
        assert!(!parsed.verbose);

        let parsed = args(&["--format", "json", "-v", "6", "1", "1"])?;
        assert!(matches!(parsed.format, Format::Json));
        assert!(parsed.verbose);

        assert!(args(&["five", "1", "1"]).is_err());
        assert!(args(&["5", "1"]).is_err());
        assert!(args(&["5", "1", "1", "--format", "xml"]).is_err());
        Ok(())
    }

    #[test]
    fn problems() -> Result<(), Box<dyn Error>> {
        // size, rank, file
        let parsed = problem(&["5", "2", "3"])?;
        assert_eq!(5, *parsed.size());
        assert_eq!((3, 2), (*parsed.start().file(), *parsed.start().rank()));

        for argv in [
            ["0", "1", "1"],
            ["-2", "1", "1"],
            ["5", "-1", "1"],
            ["5", "1", "0"],
            ["5", "6", "1"],
            ["5", "1", "300"],
        ] {
            let err = problem(&argv).unwrap_err();
            assert!(matches!(err, CliError::OutOfBoard { .. }), "{argv:?}");
        }
        assert_eq!(
            "initial square (0,1) is out of the 5x5 board",
            problem(&["5", "1", "0"]).unwrap_err().to_string()
        );

        let err = problem(&["256", "1", "1"]).unwrap_err();
        assert!(matches!(err, CliError::BoardTooLarge(256)));
        assert!(problem(&["255", "1", "1"]).is_ok());
        Ok(())
    }

    #[test]
    fn text_output() -> Result<(), Box<dyn Error>> {
        let empty = problem(&["3", "1", "1"])?;
        let tour = search(empty, false)?;
        assert_eq!(
            "The Knight Travel path is:\n[]",
            report(Format::Text, &empty, tour.as_ref())?
        );

        let five = problem(&["5", "1", "1"])?;
        let tour = search(five, false)?;
        let text = report(Format::Text, &five, tour.as_ref())?;
        let (header, path) = text.split_once('\n').ok_or("no header")?;
        assert_eq!("The Knight Travel path is:", header);
        assert!(path.starts_with("[(1,1),(3,2),"));
        Ok(())
    }

    #[test]
    fn json_output() -> Result<(), Box<dyn Error>> {
        let empty = problem(&["3", "1", "1"])?;
        assert_eq!(
            r#"{"size":3,"start":{"file":1,"rank":1},"tour":null}"#,
            report(Format::Json, &empty, None)?
        );

        let single = problem(&["1", "1", "1"])?;
        let tour = search(single, false)?;
        assert_eq!(
            r#"{"size":1,"start":{"file":1,"rank":1},"tour":[{"file":1,"rank":1}]}"#,
            report(Format::Json, &single, tour.as_ref())?
        );
        Ok(())
    }

    #[test]
    fn stack_grows_with_the_board() -> Result<(), Box<dyn Error>> {
        let single = problem(&["1", "1", "1"])?;
        let largest = problem(&["255", "1", "1"])?;
        assert!(stack_size(&single) > STACK_BASE);
        assert!(stack_size(&largest) >= 255 * 255 * 1024);
        Ok(())
    }

    #[test]
    fn search_runs_to_full_depth() -> Result<(), Box<dyn Error>> {
        let five = problem(&["5", "3", "3"])?;
        let tour = search(five, true)?.ok_or("no tour")?;
        tour.verify(&five)?;
        Ok(())
    }
}
