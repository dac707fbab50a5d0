//! Tests for argument parsing.

use clap::Parser;

use crate::cli::{Args, Command};

#[test]
fn test_solve_accepts_time_limit() {
    let args = Args::try_parse_from(["lessonforge", "solve", "school.toml", "-t", "30"]).unwrap();
    match args.command {
        Command::Solve { time_limit, .. } => assert_eq!(time_limit, Some(30)),
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_solve_rejects_zero_time_limit() {
    let err = Args::try_parse_from(["lessonforge", "solve", "school.toml", "--time-limit", "0"])
        .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn test_check_takes_raw_flag() {
    let args = Args::try_parse_from(["lessonforge", "check", "rows.yaml", "--raw"]).unwrap();
    match args.command {
        Command::Check(input) => {
            assert!(input.raw);
            assert_eq!(input.problem.to_str(), Some("rows.yaml"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}
