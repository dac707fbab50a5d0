mod cli;
mod input;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod input_tests;

use std::process::ExitCode;

use clap::Parser;
use cli::{Args, Command, InputArgs};
use input::{load_config, load_problem, load_raw, CliError};
use lessonforge::render;
use lessonforge::{SolveStatus, TimetableError, TimetableSolver};
use owo_colors::OwoColorize;

const EXIT_NOT_SOLVED: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    lessonforge::console::init();

    match run(args.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, CliError> {
    match command {
        Command::Check(input) => check(&input),
        Command::Solve {
            input,
            config,
            time_limit,
            json,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(seconds) = time_limit {
                config = config.with_termination_seconds(seconds);
            }
            solve(&input, TimetableSolver::new(config), json)
        }
        Command::Normalize { raw } => {
            let problem = lessonforge::normalize(&load_raw(&raw)?)?;
            println!("{}", serde_json::to_string_pretty(&problem)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(input: &InputArgs) -> Result<ExitCode, CliError> {
    let problem = load_problem(&input.problem, input.raw)?;
    let report = TimetableSolver::default().check(&problem)?;

    println!("{}", render::capacity_table(&report));
    if report.passed() {
        println!("{}", "Capacity OK".bright_green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{}",
            "Some teachers cannot fit their lessons; solving would not start."
                .bright_red()
                .bold()
        );
        Ok(ExitCode::from(EXIT_NOT_SOLVED))
    }
}

fn solve(input: &InputArgs, solver: TimetableSolver, json: bool) -> Result<ExitCode, CliError> {
    let problem = load_problem(&input.problem, input.raw)?;

    let result = match solver.solve(&problem) {
        Ok(result) => result,
        Err(TimetableError::CapacityExceeded(shortfalls)) => {
            for shortfall in &shortfalls {
                eprintln!("{} {}", "capacity:".bright_red().bold(), shortfall);
            }
            return Ok(ExitCode::from(EXIT_NOT_SOLVED));
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.is_ok() {
        println!("{}", render::class_grids(&problem, &result));
        println!("{}", render::teacher_load(&problem, &result));
        println!("{}", render::audit_table(&result));
    } else {
        println!("{} {}", "status:".bold(), result.status);
    }

    Ok(match result.status {
        SolveStatus::Ok => ExitCode::SUCCESS,
        SolveStatus::Infeasible | SolveStatus::Error => ExitCode::from(EXIT_NOT_SOLVED),
    })
}
