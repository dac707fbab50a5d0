use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// School timetabling on a constraint solver.
#[derive(Debug, Parser)]
#[command(name = "lessonforge", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the teacher capacity check without solving.
    Check(InputArgs),

    /// Solve a problem and print the timetable with its cost audit.
    Solve {
        #[command(flatten)]
        input: InputArgs,

        /// Configuration file (TOML or YAML).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overrides the configured time limit, in seconds.
        #[arg(short = 't', long, value_parser = clap::value_parser!(u64).range(1..))]
        time_limit: Option<u64>,

        /// Print the result as JSON instead of tables.
        #[arg(long)]
        json: bool,
    },

    /// Turn raw curriculum rows into a problem file (JSON on stdout).
    Normalize {
        /// Raw curriculum file (JSON, TOML or YAML).
        raw: PathBuf,
    },
}

#[derive(Debug, ClapArgs)]
pub struct InputArgs {
    /// Problem file (JSON, TOML or YAML, chosen by extension).
    pub problem: PathBuf,

    /// Read the file as raw curriculum rows and normalize it first.
    #[arg(long)]
    pub raw: bool,
}
