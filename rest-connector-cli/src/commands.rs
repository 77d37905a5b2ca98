use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute one work item described in a JSON or YAML file.
    Run {
        path: PathBuf,
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set_variables: Vec<String>,
        /// Retry counter as tracked by the engine.
        #[arg(long)]
        retries: Option<i32>,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        http: HttpArgs,
    },
    /// Decode a map variable (JSON object or `k=v;k2=v2`).
    Decode {
        value: String,
        #[command(flatten)]
        output: OutputArgs,
    },
}
