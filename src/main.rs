//! micrec CLI entry point

use std::process::ExitCode;

use clap::Parser;

use micrec::cli::{app::run, args::Cli, RecordOptions};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    run(RecordOptions::from(cli)).await
}
