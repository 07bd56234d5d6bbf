//! Masthead server binary.
//! Run with: cargo run --bin masthead-server

use std::process::ExitCode;

use masthead::start_server;

fn main() -> ExitCode {
    start_server::run()
}
