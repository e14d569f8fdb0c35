//! Echo agent server binary.
//! Run with: cargo run --bin echo-server

use std::process::ExitCode;

use echo_agent::start_echo_agent;

fn main() -> ExitCode {
    start_echo_agent::run()
}
