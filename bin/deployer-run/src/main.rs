//! `deployer-run` runs the child-deployer contract against a mock world described in JSON.

use clap::Parser;
use deployer_run::{Cmd, Result};

fn main() -> Result<()> {
    Cmd::parse().run().inspect_err(|e| eprintln!("Error: {e}"))
}
