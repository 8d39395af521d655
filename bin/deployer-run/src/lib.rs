//! Command-line runner for the child-deployer contract.
//!
//! The runner builds a mock world from a prestate file, executes one endpoint call on the
//! deployer contract and reports the finish values, the return code and the accounts the call
//! changed.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cmd;
pub use cmd::*;

mod error;
pub use error::*;

mod hex;
pub use hex::*;

mod logging;
pub use logging::*;

mod outcome;
pub use outcome::*;

mod prestate;
pub use prestate::*;
