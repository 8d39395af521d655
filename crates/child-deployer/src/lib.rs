//! Child-contract deployment fixture.
//!
//! The deployer contract loads bytecode it previously stored under a one-byte contract ID,
//! forwards one byte of its call arguments to the child constructor, asks the host to create
//! the child and reports the loaded length followed by the creation outcome.
//!
//! The host is modeled by the [`HostInterface`] trait. With the `test-utils` feature,
//! [`test_utils::MockWorld`] provides an in-memory implementation.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod codec;
pub mod constants;

mod contract;
pub use contract::*;

mod deployer;
pub use deployer::*;

mod error;
pub use error::*;

mod host;
pub use host::*;

mod output;
pub use output::*;

mod policy;
pub use policy::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod types;
pub use types::*;
