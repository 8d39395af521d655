//! Test utilities: an in-memory world implementing the host interface.

mod host;
mod wasm;
mod world;

pub use host::*;
pub use wasm::*;
pub use world::*;
