//! Core types shared by every stage of the engine

pub mod crop;
pub mod schedule;
pub mod weather;

pub use crop::*;
pub use schedule::*;
pub use weather::*;
