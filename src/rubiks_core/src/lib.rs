//! Canonical state representation, codec and move algebra for the 3x3x3
//! cube, plus the record-level evaluation and dataset tooling built on top.
//!
//! The flow every consumer follows is the same: obtain a [`CubeState`]
//! (solved, or decoded from a config string), apply a [`Formula`], and ask
//! whether the result [`CubeState::is_solved`].

#![warn(clippy::pedantic)]

pub mod codec;
pub mod cube;
pub mod dataset;
pub mod face;
pub mod formula;
pub mod record;
pub mod topology;

pub use codec::{ConfigString, decode, encode};
pub use cube::{CubeState, Cubie, Sticker};
pub use face::{Color, Face};
pub use formula::{Formula, Move, Turn};
pub use record::{Outcome, RecordFormat, Tally};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Config string must have {expected} stickers but has {actual}")]
    MalformedConfigLength { expected: usize, actual: usize },
    #[error("Invalid face label {found:?} at sticker {position}, expected one of URFDBL")]
    MalformedConfigChar { position: usize, found: char },
    #[error("The {cubie} cubie cannot carry the labels {labels}")]
    MalformedCubieColors { cubie: &'static str, labels: String },
    #[error("Invalid move token {0:?}")]
    InvalidMoveToken(String),
    #[error("No center currently holds the color {0}")]
    ColorNotFound(Color),
    #[error("Topology index {index} is out of range, expected a value below {bound}")]
    InvalidTopologyIndex { index: usize, bound: usize },
    #[error("Record does not match the expected format: {0:?}")]
    ParseFailure(String),
}
