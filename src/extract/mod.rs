//! Extraction core: raw scraped text in, typed records out.
//!
//! Everything here is synchronous and pure. Inputs are snapshots already
//! pulled out of the page by `acquire::dom`; outputs are fresh owned values.
//! Structural problems surface as [`ExtractionError`]; a row or card that
//! simply doesn't match a dictionary or pattern is dropped, not reported.

pub mod assemble;
pub mod events;
pub mod fields;
pub mod highlights;
pub mod period;
pub mod profile;
pub mod shareholders;
pub mod table;
pub mod text;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExtractionError {
    #[error("table header row missing or too short ({cells} cells, need at least 2)")]
    MissingHeaderRow { cells: usize },

    #[error("{0} block not found")]
    BlockNotFound(&'static str),

    #[error("{0} table is empty")]
    EmptyTable(&'static str),

    #[error("rank {found} follows rank {previous}; ranks must increase")]
    RankOutOfOrder { previous: u32, found: u32 },
}
