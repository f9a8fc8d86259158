//! Country-level solar measurement dashboard core.

pub mod config;
/// Dataset loading, caching, and the tabular in-memory structure.
pub mod data;
pub mod stats;
/// Chart section catalogue, eligibility evaluation, and render requests.
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;
