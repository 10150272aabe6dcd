//! External collection runner
//!
//! The batch pipeline only talks to the [`CollectionRunner`] trait; the
//! newman-backed implementation lives in [`newman`].

pub mod newman;
pub mod options;
pub mod traits;

pub use newman::{NewmanRunner, DEFAULT_NEWMAN_BIN};
pub use options::{parse_key_value_pairs, NewmanOptions};
pub use traits::{CollectionRunner, RunStats, RunSummary, StatCount};
