//! racecontrol: season dashboard and fantasy helper.
//!
//! The scoring engine in [`scoring`] is a pure function over a results
//! snapshot. Fetching lives in [`provider`], orchestration in [`fetch`] and
//! rendering in [`output`].

pub mod config;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod provider;
pub mod results;
pub mod scoring;
