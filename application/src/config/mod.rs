//! Application-level configuration.
//!
//! - [`EngineParams`]: search growth and fallback control
//!
//! Collection sizing is domain policy
//! ([`CollectionPolicy`](prospect_domain::CollectionPolicy)).

pub mod engine_params;

pub use engine_params::EngineParams;
