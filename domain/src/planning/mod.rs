//! Query planning support: prompt hints and planner output parsing.

pub mod hints;
pub mod location;
pub mod query_list;
