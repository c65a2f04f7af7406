//! Collection subdomain: quota policy and terminal outcomes of the
//! deficit-driven loop.

pub mod outcome;
pub mod policy;
