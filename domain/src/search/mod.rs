//! Search subdomain: sessions, result items, and served pages.
//!
//! A [`SearchSession`](entities::SearchSession) is the merged result buffer
//! for one (caller, prompt, day) key. It grows by appending deduplicated
//! batches from several queries and is read through stable offsets.

pub mod entities;
pub mod page;
pub mod value_objects;
