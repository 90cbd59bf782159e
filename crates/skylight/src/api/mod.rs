//! Domain operations, one module per resource family.
//!
//! Each operation is a sequential chain of at most a few dependent calls;
//! reads return the normalized primary payload plus any side-loaded
//! collection, writes send only caller-supplied fields.

pub mod calendar;
pub mod categories;
pub mod chores;
pub mod devices;
pub mod frames;
pub mod lists;
pub mod misc;
pub mod rewards;
pub mod taskbox;
