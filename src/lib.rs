//! Tidy up a folder of hadist collection JSON files.
//!
//! Each collection file carries a `hadist` array whose records are numbered
//! by a 1-based `no` field. Manual edits and imports leave duplicates, gaps,
//! and reorderings behind. `rapih` analyzes the numbering, backs the folder
//! up, renumbers every record to its position in the array, and validates
//! the result, leaving every other field exactly as it was.

pub mod cli;
pub mod console;
pub mod dataset;
pub mod pipeline;
