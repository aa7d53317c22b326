//! Speed camera directory.
//!
//! Camera locations come from SCDB, with installation years compiled by
//! Times of Malta. The table is small (low hundreds of rows) and is loaded
//! once from CSV, then answered by linear scans.

mod directory;
mod record;

pub use directory::CameraDirectory;
pub use record::CameraRecord;
