//! Migration source strategies.
//!
//! Only the filesystem strategy exists. The orchestrator calls it directly;
//! there is no source trait until a second strategy needs one.

pub mod fs;
