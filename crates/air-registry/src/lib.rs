// crates/air-registry/src/lib.rs
//
// air-registry: append-only content-identifier report log for the AIR
// Protocol. A content id (CID) may be registered at most once; repeat
// submissions are rejected and leave the log untouched.

pub mod registry;

pub use registry::{Report, ReportRegistry};
