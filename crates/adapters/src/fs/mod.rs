mod staging;

pub use staging::{FsStagingArea, StagedFiles};
