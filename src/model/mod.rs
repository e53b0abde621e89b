pub mod file_group;
pub mod roi;
pub mod summary;
pub mod thresholds;
