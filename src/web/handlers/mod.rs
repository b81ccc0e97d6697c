pub mod charts;
pub mod dashboard;
pub mod records;
pub mod summary;
