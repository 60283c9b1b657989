pub mod metrics;
pub mod resume;
