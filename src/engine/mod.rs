pub mod scoring;
pub mod timer;
