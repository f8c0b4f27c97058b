pub mod application;
pub mod candidate;
pub mod job_posting;
pub mod profile;
pub mod user;
