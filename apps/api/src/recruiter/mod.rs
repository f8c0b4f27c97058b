pub mod handlers;
pub mod jobs;
