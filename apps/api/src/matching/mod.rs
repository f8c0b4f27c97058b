// Matching engine: candidate ranking for recruiters, job recommendations for seekers.
// Scoring is pure and synchronous; handlers own all I/O.

pub mod candidate;
pub mod filter;
pub mod handlers;
pub mod job;
pub mod policy;
pub mod ranking;
pub mod salary;
pub mod scorer;
