pub mod fortune;
pub mod journal;
pub mod schedule;
