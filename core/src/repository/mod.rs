pub mod file;
pub mod journal;
pub mod traits;

// Re-export
pub use file::FileScheduleRepository;
pub use journal::FileJournalRepository;
pub use traits::{JournalRepository, ScheduleRepository};
