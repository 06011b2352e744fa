pub mod chart;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use chart::{axis_ticks, to_cartesian, to_chart_segments, AxisTick, ChartSegment};
pub use config::{resolve_data_dir, Settings};
pub use error::PlannerError;
pub use input::parse_time_range;
pub use model::fortune::Fortune;
pub use model::journal::Mood;
pub use model::schedule::{ScheduleBook, ScheduleEntry};
pub use repository::{
    FileJournalRepository, FileScheduleRepository, JournalRepository, ScheduleRepository,
};
pub use service::dto::EntryDto;
pub use service::journal_service::JournalService;
pub use service::schedule_service::ScheduleService;
pub use service::schedule_store::ScheduleStore;
pub use time::{parse_human_day, ClockTime};
pub use usecase::day_view::{DayView, DayViewUseCase};
