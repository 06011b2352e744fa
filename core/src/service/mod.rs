pub mod dto;
pub mod journal_service;
pub mod schedule_service;
pub mod schedule_store;
