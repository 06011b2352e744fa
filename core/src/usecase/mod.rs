pub mod day_view;
