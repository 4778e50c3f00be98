pub mod calendar;
pub mod exercise;
pub mod user;
