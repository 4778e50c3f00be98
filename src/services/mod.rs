pub mod exercise_service;
pub mod health_service;
