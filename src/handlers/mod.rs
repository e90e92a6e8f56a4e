pub mod backend_health_handler;
pub mod workout_handler;
pub mod session_handler;
