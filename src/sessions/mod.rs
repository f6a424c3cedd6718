pub mod schedule;
pub mod session_clock;
