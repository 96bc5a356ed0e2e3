pub mod clock;
pub mod diff;
pub mod scheduler;
