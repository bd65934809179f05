pub mod action;
pub mod clock;
pub mod log;
