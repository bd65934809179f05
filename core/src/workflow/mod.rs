pub mod actions;
pub mod alert;
