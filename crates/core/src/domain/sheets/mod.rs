pub mod a1_notation;
pub mod append_target;
pub mod column;
