pub mod config;
pub mod error;
pub mod tool;
pub mod trace;
pub mod turn;
