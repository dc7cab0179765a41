pub mod command;
pub mod config;
pub mod error;
pub mod games;
pub mod global;
pub mod resolver;
pub mod upstream;
