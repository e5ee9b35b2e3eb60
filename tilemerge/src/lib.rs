pub use config::*;
pub use controller::*;
pub use direction::*;
pub use engine::*;
pub use errors::*;
pub use grid::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod config;
mod controller;
mod direction;
mod engine;
mod errors;
mod grid;
mod turn;
mod visualization;
