//! CLI library for testing purposes

pub mod input;
pub mod stats;
pub mod validation;

pub use input::load_input;
pub use stringsheet::Codec;
