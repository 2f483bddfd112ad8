//! Ports (trait boundaries) for external dependencies.
//!
//! The learning core only needs to load and save its value table; how and
//! where the bytes live is decided by the adapters implementing these traits.

pub mod repository;

pub use repository::ValueTableRepository;
