//! Input processing module
//! Handles file detection, record parsing, and input management

pub mod file_detector;
pub mod record_reader;
pub mod manager;

pub use manager::InputManager;
