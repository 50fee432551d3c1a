// src/error/mod.rs
//
// Application Error Module

pub mod types;

pub use types::{AppError, AppResult};
