// src/handlers/mod.rs
pub mod collar;
pub mod error;
