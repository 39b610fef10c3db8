// src/services/mod.rs
pub mod chart;
pub mod collar;
pub mod error;
pub mod format;
pub mod provider;
pub mod yahoo;
