// src/services/mod.rs

pub mod ranking;
pub mod stats;
pub mod trivia;
