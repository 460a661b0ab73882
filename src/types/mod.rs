// src/types/mod.rs
pub mod response;
