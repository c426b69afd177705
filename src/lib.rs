//! Statistical summaries of a movie box-office table: production budget over
//! time, average profit by runtime range, and worldwide gross by genre.

pub mod analysis;
pub mod config;
pub mod data;
pub mod render;
pub mod types;
