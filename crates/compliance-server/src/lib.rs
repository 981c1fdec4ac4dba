//! compliance-server — REST front for the reflective compliance pipeline.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
