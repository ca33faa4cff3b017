//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod alliances;
pub mod contributions;
pub mod health;
pub mod members;
pub mod tax;
