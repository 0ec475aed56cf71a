//! API handlers

pub mod health;
pub mod highlight;
pub mod insights;
pub mod upload;
pub mod validation;
