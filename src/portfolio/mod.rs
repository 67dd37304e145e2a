// src/portfolio/mod.rs
//! Public portfolio content (projects, blogs, certifications, about,
//! experiences, technical skills, resume) and its admin management.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::portfolio_routes;
