// src/contact/mod.rs
//! Public contact form and the admin inbox for its messages

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;


pub use routes::contact_routes;
