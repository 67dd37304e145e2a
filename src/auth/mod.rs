//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Admin token issuing from the configured credentials
//! - Account registration and password login
//! - JWT token generation and validation
//! - AuthedUser / AdminUser extractors for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod validators;


pub use extractors::{AdminUser, AuthedUser, MaybeUser};
pub use models::User;
pub use routes::auth_routes;
pub use service::{AuthError, AuthService};
