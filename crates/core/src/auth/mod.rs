//! Authentication module - one-time codes, actors, and sessions.

mod auth_model;
mod auth_service;
mod auth_traits;
mod otp_service;

#[cfg(test)]
mod otp_service_tests;

pub use auth_model::{hash_code, Actor, OtpPurpose, Session};
pub use auth_service::AuthService;
pub use auth_traits::{
    AuthServiceTrait, IdentityProviderTrait, OtpServiceTrait, SessionIssuerTrait,
};
pub use otp_service::OtpService;
