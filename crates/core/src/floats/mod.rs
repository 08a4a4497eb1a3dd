//! Float ledger module - domain models, services, and traits.

mod floats_model;
mod floats_service;
mod floats_traits;

#[cfg(test)]
mod floats_model_tests;


pub use floats_model::{Float, FloatCreation, FloatStatus, NewFloat};
pub use floats_service::FloatLedgerService;
pub use floats_traits::{FloatLedgerServiceTrait, FloatRepositoryTrait};
