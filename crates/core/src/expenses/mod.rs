//! Expenses module - invoices and replacements posted against floats.

mod expenses_model;
mod expenses_service;
mod expenses_traits;


pub use expenses_model::{ExpenseKind, ExpenseRecord, ExpenseUpdate, NewExpense};
pub use expenses_service::ExpenseRecorderService;
pub use expenses_traits::{ExpenseRecorderServiceTrait, ExpenseRepositoryTrait};
