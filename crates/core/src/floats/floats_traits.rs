use async_trait::async_trait;
use rust_decimal::Decimal;

use super::floats_model::{Float, FloatCreation, NewFloat};
use crate::errors::Result;
use crate::expenses::ExpenseKind;
use crate::users::Role;

/// Trait defining the contract for float repository operations.
#[async_trait]
pub trait FloatRepositoryTrait: Send + Sync {
    fn find_by_id(&self, float_id: i64) -> Result<Option<Float>>;
    /// All floats, ascending by id.
    fn list(&self) -> Result<Vec<Float>>;
    /// The employee's floats, ascending by id.
    fn list_by_employee(&self, employee: &str) -> Result<Vec<Float>>;
    fn max_id(&self) -> Result<Option<i64>>;
    /// Most recent float of the employee that a new float would supersede
    /// (status open or partially closed).
    fn latest_supersedable(&self, employee: &str) -> Result<Option<Float>>;
    /// Most recent partially-closed float of the employee with an id lower
    /// than `before_id`.
    fn latest_partially_closed_before(
        &self,
        employee: &str,
        before_id: i64,
    ) -> Result<Option<Float>>;
    async fn insert(&self, float: Float) -> Result<Float>;
    async fn update(&self, float: Float) -> Result<Float>;
    /// Applies `delta` to `current_balance` as one serialized read-modify-write.
    /// Fails with `NotFound` if the float does not exist and with `State`
    /// unless it is open.
    async fn apply_balance_delta(&self, float_id: i64, delta: Decimal) -> Result<Float>;
}

/// Trait defining the contract for float ledger operations.
#[async_trait]
pub trait FloatLedgerServiceTrait: Send + Sync {
    fn get_float(&self, float_id: i64) -> Result<Float>;
    fn list_floats(&self) -> Result<Vec<Float>>;
    fn list_floats_for_employee(&self, employee: &str) -> Result<Vec<Float>>;
    /// Creates a float in awaiting-accountant status, superseding the
    /// employee's previous open float if any.
    async fn create_float(&self, new_float: NewFloat) -> Result<FloatCreation>;
    /// Debits an open float's balance.
    async fn post_expense(&self, float_id: i64, amount: Decimal) -> Result<Float>;
    /// Credits an open float's balance.
    async fn post_replacement(&self, float_id: i64, amount: Decimal) -> Result<Float>;
    /// Re-applies a corrected expense amount with the sign of the record kind.
    async fn revise_expense_amount(
        &self,
        float_id: i64,
        old_amount: Decimal,
        new_amount: Decimal,
        kind: ExpenseKind,
    ) -> Result<Float>;
    /// Accountant step passed: the float now awaits the doctor.
    async fn mark_awaiting_doctor(&self, float_id: i64) -> Result<Float>;
    /// Doctor step passed: opens the float and closes its superseded
    /// predecessor, if any.
    async fn finalize_approval(&self, float_id: i64) -> Result<Float>;
    /// Marks the float rejected by the reviewing role.
    async fn reject(&self, float_id: i64, reviewer: Role) -> Result<Float>;
}
