use async_trait::async_trait;

use super::expenses_model::{ExpenseKind, ExpenseRecord, ExpenseUpdate, NewExpense};
use crate::auth::Actor;
use crate::errors::Result;
use crate::files::FileUpload;

/// Trait defining the contract for expense record storage. One
/// implementation spans both the invoice and replacement collections, since
/// they share the per-float record-number space.
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    /// Looks the record up among both collections.
    fn find_by_id(&self, record_id: &str) -> Result<Option<ExpenseRecord>>;
    /// Records for a float ascending by record number, optionally limited to
    /// one kind.
    fn list_for_float(&self, float_id: i64, kind: Option<ExpenseKind>) -> Result<Vec<ExpenseRecord>>;
    /// Highest record number used by either kind for this float.
    fn last_record_no(&self, float_id: i64) -> Result<Option<i64>>;
    async fn insert(&self, record: ExpenseRecord) -> Result<ExpenseRecord>;
    async fn update(&self, record: ExpenseRecord) -> Result<ExpenseRecord>;
}

/// Trait defining the contract for expense recorder operations.
#[async_trait]
pub trait ExpenseRecorderServiceTrait: Send + Sync {
    fn get_record(&self, record_id: &str) -> Result<ExpenseRecord>;
    fn list_for_float(&self, float_id: i64, kind: Option<ExpenseKind>) -> Result<Vec<ExpenseRecord>>;
    /// Posts an invoice against an open float and debits its balance.
    async fn add_invoice(
        &self,
        actor: &Actor,
        input: NewExpense,
        file: Option<FileUpload>,
    ) -> Result<ExpenseRecord>;
    /// Posts a replacement against an open float and credits its balance.
    async fn add_replacement(
        &self,
        actor: &Actor,
        input: NewExpense,
        file: Option<FileUpload>,
    ) -> Result<ExpenseRecord>;
    /// Corrects a record's fields; an amount change re-balances the float.
    async fn update_record(
        &self,
        actor: &Actor,
        record_id: &str,
        update: ExpenseUpdate,
    ) -> Result<ExpenseRecord>;
    /// Resolves the stored attachment to a servable locator.
    fn locate_file(&self, record_id: &str) -> Result<String>;
}
