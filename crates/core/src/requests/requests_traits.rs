use async_trait::async_trait;
use rust_decimal::Decimal;

use super::requests_model::FloatRequest;
use crate::auth::Actor;
use crate::errors::Result;

/// Trait defining the contract for the append-only request audit log.
#[async_trait]
pub trait RequestRepositoryTrait: Send + Sync {
    /// Latest audit entry per float, most recent activity first.
    fn list_latest(&self) -> Result<Vec<FloatRequest>>;
    /// Full trail for one float, oldest entry first.
    fn history_for_float(&self, float_id: i64) -> Result<Vec<FloatRequest>>;
    fn latest_for_float(&self, float_id: i64) -> Result<Option<FloatRequest>>;
    async fn append(&self, entry: FloatRequest) -> Result<FloatRequest>;
}

/// Authorization predicate deciding who may file a float request. The
/// production policy is an allow-list of named employees; tests and other
/// deployments inject their own.
pub trait RequestPolicyTrait: Send + Sync {
    fn may_request_float(&self, actor: &Actor) -> bool;
}

/// Trait defining the contract for the approval workflow.
///
/// Every reviewer action is gated by a one-time code issued to that
/// reviewer's own phone for the approval purpose.
#[async_trait]
pub trait RequestWorkflowServiceTrait: Send + Sync {
    fn list_requests(&self) -> Result<Vec<FloatRequest>>;
    fn request_history(&self, float_id: i64) -> Result<Vec<FloatRequest>>;
    /// Files a new float request for the acting employee.
    async fn submit_request(&self, actor: &Actor, amount: Decimal) -> Result<FloatRequest>;
    async fn accountant_approve(&self, actor: &Actor, float_id: i64, code: &str)
        -> Result<FloatRequest>;
    async fn accountant_reject(&self, actor: &Actor, float_id: i64, code: &str)
        -> Result<FloatRequest>;
    async fn doctor_approve(&self, actor: &Actor, float_id: i64, code: &str)
        -> Result<FloatRequest>;
    async fn doctor_reject(&self, actor: &Actor, float_id: i64, code: &str)
        -> Result<FloatRequest>;
}
