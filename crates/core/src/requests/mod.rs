//! Request workflow module - the approval state machine and its audit trail.

mod requests_model;
mod requests_policy;
mod requests_service;
mod requests_traits;


pub use requests_model::FloatRequest;
pub use requests_policy::AllowListPolicy;
pub use requests_service::RequestWorkflowService;
pub use requests_traits::{
    RequestPolicyTrait, RequestRepositoryTrait, RequestWorkflowServiceTrait,
};
