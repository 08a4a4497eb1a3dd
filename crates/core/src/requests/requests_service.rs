use log::warn;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::requests_model::FloatRequest;
use super::requests_traits::{
    RequestPolicyTrait, RequestRepositoryTrait, RequestWorkflowServiceTrait,
};
use crate::auth::{Actor, OtpPurpose, OtpServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{ChangeNotifierTrait, ChangeTopic};
use crate::floats::{FloatLedgerServiceTrait, FloatStatus, NewFloat};
use crate::sms::SmsChannelTrait;
use crate::users::{Role, UserRepositoryTrait};

/// The approval state machine: employee files a request, the accountant and
/// then the doctor confirm it with one-time codes, and the float ledger is
/// kept in step at every transition.
pub struct RequestWorkflowService {
    ledger: Arc<dyn FloatLedgerServiceTrait>,
    repository: Arc<dyn RequestRepositoryTrait>,
    users: Arc<dyn UserRepositoryTrait>,
    otp: Arc<dyn OtpServiceTrait>,
    policy: Arc<dyn RequestPolicyTrait>,
    sms: Arc<dyn SmsChannelTrait>,
    notifier: Arc<dyn ChangeNotifierTrait>,
}

impl RequestWorkflowService {
    pub fn new(
        ledger: Arc<dyn FloatLedgerServiceTrait>,
        repository: Arc<dyn RequestRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
        otp: Arc<dyn OtpServiceTrait>,
        policy: Arc<dyn RequestPolicyTrait>,
        sms: Arc<dyn SmsChannelTrait>,
        notifier: Arc<dyn ChangeNotifierTrait>,
    ) -> Self {
        Self {
            ledger,
            repository,
            users,
            otp,
            policy,
            sms,
            notifier,
        }
    }

    fn require_role(actor: &Actor, role: Role, action: &str) -> Result<()> {
        if actor.role != role {
            return Err(Error::Forbidden(format!("only the {role} may {action}")));
        }
        Ok(())
    }

    fn current_entry(&self, float_id: i64) -> Result<FloatRequest> {
        self.repository
            .latest_for_float(float_id)?
            .ok_or_else(|| Error::NotFound(format!("no request found for float {float_id}")))
    }

    fn expect_status(entry: &FloatRequest, status: FloatStatus) -> Result<()> {
        if entry.status != status {
            return Err(Error::State(format!(
                "request for float {} is '{}', expected '{}'",
                entry.float_id, entry.status, status
            )));
        }
        Ok(())
    }

    /// Best-effort SMS to every user holding `role`. Failures are logged
    /// and never surface to the caller.
    async fn notify_role(&self, role: Role, message: &str) {
        match self.users.list_by_role(role) {
            Ok(users) => {
                for user in users {
                    if let Err(err) = self.sms.send(&user.phone_number, message).await {
                        warn!(
                            "failed to notify {} ({}): {err}",
                            user.full_name, user.phone_number
                        );
                    }
                }
            }
            Err(err) => warn!("could not load {role} users for notification: {err}"),
        }
    }

    /// Best-effort SMS to the requesting employee, looked up by name.
    async fn notify_employee(&self, employee: &str, message: &str) {
        match self.users.find_by_name(employee) {
            Ok(Some(user)) => {
                if let Err(err) = self.sms.send(&user.phone_number, message).await {
                    warn!("failed to notify {employee}: {err}");
                }
            }
            Ok(None) => warn!("no user record for employee {employee}, skipping notification"),
            Err(err) => warn!("could not look up employee {employee}: {err}"),
        }
    }

    async fn append_transition(
        &self,
        current: &FloatRequest,
        status: FloatStatus,
    ) -> Result<FloatRequest> {
        let entry = self.repository.append(current.transitioned_to(status)).await?;
        self.notifier.publish(ChangeTopic::Requests);
        Ok(entry)
    }
}

#[async_trait]
impl RequestWorkflowServiceTrait for RequestWorkflowService {
    fn list_requests(&self) -> Result<Vec<FloatRequest>> {
        self.repository.list_latest()
    }

    fn request_history(&self, float_id: i64) -> Result<Vec<FloatRequest>> {
        self.repository.history_for_float(float_id)
    }

    async fn submit_request(&self, actor: &Actor, amount: Decimal) -> Result<FloatRequest> {
        if !matches!(actor.role, Role::Engineer | Role::Manager) {
            return Err(Error::Forbidden(
                "only engineers and managers may request a float".to_string(),
            ));
        }
        if !self.policy.may_request_float(actor) {
            return Err(Error::Forbidden(format!(
                "{} is not authorized to request floats",
                actor.full_name
            )));
        }

        let creation = self
            .ledger
            .create_float(NewFloat {
                employee: actor.full_name.clone(),
                amount,
            })
            .await?;

        let entry = self
            .repository
            .append(FloatRequest {
                id: Uuid::new_v4().to_string(),
                float_id: creation.float.id,
                employee: creation.float.employee.clone(),
                sequence: creation.float.sequence,
                request_date: creation.float.start_date,
                new_amount: creation.float.amount,
                previous_closing_balance: creation.previous_closing_balance,
                transfer_amount: creation.transfer_amount,
                status: creation.float.status,
                recorded_at: chrono::Utc::now(),
            })
            .await?;

        let message = format!(
            "طلب {} استعاضة عهدة المبلغ المراد تحويلة {}",
            entry.employee, entry.transfer_amount
        );
        self.notify_role(Role::Accountant, &message).await;
        self.notifier.publish(ChangeTopic::Requests);
        Ok(entry)
    }

    async fn accountant_approve(
        &self,
        actor: &Actor,
        float_id: i64,
        code: &str,
    ) -> Result<FloatRequest> {
        Self::require_role(actor, Role::Accountant, "approve at this step")?;
        self.otp
            .verify_code(&actor.phone_number, code, OtpPurpose::Approval)
            .await?;

        let current = self.current_entry(float_id)?;
        Self::expect_status(&current, FloatStatus::AwaitingAccountant)?;

        let float = self.ledger.mark_awaiting_doctor(float_id).await?;
        let entry = self.append_transition(&current, float.status).await?;

        self.notify_role(
            Role::Doctor,
            &format!("طلب عهدة {} بانتظار موافقة الدكتور", entry.employee),
        )
        .await;
        self.notify_employee(
            &entry.employee,
            &format!("وافق المحاسب على طلب العهدة رقم {}", entry.float_id),
        )
        .await;
        Ok(entry)
    }

    async fn accountant_reject(
        &self,
        actor: &Actor,
        float_id: i64,
        code: &str,
    ) -> Result<FloatRequest> {
        Self::require_role(actor, Role::Accountant, "reject at this step")?;
        self.otp
            .verify_code(&actor.phone_number, code, OtpPurpose::Approval)
            .await?;

        let current = self.current_entry(float_id)?;
        Self::expect_status(&current, FloatStatus::AwaitingAccountant)?;

        let float = self.ledger.reject(float_id, Role::Accountant).await?;
        self.append_transition(&current, float.status).await
    }

    async fn doctor_approve(
        &self,
        actor: &Actor,
        float_id: i64,
        code: &str,
    ) -> Result<FloatRequest> {
        Self::require_role(actor, Role::Doctor, "approve at this step")?;
        self.otp
            .verify_code(&actor.phone_number, code, OtpPurpose::Approval)
            .await?;

        let current = self.current_entry(float_id)?;
        Self::expect_status(&current, FloatStatus::AwaitingDoctor)?;

        self.ledger.finalize_approval(float_id).await?;
        // The float is now open; the request trail records the final verdict.
        let entry = self
            .append_transition(&current, FloatStatus::Approved)
            .await?;

        self.notify_employee(
            &entry.employee,
            &format!("تمت الموافقة النهائية على طلب العهدة رقم {}", entry.float_id),
        )
        .await;
        Ok(entry)
    }

    async fn doctor_reject(
        &self,
        actor: &Actor,
        float_id: i64,
        code: &str,
    ) -> Result<FloatRequest> {
        Self::require_role(actor, Role::Doctor, "reject at this step")?;
        self.otp
            .verify_code(&actor.phone_number, code, OtpPurpose::Approval)
            .await?;

        let current = self.current_entry(float_id)?;
        Self::expect_status(&current, FloatStatus::AwaitingDoctor)?;

        let float = self.ledger.reject(float_id, Role::Doctor).await?;
        self.append_transition(&current, float.status).await
    }
}
