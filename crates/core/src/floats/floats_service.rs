use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use super::floats_model::{Float, FloatCreation, FloatStatus, NewFloat};
use super::floats_traits::{FloatLedgerServiceTrait, FloatRepositoryTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::events::{ChangeNotifierTrait, ChangeTopic};
use crate::expenses::ExpenseKind;
use crate::users::Role;

/// Service owning float records and every balance/status mutation.
pub struct FloatLedgerService {
    repository: Arc<dyn FloatRepositoryTrait>,
    notifier: Arc<dyn ChangeNotifierTrait>,
}

impl FloatLedgerService {
    pub fn new(
        repository: Arc<dyn FloatRepositoryTrait>,
        notifier: Arc<dyn ChangeNotifierTrait>,
    ) -> Self {
        Self { repository, notifier }
    }

    fn require(&self, float_id: i64) -> Result<Float> {
        self.repository
            .find_by_id(float_id)?
            .ok_or_else(|| Error::NotFound(format!("float {float_id} does not exist")))
    }

    /// Smallest positive sequence number not used by a non-rejected float of
    /// this employee. Rejected floats give their number back.
    fn next_sequence(employee_floats: &[Float]) -> i32 {
        let used: HashSet<i32> = employee_floats
            .iter()
            .filter(|float| !float.status.is_rejected())
            .map(|float| float.sequence)
            .collect();
        let mut candidate = 1;
        while used.contains(&candidate) {
            candidate += 1;
        }
        candidate
    }
}

#[async_trait]
impl FloatLedgerServiceTrait for FloatLedgerService {
    fn get_float(&self, float_id: i64) -> Result<Float> {
        self.require(float_id)
    }

    fn list_floats(&self) -> Result<Vec<Float>> {
        self.repository.list()
    }

    fn list_floats_for_employee(&self, employee: &str) -> Result<Vec<Float>> {
        self.repository.list_by_employee(employee)
    }

    async fn create_float(&self, new_float: NewFloat) -> Result<FloatCreation> {
        new_float.validate()?;

        let employee_floats = self.repository.list_by_employee(&new_float.employee)?;
        if employee_floats.iter().any(|f| f.status.is_in_review()) {
            return Err(Error::Conflict(format!(
                "employee {} already has a float request under review",
                new_float.employee
            )));
        }

        let predecessor = self.repository.latest_supersedable(&new_float.employee)?;
        if let Some(prev) = &predecessor {
            if prev.current_balance > Decimal::ZERO && new_float.amount < prev.current_balance {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "new amount cannot be less than the open balance of the previous float"
                        .to_string(),
                )));
            }
        }

        let previous_closing_balance = predecessor
            .as_ref()
            .map(|prev| prev.current_balance)
            .unwrap_or(Decimal::ZERO);
        let transfer_amount = new_float.amount - previous_closing_balance;

        let now = Utc::now();
        let today = now.date_naive();

        if let Some(mut prev) = predecessor {
            prev.closing_balance = prev.current_balance;
            prev.status = FloatStatus::PartiallyClosed;
            prev.closing_date = Some(today);
            self.repository.update(prev).await?;
        }

        let float = Float {
            id: self.repository.max_id()?.unwrap_or(0) + 1,
            employee: new_float.employee,
            sequence: Self::next_sequence(&employee_floats),
            start_date: today,
            amount: new_float.amount,
            current_balance: new_float.amount,
            closing_balance: Decimal::ZERO,
            status: FloatStatus::AwaitingAccountant,
            closing_date: None,
            created_at: now.naive_utc(),
            updated_at: now.naive_utc(),
        };

        let created = self.repository.insert(float).await?;
        debug!(
            "created float {} for {} (sequence {}, transfer {})",
            created.id, created.employee, created.sequence, transfer_amount
        );
        self.notifier.publish(ChangeTopic::Floats);

        Ok(FloatCreation {
            float: created,
            previous_closing_balance,
            transfer_amount,
        })
    }

    async fn post_expense(&self, float_id: i64, amount: Decimal) -> Result<Float> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NonPositiveAmount(amount)));
        }
        let updated = self.repository.apply_balance_delta(float_id, -amount).await?;
        self.notifier.publish(ChangeTopic::Floats);
        Ok(updated)
    }

    async fn post_replacement(&self, float_id: i64, amount: Decimal) -> Result<Float> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NonPositiveAmount(amount)));
        }
        let updated = self.repository.apply_balance_delta(float_id, amount).await?;
        self.notifier.publish(ChangeTopic::Floats);
        Ok(updated)
    }

    async fn revise_expense_amount(
        &self,
        float_id: i64,
        old_amount: Decimal,
        new_amount: Decimal,
        kind: ExpenseKind,
    ) -> Result<Float> {
        if new_amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NonPositiveAmount(
                new_amount,
            )));
        }
        let delta = new_amount - old_amount;
        let applied = match kind {
            ExpenseKind::Invoice => -delta,
            ExpenseKind::Replacement => delta,
        };
        let updated = self.repository.apply_balance_delta(float_id, applied).await?;
        self.notifier.publish(ChangeTopic::Floats);
        Ok(updated)
    }

    async fn mark_awaiting_doctor(&self, float_id: i64) -> Result<Float> {
        let mut float = self.require(float_id)?;
        if float.status != FloatStatus::AwaitingAccountant {
            return Err(Error::State(format!(
                "float {float_id} is not awaiting accountant review"
            )));
        }
        float.status = FloatStatus::AwaitingDoctor;
        let updated = self.repository.update(float).await?;
        self.notifier.publish(ChangeTopic::Floats);
        Ok(updated)
    }

    async fn finalize_approval(&self, float_id: i64) -> Result<Float> {
        let mut float = self.require(float_id)?;
        if float.status != FloatStatus::AwaitingDoctor {
            return Err(Error::State(format!(
                "float {float_id} is not awaiting doctor approval"
            )));
        }
        float.status = FloatStatus::Open;
        let updated = self.repository.update(float).await?;

        // The predecessor stayed partially closed while this float was under
        // review; its successor is now approved, so it closes for good.
        if let Some(mut prev) = self
            .repository
            .latest_partially_closed_before(&updated.employee, float_id)?
        {
            prev.status = FloatStatus::Closed;
            self.repository.update(prev).await?;
        }

        self.notifier.publish(ChangeTopic::Floats);
        Ok(updated)
    }

    async fn reject(&self, float_id: i64, reviewer: Role) -> Result<Float> {
        let status = match reviewer {
            Role::Accountant => FloatStatus::RejectedByAccountant,
            Role::Doctor => FloatStatus::RejectedByDoctor,
            other => {
                return Err(Error::Forbidden(format!(
                    "role {other} cannot reject a float"
                )))
            }
        };
        let mut float = self.require(float_id)?;
        float.status = status;
        let updated = self.repository.update(float).await?;
        self.notifier.publish(ChangeTopic::Floats);
        Ok(updated)
    }
}
