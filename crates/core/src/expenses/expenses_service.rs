use log::debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::expenses_model::{ExpenseKind, ExpenseRecord, ExpenseUpdate, NewExpense};
use super::expenses_traits::{ExpenseRecorderServiceTrait, ExpenseRepositoryTrait};
use crate::auth::Actor;
use crate::errors::{Error, Result, ValidationError};
use crate::events::{ChangeNotifierTrait, ChangeTopic};
use crate::files::{FileStoreTrait, FileUpload};
use crate::floats::{FloatLedgerServiceTrait, FloatStatus};
use crate::users::Role;

fn topic_for(kind: ExpenseKind) -> ChangeTopic {
    match kind {
        ExpenseKind::Invoice => ChangeTopic::Invoices,
        ExpenseKind::Replacement => ChangeTopic::Replacements,
    }
}

/// Service validating and persisting expense records, keeping them in step
/// with the float ledger balance.
pub struct ExpenseRecorderService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    ledger: Arc<dyn FloatLedgerServiceTrait>,
    files: Arc<dyn FileStoreTrait>,
    notifier: Arc<dyn ChangeNotifierTrait>,
}

impl ExpenseRecorderService {
    pub fn new(
        repository: Arc<dyn ExpenseRepositoryTrait>,
        ledger: Arc<dyn FloatLedgerServiceTrait>,
        files: Arc<dyn FileStoreTrait>,
        notifier: Arc<dyn ChangeNotifierTrait>,
    ) -> Self {
        Self {
            repository,
            ledger,
            files,
            notifier,
        }
    }

    /// Reviewers judge expenses; they do not file them.
    fn ensure_may_record(actor: &Actor) -> Result<()> {
        if matches!(actor.role, Role::Doctor | Role::Accountant) {
            return Err(Error::Forbidden(
                "doctors and accountants may not record expenses".to_string(),
            ));
        }
        Ok(())
    }

    async fn add_record(
        &self,
        actor: &Actor,
        input: NewExpense,
        file: Option<FileUpload>,
        kind: ExpenseKind,
    ) -> Result<ExpenseRecord> {
        Self::ensure_may_record(actor)?;
        input.validate()?;

        let float = self.ledger.get_float(input.float_id)?;
        if float.status != FloatStatus::Open {
            return Err(Error::State(format!(
                "float {} is not open for expenses",
                float.id
            )));
        }

        let record_no = self.repository.last_record_no(input.float_id)?.unwrap_or(0) + 1;

        let stored = match file {
            Some(upload) => {
                let hint = format!("odas/{}/{}/{}", input.float_id, kind.collection(), record_no);
                Some(self.files.store(&upload, &hint)?)
            }
            None => None,
        };

        let now = Utc::now();
        let record = ExpenseRecord {
            id: Uuid::new_v4().to_string(),
            record_no,
            float_id: input.float_id,
            kind,
            date: input.date.unwrap_or_else(|| now.date_naive()),
            name: input.name,
            description: input.description,
            project_name: input.project_name,
            amount: input.amount,
            file: stored,
            created_at: now.naive_utc(),
            updated_at: now.naive_utc(),
        };

        let record = self.repository.insert(record).await?;
        match kind {
            ExpenseKind::Invoice => {
                self.ledger.post_expense(record.float_id, record.amount).await?
            }
            ExpenseKind::Replacement => {
                self.ledger
                    .post_replacement(record.float_id, record.amount)
                    .await?
            }
        };
        debug!(
            "recorded {} {} of {} against float {}",
            kind, record.record_no, record.amount, record.float_id
        );
        self.notifier.publish(topic_for(kind));
        Ok(record)
    }
}

#[async_trait]
impl ExpenseRecorderServiceTrait for ExpenseRecorderService {
    fn get_record(&self, record_id: &str) -> Result<ExpenseRecord> {
        self.repository
            .find_by_id(record_id)?
            .ok_or_else(|| Error::NotFound(format!("expense record {record_id} does not exist")))
    }

    fn list_for_float(
        &self,
        float_id: i64,
        kind: Option<ExpenseKind>,
    ) -> Result<Vec<ExpenseRecord>> {
        self.repository.list_for_float(float_id, kind)
    }

    async fn add_invoice(
        &self,
        actor: &Actor,
        input: NewExpense,
        file: Option<FileUpload>,
    ) -> Result<ExpenseRecord> {
        self.add_record(actor, input, file, ExpenseKind::Invoice).await
    }

    async fn add_replacement(
        &self,
        actor: &Actor,
        input: NewExpense,
        file: Option<FileUpload>,
    ) -> Result<ExpenseRecord> {
        self.add_record(actor, input, file, ExpenseKind::Replacement)
            .await
    }

    async fn update_record(
        &self,
        actor: &Actor,
        record_id: &str,
        update: ExpenseUpdate,
    ) -> Result<ExpenseRecord> {
        Self::ensure_may_record(actor)?;

        let mut record = self.get_record(record_id)?;
        let float = self.ledger.get_float(record.float_id)?;
        if float.status != FloatStatus::Open {
            return Err(Error::State(format!(
                "float {} is not open for corrections",
                float.id
            )));
        }

        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::MissingField(
                    "name".to_string(),
                )));
            }
        }

        // Balance first: if the revision is refused nothing else changes.
        if let Some(new_amount) = update.amount {
            if new_amount != record.amount {
                self.ledger
                    .revise_expense_amount(record.float_id, record.amount, new_amount, record.kind)
                    .await?;
                record.amount = new_amount;
            }
        }
        if let Some(date) = update.date {
            record.date = date;
        }
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(description) = update.description {
            record.description = Some(description);
        }
        if let Some(project_name) = update.project_name {
            record.project_name = Some(project_name);
        }
        record.updated_at = Utc::now().naive_utc();

        let record = self.repository.update(record).await?;
        self.notifier.publish(topic_for(record.kind));
        Ok(record)
    }

    fn locate_file(&self, record_id: &str) -> Result<String> {
        let record = self.get_record(record_id)?;
        let file = record.file.ok_or_else(|| {
            Error::NotFound(format!("expense record {record_id} has no attachment"))
        })?;
        self.files.locate(&file.key)
    }
}
