//! Accounting repository: chart of accounts, fee items and fee schedules.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use sras_core::accounting::{AccountInput, FeeItemInput, FeeScheduleInput, FeeScheduleLineInput};
use sras_shared::AppError;
use sras_shared::types::{PageRequest, PageResponse, new_key};
use tracing::info;

use super::on_unique_violation;
use crate::entities::{
    accounts, fee_items, fee_schedule_lines, fee_schedules, grade_levels, school_years,
};

/// Error types for accounting operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountingError {
    /// Account code already exists.
    #[error("Account code \"{0}\" already exists")]
    DuplicateAccountCode(String),

    /// Fee item code already exists.
    #[error("Fee item code \"{0}\" already exists")]
    DuplicateFeeItemCode(String),

    /// The revenue account referenced by a fee item does not exist.
    #[error("Account with code \"{0}\" does not exist")]
    RevenueAccountNotFound(String),

    /// Fee schedule not found.
    #[error("Fee schedule with ID \"{0}\" does not exist")]
    FeeScheduleNotFound(String),

    /// Fee item not found.
    #[error("Fee item with ID \"{0}\" does not exist")]
    FeeItemNotFound(String),

    /// Fee schedule line not found.
    #[error("Fee schedule line with ID \"{0}\" does not exist")]
    FeeScheduleLineNotFound(String),

    /// School year not found.
    #[error("School year with ID \"{0}\" does not exist")]
    SchoolYearNotFound(String),

    /// Grade level not found.
    #[error("Grade level with ID \"{0}\" does not exist")]
    GradeLevelNotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountingError> for AppError {
    fn from(err: AccountingError) -> Self {
        let message = err.to_string();
        match err {
            AccountingError::DuplicateAccountCode(_) | AccountingError::DuplicateFeeItemCode(_) => {
                Self::Conflict(message)
            }
            AccountingError::RevenueAccountNotFound(_) => Self::ReferentialIntegrity(message),
            AccountingError::FeeScheduleNotFound(_)
            | AccountingError::FeeItemNotFound(_)
            | AccountingError::FeeScheduleLineNotFound(_)
            | AccountingError::SchoolYearNotFound(_)
            | AccountingError::GradeLevelNotFound(_) => Self::NotFound(message),
            AccountingError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Filter options for listing fee schedules.
#[derive(Debug, Clone, Default)]
pub struct FeeScheduleFilter {
    /// Only schedules for this school year.
    pub school_year_id: Option<String>,
    /// Only schedules for this grade level.
    pub grade_level_id: Option<String>,
    /// Only active (or inactive) schedules.
    pub is_active: Option<bool>,
}

/// A fee schedule with the school year and grade level it applies to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeScheduleWithContext {
    /// The schedule.
    #[serde(flatten)]
    pub schedule: fee_schedules::Model,
    /// Its school year.
    pub school_year: school_years::Model,
    /// Its grade level.
    pub grade_level: grade_levels::Model,
}

/// A schedule line with its fee item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeScheduleLineWithItem {
    /// The line.
    #[serde(flatten)]
    pub line: fee_schedule_lines::Model,
    /// The fee item charged.
    pub fee_item: fee_items::Model,
}

/// A fee schedule with its context and lines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeScheduleDetail {
    /// The schedule.
    #[serde(flatten)]
    pub schedule: fee_schedules::Model,
    /// Its school year.
    pub school_year: school_years::Model,
    /// Its grade level.
    pub grade_level: grade_levels::Model,
    /// Lines ordered by sort order.
    pub lines: Vec<FeeScheduleLineWithItem>,
}

/// Accounting repository.
#[derive(Debug, Clone)]
pub struct AccountingRepository {
    db: DatabaseConnection,
}

impl AccountingRepository {
    /// Creates a new accounting repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========== Accounts ==========

    /// Lists one page of accounts ordered by code.
    pub async fn list_accounts(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<accounts::Model>, AccountingError> {
        let total = accounts::Entity::find().count(&self.db).await?;
        let rows = accounts::Entity::find()
            .order_by_asc(accounts::Column::Code)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(PageResponse::new(rows, page, total))
    }

    /// Finds an account by its canonical code.
    pub async fn find_account_by_code(
        &self,
        code: &str,
    ) -> Result<Option<accounts::Model>, AccountingError> {
        Ok(accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?)
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccountCode` if the code is taken.
    pub async fn create_account(
        &self,
        input: AccountInput,
    ) -> Result<accounts::Model, AccountingError> {
        let code = input.code.into_inner();
        if self.find_account_by_code(&code).await?.is_some() {
            return Err(AccountingError::DuplicateAccountCode(code));
        }

        let now = Utc::now();
        let account = accounts::ActiveModel {
            id: Set(new_key()),
            code: Set(code.clone()),
            name: Set(input.name),
            r#type: Set(input.account_type.into()),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| on_unique_violation(e, || AccountingError::DuplicateAccountCode(code)))?;

        info!(code = %account.code, account_id = %account.id, "Account created");
        Ok(account)
    }

    // ========== Fee items ==========

    /// Lists active fee items ordered by code.
    pub async fn list_fee_items(&self) -> Result<Vec<fee_items::Model>, AccountingError> {
        Ok(fee_items::Entity::find()
            .filter(fee_items::Column::IsActive.eq(true))
            .order_by_asc(fee_items::Column::Code)
            .all(&self.db)
            .await?)
    }

    /// Creates a fee item.
    ///
    /// The revenue account is referenced by code rather than by key, so its
    /// existence is checked here before the insert.
    ///
    /// # Errors
    ///
    /// Returns `RevenueAccountNotFound` naming the missing code, or
    /// `DuplicateFeeItemCode` if the code is taken.
    pub async fn create_fee_item(
        &self,
        input: FeeItemInput,
    ) -> Result<fee_items::Model, AccountingError> {
        let revenue_account_code = input.revenue_account_code.into_inner();
        if self.find_account_by_code(&revenue_account_code).await?.is_none() {
            return Err(AccountingError::RevenueAccountNotFound(revenue_account_code));
        }

        let code = input.code.into_inner();
        let existing = fee_items::Entity::find()
            .filter(fee_items::Column::Code.eq(code.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountingError::DuplicateFeeItemCode(code));
        }

        let now = Utc::now();
        let item = fee_items::ActiveModel {
            id: Set(new_key()),
            code: Set(code.clone()),
            name: Set(input.name),
            default_amount_cents: Set(input.default_amount_cents.value()),
            revenue_account_code: Set(revenue_account_code),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| on_unique_violation(e, || AccountingError::DuplicateFeeItemCode(code)))?;

        info!(
            code = %item.code,
            revenue_account = %item.revenue_account_code,
            amount_cents = item.default_amount_cents,
            "Fee item created"
        );
        Ok(item)
    }

    // ========== Fee schedules ==========

    /// Lists fee schedules, newest school year first, then by grade level
    /// sort order and name.
    pub async fn list_fee_schedules(
        &self,
        filter: FeeScheduleFilter,
    ) -> Result<Vec<FeeScheduleWithContext>, AccountingError> {
        let mut query = fee_schedules::Entity::find();
        if let Some(school_year_id) = filter.school_year_id {
            query = query.filter(fee_schedules::Column::SchoolYearId.eq(school_year_id));
        }
        if let Some(grade_level_id) = filter.grade_level_id {
            query = query.filter(fee_schedules::Column::GradeLevelId.eq(grade_level_id));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(fee_schedules::Column::IsActive.eq(is_active));
        }
        let schedules = query.all(&self.db).await?;

        let years = self
            .school_years_by_id(schedules.iter().map(|s| s.school_year_id.clone()))
            .await?;
        let grades = self
            .grade_levels_by_id(schedules.iter().map(|s| s.grade_level_id.clone()))
            .await?;

        let mut result: Vec<FeeScheduleWithContext> = schedules
            .into_iter()
            .filter_map(|schedule| {
                let school_year = years.get(&schedule.school_year_id)?.clone();
                let grade_level = grades.get(&schedule.grade_level_id)?.clone();
                Some(FeeScheduleWithContext {
                    schedule,
                    school_year,
                    grade_level,
                })
            })
            .collect();

        result.sort_by(|a, b| {
            b.school_year
                .start_date
                .cmp(&a.school_year.start_date)
                .then(a.grade_level.sort_order.cmp(&b.grade_level.sort_order))
                .then_with(|| a.schedule.name.cmp(&b.schedule.name))
        });
        Ok(result)
    }

    /// Gets a fee schedule with its lines and their fee items.
    pub async fn get_fee_schedule_with_lines(
        &self,
        fee_schedule_id: &str,
    ) -> Result<Option<FeeScheduleDetail>, AccountingError> {
        let Some(schedule) = fee_schedules::Entity::find_by_id(fee_schedule_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let school_year = school_years::Entity::find_by_id(schedule.school_year_id.as_str())
            .one(&self.db)
            .await?
            .ok_or_else(|| AccountingError::SchoolYearNotFound(schedule.school_year_id.clone()))?;
        let grade_level = grade_levels::Entity::find_by_id(schedule.grade_level_id.as_str())
            .one(&self.db)
            .await?
            .ok_or_else(|| AccountingError::GradeLevelNotFound(schedule.grade_level_id.clone()))?;

        let lines = fee_schedule_lines::Entity::find()
            .filter(fee_schedule_lines::Column::FeeScheduleId.eq(schedule.id.as_str()))
            .order_by_asc(fee_schedule_lines::Column::SortOrder)
            .find_also_related(fee_items::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .filter_map(|(line, fee_item)| {
                fee_item.map(|fee_item| FeeScheduleLineWithItem { line, fee_item })
            })
            .collect();

        Ok(Some(FeeScheduleDetail {
            schedule,
            school_year,
            grade_level,
            lines,
        }))
    }

    /// Creates a fee schedule.
    ///
    /// # Errors
    ///
    /// Returns `SchoolYearNotFound` or `GradeLevelNotFound` if a reference is
    /// missing.
    pub async fn create_fee_schedule(
        &self,
        input: FeeScheduleInput,
    ) -> Result<fee_schedules::Model, AccountingError> {
        let school_year_id = input.school_year_id.to_key();
        let grade_level_id = input.grade_level_id.to_key();

        if school_years::Entity::find_by_id(school_year_id.as_str())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(AccountingError::SchoolYearNotFound(school_year_id));
        }
        if grade_levels::Entity::find_by_id(grade_level_id.as_str())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(AccountingError::GradeLevelNotFound(grade_level_id));
        }

        let now = Utc::now();
        let schedule = fee_schedules::ActiveModel {
            id: Set(new_key()),
            school_year_id: Set(school_year_id),
            grade_level_id: Set(grade_level_id),
            name: Set(input.name),
            is_default: Set(input.is_default),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(fee_schedule_id = %schedule.id, name = %schedule.name, "Fee schedule created");
        Ok(schedule)
    }

    /// Adds a line to a fee schedule.
    ///
    /// The schedule check, the fee item check and the insert run in one
    /// transaction; nothing is written unless both references exist.
    ///
    /// # Errors
    ///
    /// Returns `FeeScheduleNotFound` or `FeeItemNotFound` before any write.
    pub async fn add_fee_schedule_line(
        &self,
        input: FeeScheduleLineInput,
    ) -> Result<fee_schedule_lines::Model, AccountingError> {
        let fee_schedule_id = input.fee_schedule_id.to_key();
        let fee_item_id = input.fee_item_id.to_key();

        let txn = self.db.begin().await?;

        if fee_schedules::Entity::find_by_id(fee_schedule_id.as_str())
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(AccountingError::FeeScheduleNotFound(fee_schedule_id));
        }
        if fee_items::Entity::find_by_id(fee_item_id.as_str())
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(AccountingError::FeeItemNotFound(fee_item_id));
        }

        let now = Utc::now();
        let line = fee_schedule_lines::ActiveModel {
            id: Set(new_key()),
            fee_schedule_id: Set(fee_schedule_id),
            fee_item_id: Set(fee_item_id),
            amount_cents: Set(input.amount_cents.value()),
            is_required: Set(input.is_required),
            sort_order: Set(input.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            fee_schedule_id = %line.fee_schedule_id,
            fee_item_id = %line.fee_item_id,
            amount_cents = line.amount_cents,
            "Fee schedule line added"
        );
        Ok(line)
    }

    /// Deletes a line from a fee schedule.
    ///
    /// # Errors
    ///
    /// Returns `FeeScheduleLineNotFound` if the schedule has no line with
    /// that key.
    pub async fn delete_fee_schedule_line(
        &self,
        fee_schedule_id: &str,
        line_id: &str,
    ) -> Result<(), AccountingError> {
        let result = fee_schedule_lines::Entity::delete_many()
            .filter(fee_schedule_lines::Column::Id.eq(line_id))
            .filter(fee_schedule_lines::Column::FeeScheduleId.eq(fee_schedule_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AccountingError::FeeScheduleLineNotFound(line_id.to_string()));
        }
        info!(fee_schedule_id = %fee_schedule_id, line_id = %line_id, "Fee schedule line deleted");
        Ok(())
    }

    async fn school_years_by_id(
        &self,
        ids: impl Iterator<Item = String>,
    ) -> Result<HashMap<String, school_years::Model>, AccountingError> {
        let ids: Vec<String> = ids.collect();
        Ok(school_years::Entity::find()
            .filter(school_years::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect())
    }

    async fn grade_levels_by_id(
        &self,
        ids: impl Iterator<Item = String>,
    ) -> Result<HashMap<String, grade_levels::Model>, AccountingError> {
        let ids: Vec<String> = ids.collect();
        Ok(grade_levels::Entity::find()
            .filter(grade_levels::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect())
    }
}
