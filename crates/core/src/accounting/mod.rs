//! Chart of accounts, fee items and fee schedules.

use serde::Serialize;
use serde_json::Value;
use sras_shared::types::{CanonicalCode, Cents, CodeKind, RecordId};

use crate::academic::sort_order;
use crate::validation::fields::{
    boolean_or, code, money, one_of, reference, required, required_text,
};
use crate::validation::{Contract, Fields, ValidationErrors};

/// Classification of an account in the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
    ContraRevenue,
}

impl AccountType {
    /// Every account type.
    pub const ALL: [Self; 6] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
        Self::ContraRevenue,
    ];

    /// Returns the stored name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Revenue => "REVENUE",
            Self::Expense => "EXPENSE",
            Self::ContraRevenue => "CONTRA_REVENUE",
        }
    }

    /// Parses a stored name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// Input for creating an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInput {
    /// Account code, e.g. "TUITION_REVENUE".
    pub code: CanonicalCode,
    /// Display name.
    pub name: String,
    /// Account classification.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Whether the account accepts new references.
    pub is_active: bool,
}

impl Contract for AccountInput {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let fields = Fields::of(input)?;
        let mut errors = ValidationErrors::new();

        let code = errors.check(
            "code",
            required(fields.get("code")).and_then(|v| code(v, CodeKind::Account)),
        );
        let name = errors.check("name", required_text(fields.get("name"), "Name is required"));
        let account_type = errors.check(
            "type",
            required(fields.get("type"))
                .and_then(|v| one_of(v, &AccountType::ALL, AccountType::as_str)),
        );
        let is_active = errors.check("isActive", boolean_or(fields.get("isActive"), true));

        let (Some(code), Some(name), Some(account_type), Some(is_active)) =
            (code, name, account_type, is_active)
        else {
            return Err(errors);
        };
        Ok(Self {
            code,
            name,
            account_type,
            is_active,
        })
    }
}

/// Input for creating a fee item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeItemInput {
    /// Fee item code, e.g. "TUITION_FEE".
    pub code: CanonicalCode,
    /// Display name.
    pub name: String,
    /// Amount charged unless a schedule line overrides it.
    pub default_amount_cents: Cents,
    /// Code of the revenue account credited by this fee.
    pub revenue_account_code: CanonicalCode,
    /// Whether the item can be added to schedules.
    pub is_active: bool,
}

impl Contract for FeeItemInput {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let fields = Fields::of(input)?;
        let mut errors = ValidationErrors::new();

        let fee_item_code = errors.check(
            "code",
            required(fields.get("code")).and_then(|v| code(v, CodeKind::FeeItem)),
        );
        let name = errors.check("name", required_text(fields.get("name"), "Name is required"));
        let default_amount_cents = errors.check(
            "defaultAmountCents",
            required(fields.get("defaultAmountCents")).and_then(money),
        );
        let revenue_account_code = errors.check(
            "revenueAccountCode",
            required(fields.get("revenueAccountCode")).and_then(|v| code(v, CodeKind::Account)),
        );
        let is_active = errors.check("isActive", boolean_or(fields.get("isActive"), true));

        let (
            Some(code),
            Some(name),
            Some(default_amount_cents),
            Some(revenue_account_code),
            Some(is_active),
        ) = (fee_item_code, name, default_amount_cents, revenue_account_code, is_active)
        else {
            return Err(errors);
        };
        Ok(Self {
            code,
            name,
            default_amount_cents,
            revenue_account_code,
            is_active,
        })
    }
}

/// Input for creating a fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeScheduleInput {
    /// School year the schedule applies to.
    pub school_year_id: RecordId,
    /// Grade level the schedule applies to.
    pub grade_level_id: RecordId,
    /// Display name.
    pub name: String,
    /// Whether this is the default schedule for its year and level.
    pub is_default: bool,
    /// Whether the schedule is in use.
    pub is_active: bool,
}

impl Contract for FeeScheduleInput {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let fields = Fields::of(input)?;
        let mut errors = ValidationErrors::new();

        let school_year_id = errors.check(
            "schoolYearId",
            reference(fields.get("schoolYearId"), "School year ID is required"),
        );
        let grade_level_id = errors.check(
            "gradeLevelId",
            reference(fields.get("gradeLevelId"), "Grade level ID is required"),
        );
        let name = errors.check("name", required_text(fields.get("name"), "Name is required"));
        let is_default = errors.check("isDefault", boolean_or(fields.get("isDefault"), false));
        let is_active = errors.check("isActive", boolean_or(fields.get("isActive"), true));

        let (Some(school_year_id), Some(grade_level_id), Some(name), Some(is_default), Some(is_active)) =
            (school_year_id, grade_level_id, name, is_default, is_active)
        else {
            return Err(errors);
        };
        Ok(Self {
            school_year_id,
            grade_level_id,
            name,
            is_default,
            is_active,
        })
    }
}

/// Input for adding a line to a fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeScheduleLineInput {
    /// Schedule the line belongs to.
    pub fee_schedule_id: RecordId,
    /// Fee item charged by the line.
    pub fee_item_id: RecordId,
    /// Amount charged on this schedule.
    pub amount_cents: Cents,
    /// Whether every student on the schedule pays it.
    pub is_required: bool,
    /// Position within the schedule.
    pub sort_order: i32,
}

impl Contract for FeeScheduleLineInput {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let fields = Fields::of(input)?;
        let mut errors = ValidationErrors::new();

        let fee_schedule_id = errors.check(
            "feeScheduleId",
            reference(fields.get("feeScheduleId"), "Fee schedule ID is required"),
        );
        let fee_item_id = errors.check(
            "feeItemId",
            reference(fields.get("feeItemId"), "Fee item ID is required"),
        );
        let amount_cents = errors.check(
            "amountCents",
            required(fields.get("amountCents")).and_then(money),
        );
        let is_required = errors.check("isRequired", boolean_or(fields.get("isRequired"), true));
        let sort_order = errors.check("sortOrder", sort_order(fields.get("sortOrder")));

        let (Some(fee_schedule_id), Some(fee_item_id), Some(amount_cents), Some(is_required), Some(sort_order)) =
            (fee_schedule_id, fee_item_id, amount_cents, is_required, sort_order)
        else {
            return Err(errors);
        };
        Ok(Self {
            fee_schedule_id,
            fee_item_id,
            amount_cents,
            is_required,
            sort_order,
        })
    }
}
