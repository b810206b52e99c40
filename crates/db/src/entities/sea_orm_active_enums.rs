//! String-backed enums stored in VARCHAR columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use sras_core::{accounting, students};

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum AccountType {
    #[sea_orm(string_value = "ASSET")]
    Asset,
    #[sea_orm(string_value = "LIABILITY")]
    Liability,
    #[sea_orm(string_value = "EQUITY")]
    Equity,
    #[sea_orm(string_value = "REVENUE")]
    Revenue,
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
    #[sea_orm(string_value = "CONTRA_REVENUE")]
    ContraRevenue,
}

impl From<accounting::AccountType> for AccountType {
    fn from(value: accounting::AccountType) -> Self {
        match value {
            accounting::AccountType::Asset => Self::Asset,
            accounting::AccountType::Liability => Self::Liability,
            accounting::AccountType::Equity => Self::Equity,
            accounting::AccountType::Revenue => Self::Revenue,
            accounting::AccountType::Expense => Self::Expense,
            accounting::AccountType::ContraRevenue => Self::ContraRevenue,
        }
    }
}

/// Student sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum Sex {
    #[sea_orm(string_value = "MALE")]
    Male,
    #[sea_orm(string_value = "FEMALE")]
    Female,
}

impl From<students::Sex> for Sex {
    fn from(value: students::Sex) -> Self {
        match value {
            students::Sex::Male => Self::Male,
            students::Sex::Female => Self::Female,
        }
    }
}

/// Enrollment lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum EnrollmentStatus {
    #[sea_orm(string_value = "ENROLLED")]
    Enrolled,
    #[sea_orm(string_value = "RESERVED")]
    Reserved,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    #[sea_orm(string_value = "TRANSFERRED")]
    Transferred,
}

impl From<students::EnrollmentStatus> for EnrollmentStatus {
    fn from(value: students::EnrollmentStatus) -> Self {
        match value {
            students::EnrollmentStatus::Enrolled => Self::Enrolled,
            students::EnrollmentStatus::Reserved => Self::Reserved,
            students::EnrollmentStatus::Cancelled => Self::Cancelled,
            students::EnrollmentStatus::Transferred => Self::Transferred,
        }
    }
}
