//! Academic structure: school years, grade levels, curricula and subjects.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sras_shared::types::{CanonicalCode, CodeKind, RecordId};

use crate::validation::fields::{
    boolean_or, code, date, integer, optional_reference, positive_integer, reference, required,
    required_text,
};
use crate::validation::{Contract, Fields, ValidationErrors};

/// Input for creating a school year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolYearInput {
    /// Display name, e.g. "2026-2027".
    pub name: String,
    /// First day of classes.
    pub start_date: DateTime<Utc>,
    /// Last day of classes; strictly after `start_date`.
    pub end_date: DateTime<Utc>,
    /// Whether this is the current school year.
    pub is_active: bool,
}

impl Contract for SchoolYearInput {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let fields = Fields::of(input)?;
        let mut errors = ValidationErrors::new();

        let name = errors.check("name", required_text(fields.get("name"), "Name is required"));
        let start_date = errors.check("startDate", required(fields.get("startDate")).and_then(date));
        let end_date = errors.check("endDate", required(fields.get("endDate")).and_then(date));
        let is_active = errors.check("isActive", boolean_or(fields.get("isActive"), true));

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end <= start {
                errors.push("endDate", "End date must be after start date");
            }
        }

        let (Some(name), Some(start_date), Some(end_date), Some(is_active), true) =
            (name, start_date, end_date, is_active, errors.is_empty())
        else {
            return Err(errors);
        };
        Ok(Self {
            name,
            start_date,
            end_date,
            is_active,
        })
    }
}

/// Input for creating a grade level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeLevelInput {
    /// Grade level code, e.g. "G7".
    pub code: CanonicalCode,
    /// Display name, e.g. "Grade 7".
    pub name: String,
    /// Position in listings; kindergarten is 0.
    pub sort_order: i32,
}

impl Contract for GradeLevelInput {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let fields = Fields::of(input)?;
        let mut errors = ValidationErrors::new();

        let code = errors.check(
            "code",
            required(fields.get("code")).and_then(|v| code(v, CodeKind::GradeLevel)),
        );
        let name = errors.check("name", required_text(fields.get("name"), "Name is required"));
        let sort_order = errors.check("sortOrder", sort_order(fields.get("sortOrder")));

        let (Some(code), Some(name), Some(sort_order)) = (code, name, sort_order) else {
            return Err(errors);
        };
        Ok(Self {
            code,
            name,
            sort_order,
        })
    }
}

/// Input for creating a curriculum version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumVersionInput {
    /// Display name, e.g. "K-12 Revised 2024".
    pub name: String,
    /// Date the curriculum takes effect.
    pub effective_date: DateTime<Utc>,
    /// Whether the curriculum is in use.
    pub is_active: bool,
}

impl Contract for CurriculumVersionInput {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let fields = Fields::of(input)?;
        let mut errors = ValidationErrors::new();

        let name = errors.check("name", required_text(fields.get("name"), "Name is required"));
        let effective_date = errors.check(
            "effectiveDate",
            required(fields.get("effectiveDate")).and_then(date),
        );
        let is_active = errors.check("isActive", boolean_or(fields.get("isActive"), true));

        let (Some(name), Some(effective_date), Some(is_active)) = (name, effective_date, is_active)
        else {
            return Err(errors);
        };
        Ok(Self {
            name,
            effective_date,
            is_active,
        })
    }
}

/// Input for creating a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectInput {
    /// Subject code, e.g. "MATH-7".
    pub code: CanonicalCode,
    /// Display name.
    pub name: String,
    /// Credit units, if the subject carries any.
    pub units: Option<u32>,
    /// Grade level the subject is taught in.
    pub grade_level_id: RecordId,
    /// Curriculum the subject belongs to.
    pub curriculum_version_id: RecordId,
    /// School year the subject is restricted to, if any.
    pub school_year_id: Option<RecordId>,
    /// Whether the subject is offered.
    pub is_active: bool,
}

impl Contract for SubjectInput {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let fields = Fields::of(input)?;
        let mut errors = ValidationErrors::new();

        let code = errors.check(
            "code",
            required(fields.get("code")).and_then(|v| code(v, CodeKind::Generic)),
        );
        let name = errors.check("name", required_text(fields.get("name"), "Name is required"));
        let units = errors.check(
            "units",
            fields
                .present("units")
                .map(|v| {
                    positive_integer(v, "Units must be a positive integer").and_then(|units| {
                        u32::try_from(units).map_err(|_| "Units is too large".to_string())
                    })
                })
                .transpose(),
        );
        let grade_level_id = errors.check(
            "gradeLevelId",
            reference(fields.get("gradeLevelId"), "Grade level ID is required"),
        );
        let curriculum_version_id = errors.check(
            "curriculumVersionId",
            reference(
                fields.get("curriculumVersionId"),
                "Curriculum version ID is required",
            ),
        );
        let school_year_id = errors.check(
            "schoolYearId",
            optional_reference(fields.get("schoolYearId")),
        );
        let is_active = errors.check("isActive", boolean_or(fields.get("isActive"), true));

        let (
            Some(code),
            Some(name),
            Some(units),
            Some(grade_level_id),
            Some(curriculum_version_id),
            Some(school_year_id),
            Some(is_active),
        ) = (
            code,
            name,
            units,
            grade_level_id,
            curriculum_version_id,
            school_year_id,
            is_active,
        )
        else {
            return Err(errors);
        };
        Ok(Self {
            code,
            name,
            units,
            grade_level_id,
            curriculum_version_id,
            school_year_id,
            is_active,
        })
    }
}

/// Sort order: a whole number that fits the stored column.
pub(crate) fn sort_order(value: Option<&Value>) -> Result<i32, String> {
    const MESSAGE: &str = "Sort order must be an integer";
    required(value)
        .and_then(|v| integer(v, MESSAGE))
        .and_then(|n| i32::try_from(n).map_err(|_| MESSAGE.to_string()))
}
