//! Students and enrollments.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sras_shared::types::RecordId;

use crate::validation::fields::{
    boolean_or, date, one_of, optional_text, phone, reference, required_text,
};
use crate::validation::{Contract, Fields, ValidationErrors};

/// Sex as recorded on the student's birth certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Every sex.
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// Returns the stored name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }

    /// Parses a stored name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

/// Lifecycle state of an enrollment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    /// Officially enrolled.
    #[default]
    Enrolled,
    /// Slot reserved, not yet enrolled.
    Reserved,
    /// Enrollment withdrawn.
    Cancelled,
    /// Moved to another school.
    Transferred,
}

impl EnrollmentStatus {
    /// Every status.
    pub const ALL: [Self; 4] = [
        Self::Enrolled,
        Self::Reserved,
        Self::Cancelled,
        Self::Transferred,
    ];

    /// Returns the stored name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enrolled => "ENROLLED",
            Self::Reserved => "RESERVED",
            Self::Cancelled => "CANCELLED",
            Self::Transferred => "TRANSFERRED",
        }
    }

    /// Parses a stored name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

/// Input for registering a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    /// School-issued student number.
    pub student_no: String,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// Middle name.
    pub middle_name: Option<String>,
    /// Sex.
    pub sex: Option<Sex>,
    /// Date of birth.
    pub birth_date: Option<DateTime<Utc>>,
    /// Home address.
    pub address: Option<String>,
    /// Parent or guardian.
    pub guardian_name: Option<String>,
    /// Guardian's mobile number.
    pub guardian_phone: Option<String>,
    /// Whether the student is currently attending.
    pub is_active: bool,
}

impl Contract for StudentInput {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let fields = Fields::of(input)?;
        let mut errors = ValidationErrors::new();

        let student_no = errors.check(
            "studentNo",
            required_text(fields.get("studentNo"), "Student number is required"),
        );
        let last_name = errors.check(
            "lastName",
            required_text(fields.get("lastName"), "Last name is required"),
        );
        let first_name = errors.check(
            "firstName",
            required_text(fields.get("firstName"), "First name is required"),
        );
        let middle_name = errors.check("middleName", optional_text(fields.get("middleName")));
        let sex = errors.check(
            "sex",
            fields
                .present("sex")
                .map(|v| one_of(v, &Sex::ALL, Sex::as_str))
                .transpose(),
        );
        let birth_date = errors.check(
            "birthDate",
            fields.present("birthDate").map(date).transpose(),
        );
        let address = errors.check("address", optional_text(fields.get("address")));
        let guardian_name = errors.check("guardianName", optional_text(fields.get("guardianName")));
        let guardian_phone = errors.check(
            "guardianPhone",
            fields.present("guardianPhone").map(phone).transpose(),
        );
        let is_active = errors.check("isActive", boolean_or(fields.get("isActive"), true));

        let (
            Some(student_no),
            Some(last_name),
            Some(first_name),
            Some(middle_name),
            Some(sex),
            Some(birth_date),
            Some(address),
            Some(guardian_name),
            Some(guardian_phone),
            Some(is_active),
        ) = (
            student_no,
            last_name,
            first_name,
            middle_name,
            sex,
            birth_date,
            address,
            guardian_name,
            guardian_phone,
            is_active,
        )
        else {
            return Err(errors);
        };
        Ok(Self {
            student_no,
            last_name,
            first_name,
            middle_name,
            sex,
            birth_date,
            address,
            guardian_name,
            guardian_phone,
            is_active,
        })
    }
}

/// Input for enrolling a student in a school year and grade level.
///
/// `status` and `enrolled_at` stay unset when the caller omits them; the
/// enrollment service fills in `ENROLLED` and the current time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentInput {
    /// Student being enrolled.
    pub student_id: RecordId,
    /// School year of the enrollment.
    pub school_year_id: RecordId,
    /// Grade level of the enrollment.
    pub grade_level_id: RecordId,
    /// Section, e.g. "Rizal".
    pub section_name: Option<String>,
    /// Requested status.
    pub status: Option<EnrollmentStatus>,
    /// When the enrollment took effect.
    pub enrolled_at: Option<DateTime<Utc>>,
}

impl Contract for EnrollmentInput {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let fields = Fields::of(input)?;
        let mut errors = ValidationErrors::new();

        let student_id = errors.check(
            "studentId",
            reference(fields.get("studentId"), "Student ID is required"),
        );
        let school_year_id = errors.check(
            "schoolYearId",
            reference(fields.get("schoolYearId"), "School year ID is required"),
        );
        let grade_level_id = errors.check(
            "gradeLevelId",
            reference(fields.get("gradeLevelId"), "Grade level ID is required"),
        );
        let section_name = errors.check("sectionName", optional_text(fields.get("sectionName")));
        let status = errors.check(
            "status",
            fields
                .present("status")
                .map(|v| one_of(v, &EnrollmentStatus::ALL, EnrollmentStatus::as_str))
                .transpose(),
        );
        let enrolled_at = errors.check(
            "enrolledAt",
            fields.present("enrolledAt").map(date).transpose(),
        );

        let (
            Some(student_id),
            Some(school_year_id),
            Some(grade_level_id),
            Some(section_name),
            Some(status),
            Some(enrolled_at),
        ) = (
            student_id,
            school_year_id,
            grade_level_id,
            section_name,
            status,
            enrolled_at,
        )
        else {
            return Err(errors);
        };
        Ok(Self {
            student_id,
            school_year_id,
            grade_level_id,
            section_name,
            status,
            enrolled_at,
        })
    }
}
