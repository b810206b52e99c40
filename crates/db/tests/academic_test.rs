//! Integration tests for the academic repository.

mod common;

use common::{create_grade_level, create_school_year, input, setup};
use serde_json::json;
use sras_core::academic::{CurriculumVersionInput, GradeLevelInput, SubjectInput};
use sras_db::AcademicRepository;
use sras_db::repositories::AcademicError;

#[tokio::test]
async fn test_school_years_newest_first_and_active() {
    let db = setup().await;
    create_school_year(&db, "2025-2026", "2025-06-01", "2026-03-31").await;
    let newer = create_school_year(&db, "2026-2027", "2026-06-01", "2027-03-31").await;
    let repo = AcademicRepository::new(db);

    let years = repo.list_school_years().await.unwrap();
    let names: Vec<&str> = years.iter().map(|y| y.name.as_str()).collect();
    assert_eq!(names, vec!["2026-2027", "2025-2026"]);

    let active = repo.get_active_school_year().await.unwrap().unwrap();
    assert_eq!(active.id, newer.id);
}

#[tokio::test]
async fn test_no_active_school_year() {
    let db = setup().await;
    let repo = AcademicRepository::new(db);
    assert!(repo.get_active_school_year().await.unwrap().is_none());
}

#[tokio::test]
async fn test_grade_levels_sorted_and_unique() {
    let db = setup().await;
    create_grade_level(&db, "G1", 1).await;
    create_grade_level(&db, "K", 0).await;
    let repo = AcademicRepository::new(db);

    let codes: Vec<String> = repo
        .list_grade_levels()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.code)
        .collect();
    assert_eq!(codes, vec!["K", "G1"]);

    let err = repo
        .create_grade_level(input::<GradeLevelInput>(json!({
            "code": "g1",
            "name": "Grade One",
            "sortOrder": 1
        })))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademicError::DuplicateGradeLevelCode(ref code) if code == "G1"));
}

#[tokio::test]
async fn test_subjects_require_existing_references() {
    let db = setup().await;
    let grade = create_grade_level(&db, "G7", 7).await;
    let repo = AcademicRepository::new(db);

    let err = repo
        .create_subject(input::<SubjectInput>(json!({
            "code": "math-7",
            "name": "Mathematics 7",
            "gradeLevelId": grade.id,
            "curriculumVersionId": "missing-curriculum"
        })))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademicError::CurriculumVersionNotFound(_)));
}

#[tokio::test]
async fn test_list_subjects_by_grade_and_curriculum() {
    let db = setup().await;
    let grade = create_grade_level(&db, "G7", 7).await;
    let repo = AcademicRepository::new(db);

    let k12 = repo
        .create_curriculum_version(input::<CurriculumVersionInput>(json!({
            "name": "K-12 2013",
            "effectiveDate": "2013-06-01"
        })))
        .await
        .unwrap();
    let matatag = repo
        .create_curriculum_version(input::<CurriculumVersionInput>(json!({
            "name": "MATATAG",
            "effectiveDate": "2024-06-01"
        })))
        .await
        .unwrap();

    let versions = repo.list_curriculum_versions().await.unwrap();
    assert_eq!(versions[0].id, matatag.id);

    for (code, version) in [("SCI-7", &k12), ("MATH-7", &matatag), ("ENG-7", &matatag)] {
        repo.create_subject(input::<SubjectInput>(json!({
            "code": code,
            "name": code,
            "units": 3,
            "gradeLevelId": grade.id,
            "curriculumVersionId": version.id
        })))
        .await
        .unwrap();
    }

    let all = repo.list_subjects(&grade.id, None).await.unwrap();
    let codes: Vec<&str> = all.iter().map(|s| s.subject.code.as_str()).collect();
    assert_eq!(codes, vec!["ENG-7", "MATH-7", "SCI-7"]);

    let current = repo
        .list_subjects(&grade.id, Some(&matatag.id))
        .await
        .unwrap();
    assert_eq!(current.len(), 2);
    assert!(current.iter().all(|s| s.curriculum_version.name == "MATATAG"));
    assert_eq!(current[0].subject.units, Some(3));

    assert!(repo.list_subjects("missing", None).await.unwrap().is_empty());
}
