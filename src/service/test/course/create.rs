use super::*;

/// Tests creating a course without students.
///
/// Expected: Ok with scalar fields persisted
#[tokio::test]
async fn creates_bare_course() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = CourseService::new(db);
    let detail = service
        .create(&CourseRequest {
            name: Some("Mathematics".to_string()),
            description: Some("Fundamental concepts of mathematics.".to_string()),
            student_ids: None,
        })
        .await?;

    assert_eq!(detail.name, "Mathematics");
    assert!(detail.students.is_empty());

    Ok(())
}

/// Tests creating a course with an initial student batch.
///
/// Expected: Ok with both students enrolled
#[tokio::test]
async fn creates_course_with_students() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let a = factory::create_student(db).await?;
    let b = factory::create_student(db).await?;

    let service = CourseService::new(db);
    let detail = service
        .create(&CourseRequest {
            name: Some("Physics".to_string()),
            description: Some("Mechanics and waves.".to_string()),
            student_ids: Some(vec![a.id, b.id]),
        })
        .await?;

    let student_ids: Vec<i32> = detail.students.iter().map(|s| s.id).collect();
    assert_eq!(student_ids, vec![a.id, b.id]);

    Ok(())
}

/// Tests the rollback when a requested student does not exist.
///
/// Expected: Err(NotFound) with no course persisted
#[tokio::test]
async fn unknown_student_rolls_back_insert() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = CourseService::new(db);
    let err = service
        .create(&CourseRequest {
            name: Some("Chemistry".to_string()),
            description: Some("Atoms and bonds.".to_string()),
            student_ids: Some(vec![9999]),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(CourseRepository::new(db).get_by_name("Chemistry").await?.is_none());

    Ok(())
}

/// Tests the missing required field.
///
/// Expected: Err(Validation)
#[tokio::test]
async fn missing_description_is_rejected() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = CourseService::new(db);
    let err = service
        .create(&CourseRequest {
            name: Some("History".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));

    Ok(())
}
