use super::*;

/// Tests the full replacement.
///
/// The course starts with two enrolled students; the put renames the course
/// and swaps the set to keep one, drop one, and add one.
///
/// Expected: Ok with exactly the requested students
#[tokio::test]
async fn replaces_student_set_exactly() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let kept = factory::create_student(db).await?;
    let dropped = factory::create_student(db).await?;
    let added = factory::create_student(db).await?;
    factory::enroll(db, kept.id, course.id).await?;
    factory::enroll(db, dropped.id, course.id).await?;

    let service = CourseService::new(db);
    let detail = service
        .put(
            course.id,
            &CourseRequest {
                name: Some("Advanced Mathematics".to_string()),
                description: Some("Second-year syllabus.".to_string()),
                student_ids: Some(vec![kept.id, added.id]),
            },
        )
        .await?;

    assert_eq!(detail.name, "Advanced Mathematics");
    let student_ids: Vec<i32> = detail.students.iter().map(|s| s.id).collect();
    assert_eq!(student_ids, vec![kept.id, added.id]);

    Ok(())
}

/// Tests that an empty student list clears the enrollment set.
///
/// Expected: Ok with no students left
#[tokio::test]
async fn empty_list_clears_enrollments() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let student = factory::create_student(db).await?;
    factory::enroll(db, student.id, course.id).await?;

    let service = CourseService::new(db);
    let detail = service
        .put(
            course.id,
            &CourseRequest {
                name: Some(course.name.clone()),
                description: Some(course.description.clone()),
                student_ids: Some(vec![]),
            },
        )
        .await?;

    assert!(detail.students.is_empty());

    Ok(())
}

/// Tests the completeness check.
///
/// Expected: Err(Validation)
#[tokio::test]
async fn incomplete_request_is_rejected() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;

    let service = CourseService::new(db);
    let err = service
        .put(
            course.id,
            &CourseRequest {
                name: Some("Only".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));

    Ok(())
}
