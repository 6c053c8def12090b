use super::*;

/// Tests the full replacement of a student's course set.
///
/// The student starts enrolled in two courses; the replacement keeps one,
/// drops one, and adds one. The final set must be exactly the requested set.
///
/// Expected: Ok with exactly the requested courses enrolled
#[tokio::test]
async fn replaces_course_set_exactly() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::create_student(db).await?;
    let kept = factory::create_course(db).await?;
    let dropped = factory::create_course(db).await?;
    let added = factory::create_course(db).await?;
    factory::enroll(db, student.id, kept.id).await?;
    factory::enroll(db, student.id, dropped.id).await?;

    let service = CourseEnrollmentService::new(db);
    service
        .replace_student_courses(student.id, &[kept.id, added.id])
        .await?;

    let edges = EnrollmentRepository::new(db);
    assert_eq!(
        edges.course_ids_for_student(student.id).await?,
        vec![kept.id, added.id]
    );

    Ok(())
}

/// Tests that replacement with an empty list clears every enrollment.
///
/// Expected: Ok with no edges left
#[tokio::test]
async fn empty_replacement_clears_all() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::create_student(db).await?;
    let course = factory::create_course(db).await?;
    factory::enroll(db, student.id, course.id).await?;

    let service = CourseEnrollmentService::new(db);
    service.replace_student_courses(student.id, &[]).await?;

    let edges = EnrollmentRepository::new(db);
    assert!(edges.course_ids_for_student(student.id).await?.is_empty());

    Ok(())
}

/// Tests that an unknown id aborts the replacement before clearing.
///
/// Expected: Err(NotFound) with the original set intact
#[tokio::test]
async fn unknown_course_aborts_before_clearing() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::create_student(db).await?;
    let course = factory::create_course(db).await?;
    factory::enroll(db, student.id, course.id).await?;

    let service = CourseEnrollmentService::new(db);
    let err = service
        .replace_student_courses(student.id, &[9999])
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    let edges = EnrollmentRepository::new(db);
    assert_eq!(edges.course_ids_for_student(student.id).await?, vec![course.id]);

    Ok(())
}

/// Tests the full replacement of a course's student set.
///
/// Expected: Ok with exactly the requested students enrolled
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

    let service = CourseEnrollmentService::new(db);
    service
        .replace_course_students(course.id, &[kept.id, added.id])
        .await?;

    let edges = EnrollmentRepository::new(db);
    assert_eq!(
        edges.student_ids_for_course(course.id).await?,
        vec![kept.id, added.id]
    );

    Ok(())
}
