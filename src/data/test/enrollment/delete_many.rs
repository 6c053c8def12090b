use super::*;

/// Tests deleting a specific batch of edges.
///
/// Verifies that only the named pairs disappear and the rest of the
/// junction table survives.
///
/// Expected: Ok with the untouched edge still present
#[tokio::test]
async fn deletes_only_named_pairs() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::create_student(db).await?;
    let math = factory::create_course(db).await?;
    let physics = factory::create_course(db).await?;
    factory::enroll(db, student.id, math.id).await?;
    factory::enroll(db, student.id, physics.id).await?;

    let repo = EnrollmentRepository::new(db);
    repo.delete_many(&[(student.id, math.id)]).await?;

    assert_eq!(repo.course_ids_for_student(student.id).await?, vec![physics.id]);

    Ok(())
}

/// Tests clearing a student's edges wholesale.
///
/// Expected: Ok with the student's edges gone and the other student's kept
#[tokio::test]
async fn delete_by_student_clears_one_side_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let a = factory::create_student(db).await?;
    let b = factory::create_student(db).await?;
    let course = factory::create_course(db).await?;
    factory::enroll(db, a.id, course.id).await?;
    factory::enroll(db, b.id, course.id).await?;

    let repo = EnrollmentRepository::new(db);
    repo.delete_by_student(a.id).await?;

    assert!(repo.course_ids_for_student(a.id).await?.is_empty());
    assert_eq!(repo.student_ids_for_course(course.id).await?, vec![b.id]);

    Ok(())
}

/// Tests clearing a course's edges wholesale.
///
/// Expected: Ok with the course's edges gone and the other course's kept
#[tokio::test]
async fn delete_by_course_clears_one_side_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::create_student(db).await?;
    let math = factory::create_course(db).await?;
    let physics = factory::create_course(db).await?;
    factory::enroll(db, student.id, math.id).await?;
    factory::enroll(db, student.id, physics.id).await?;

    let repo = EnrollmentRepository::new(db);
    repo.delete_by_course(math.id).await?;

    assert_eq!(repo.course_ids_for_student(student.id).await?, vec![physics.id]);

    Ok(())
}
