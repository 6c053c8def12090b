use super::*;

/// Tests loading a course with its enrolled students.
///
/// Verifies that enrolled students come back ordered by id and students of
/// other courses do not appear.
///
/// Expected: Ok(Some) with both enrolled students in ascending id order
#[tokio::test]
async fn loads_enrolled_students_in_id_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let other = factory::create_course(db).await?;
    let a = factory::create_student(db).await?;
    let b = factory::create_student(db).await?;
    let outsider = factory::create_student(db).await?;
    factory::enroll(db, b.id, course.id).await?;
    factory::enroll(db, a.id, course.id).await?;
    factory::enroll(db, outsider.id, other.id).await?;

    let repo = CourseRepository::new(db);
    let (loaded, students) = repo.get_with_students(course.id).await?.unwrap();

    assert_eq!(loaded.id, course.id);
    let student_ids: Vec<i32> = students.iter().map(|s| s.id).collect();
    assert_eq!(student_ids, vec![a.id, b.id]);

    Ok(())
}

/// Tests loading a course with no enrollments.
///
/// Expected: Ok(Some) with an empty student list
#[tokio::test]
async fn loads_course_without_students() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;

    let repo = CourseRepository::new(db);
    let (loaded, students) = repo.get_with_students(course.id).await?.unwrap();

    assert_eq!(loaded.id, course.id);
    assert!(students.is_empty());

    Ok(())
}
