use super::*;
use crate::data::enrollment::EnrollmentRepository;

/// Tests deleting a course with enrollments.
///
/// Verifies that the course row and its junction rows disappear while the
/// student rows survive.
///
/// Expected: Ok with the course gone and the student left without courses
#[tokio::test]
async fn removes_course_and_enrollment_edges() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let student = factory::create_student(db).await?;
    factory::enroll(db, student.id, course.id).await?;

    let repo = CourseRepository::new(db);
    repo.delete(course.id).await?;

    assert!(repo.get_by_id(course.id).await?.is_none());
    let edges = EnrollmentRepository::new(db);
    assert!(edges.course_ids_for_student(student.id).await?.is_empty());

    Ok(())
}

/// Tests that deleting one course leaves other enrollments alone.
///
/// Expected: Ok with the student still enrolled in the other course
#[tokio::test]
async fn leaves_other_courses_enrolled() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let victim = factory::create_course(db).await?;
    let survivor = factory::create_course(db).await?;
    let student = factory::create_student(db).await?;
    factory::enroll(db, student.id, victim.id).await?;
    factory::enroll(db, student.id, survivor.id).await?;

    CourseRepository::new(db).delete(victim.id).await?;

    let edges = EnrollmentRepository::new(db);
    assert_eq!(edges.course_ids_for_student(student.id).await?, vec![survivor.id]);

    Ok(())
}
