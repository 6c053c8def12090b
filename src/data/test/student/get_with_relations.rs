use super::*;

/// Tests loading a student with both relation sides populated.
///
/// Verifies that the group link and the enrolled courses come back together,
/// with courses ordered by id.
///
/// Expected: Ok(Some) with the group and both courses in ascending id order
#[tokio::test]
async fn loads_group_and_courses() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;
    let student = factory::create_student_in_group(db, group.id).await?;
    let math = factory::create_course(db).await?;
    let physics = factory::create_course(db).await?;
    factory::enroll(db, student.id, physics.id).await?;
    factory::enroll(db, student.id, math.id).await?;

    let repo = StudentRepository::new(db);
    let (loaded, loaded_group, courses) =
        repo.get_with_relations(student.id).await?.unwrap();

    assert_eq!(loaded.id, student.id);
    assert_eq!(loaded_group.unwrap().id, group.id);
    let course_ids: Vec<i32> = courses.iter().map(|c| c.id).collect();
    assert_eq!(course_ids, vec![math.id, physics.id]);

    Ok(())
}

/// Tests loading a student with no associations at all.
///
/// Expected: Ok(Some) with no group and an empty course list
#[tokio::test]
async fn loads_unassigned_student_without_courses() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::create_student(db).await?;

    let repo = StudentRepository::new(db);
    let (loaded, group, courses) = repo.get_with_relations(student.id).await?.unwrap();

    assert_eq!(loaded.id, student.id);
    assert!(group.is_none());
    assert!(courses.is_empty());

    Ok(())
}

/// Tests the unknown-id case.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = StudentRepository::new(db);
    let result = repo.get_with_relations(4242).await?;

    assert!(result.is_none());

    Ok(())
}
