use super::*;
use test_utils::factory::student::StudentFactory;

/// Tests fetching one student with relations.
///
/// Expected: Ok with the group and course loaded
#[tokio::test]
async fn fetches_student_with_relations() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;
    let course = factory::create_course(db).await?;
    let student = factory::create_student_in_group(db, group.id).await?;
    factory::enroll(db, student.id, course.id).await?;

    let service = StudentService::new(db);
    let detail = service.fetch_one(student.id).await?;

    assert_eq!(detail.id, student.id);
    assert_eq!(detail.group.unwrap().id, group.id);
    assert_eq!(detail.courses.len(), 1);

    Ok(())
}

/// Tests fetching an unknown student.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn unknown_student_is_not_found() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = StudentService::new(db);
    let err = service.fetch_one(4242).await.unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));

    Ok(())
}

/// Tests listing all students.
///
/// Expected: Ok with both students and their own relation sets
#[tokio::test]
async fn lists_all_students() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;
    let assigned = factory::create_student_in_group(db, group.id).await?;
    let free = factory::create_student(db).await?;

    let service = StudentService::new(db);
    let details = service.fetch_all().await?;

    assert_eq!(details.len(), 2);
    let assigned_detail = details.iter().find(|d| d.id == assigned.id).unwrap();
    let free_detail = details.iter().find(|d| d.id == free.id).unwrap();
    assert_eq!(assigned_detail.group.as_ref().unwrap().id, group.id);
    assert!(free_detail.group.is_none());

    Ok(())
}

/// Tests the name lookup.
///
/// Expected: Ok(Some) for the match, Ok(None) otherwise
#[tokio::test]
async fn finds_student_by_name() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let student = StudentFactory::new(db)
        .first_name("Ada")
        .last_name("Lovelace")
        .build()
        .await?;

    let service = StudentService::new(db);

    let found = service.fetch_by_name("Ada", "Lovelace").await?.unwrap();
    assert_eq!(found.id, student.id);
    assert!(service.fetch_by_name("No", "Body").await?.is_none());

    Ok(())
}
