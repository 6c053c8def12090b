use super::*;

/// Tests deleting an empty group.
///
/// Expected: Ok with the group gone
#[tokio::test]
async fn deletes_empty_group() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;

    let service = GroupService::new(db);
    service.delete(group.id).await?;

    assert!(GroupRepository::new(db).get_by_id(group.id).await?.is_none());

    Ok(())
}

/// Tests the non-empty conflict.
///
/// A group with members cannot be deleted; the error reports how many
/// members remain and the group survives.
///
/// Expected: Err(GroupNotEmpty) with the group still present
#[tokio::test]
async fn rejects_group_with_members() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;
    factory::create_student_in_group(db, group.id).await?;
    factory::create_student_in_group(db, group.id).await?;

    let service = GroupService::new(db);
    let err = service.delete(group.id).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::GroupNotEmpty { student_count: 2, .. }
    ));
    assert!(GroupRepository::new(db).get_by_id(group.id).await?.is_some());

    Ok(())
}

/// Tests that releasing the members first unblocks the delete.
///
/// Expected: Ok after the group is emptied
#[tokio::test]
async fn succeeds_after_members_released() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;
    let member = factory::create_student_in_group(db, group.id).await?;

    StudentRepository::new(db).set_group(member.id, None).await?;

    let service = GroupService::new(db);
    service.delete(group.id).await?;

    assert!(GroupRepository::new(db).get_by_id(group.id).await?.is_none());

    Ok(())
}

/// Tests deleting an unknown group.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn unknown_group_is_not_found() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = GroupService::new(db);
    let err = service.delete(4242).await.unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));

    Ok(())
}
