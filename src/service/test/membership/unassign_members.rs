use super::*;

/// Tests releasing a batch of members from their group.
///
/// Expected: Ok with both students unassigned
#[tokio::test]
async fn releases_whole_batch() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = to_group(factory::create_group(db).await?);
    let a = factory::create_student_in_group(db, group.id).await?;
    let b = factory::create_student_in_group(db, group.id).await?;

    let service = GroupMembershipService::new(db);
    let released = service.unassign_members(&group, &[a.id, b.id]).await?;

    assert_eq!(released.len(), 2);
    let repo = StudentRepository::new(db);
    assert_eq!(repo.get_by_id(a.id).await?.unwrap().group_id, None);
    assert_eq!(repo.get_by_id(b.id).await?.unwrap().group_id, None);

    Ok(())
}

/// Tests the all-or-nothing property of batch removal.
///
/// One candidate belongs to a different group, so the whole batch must fail
/// and the genuine member must keep its link.
///
/// Expected: Err(NotFound) naming the non-member id, nothing applied
#[tokio::test]
async fn non_member_fails_whole_batch() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = to_group(factory::create_group(db).await?);
    let other = factory::create_group(db).await?;
    let member = factory::create_student_in_group(db, group.id).await?;
    let outsider = factory::create_student_in_group(db, other.id).await?;

    let service = GroupMembershipService::new(db);
    let err = service
        .unassign_members(&group, &[member.id, outsider.id])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound { ref ids, .. } if *ids == vec![outsider.id]
    ));
    let repo = StudentRepository::new(db);
    assert_eq!(repo.get_by_id(member.id).await?.unwrap().group_id, Some(group.id));

    Ok(())
}
