use super::*;

/// Tests the full membership replacement.
///
/// The group starts with two members; the put keeps one, drops one, and
/// pulls in a previously unassigned student. The member list must match the
/// request exactly and the dropped member must be released.
///
/// Expected: Ok with exactly the requested members
#[tokio::test]
async fn replaces_member_list_exactly() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;
    let kept = factory::create_student_in_group(db, group.id).await?;
    let dropped = factory::create_student_in_group(db, group.id).await?;
    let added = factory::create_student(db).await?;

    let service = GroupService::new(db);
    let detail = service
        .put(
            group.id,
            &GroupRequest {
                name: Some("TT-31".to_string()),
                student_ids: Some(vec![kept.id, added.id]),
            },
        )
        .await?;

    assert_eq!(detail.name, "TT-31");
    let member_ids: Vec<i32> = detail.students.iter().map(|s| s.id).collect();
    assert_eq!(member_ids, vec![kept.id, added.id]);
    let stored = StudentRepository::new(db).get_by_id(dropped.id).await?.unwrap();
    assert_eq!(stored.group_id, None);

    Ok(())
}

/// Tests that a member of another group still fails the replacement.
///
/// Only current members and unassigned students are eligible; the clear step
/// applies to this group alone, so a foreign member stays ineligible and the
/// whole call rolls back.
///
/// Expected: Err(NotFound) with both groups unchanged
#[tokio::test]
async fn foreign_member_fails_replacement() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;
    let other = factory::create_group(db).await?;
    let member = factory::create_student_in_group(db, group.id).await?;
    let foreign = factory::create_student_in_group(db, other.id).await?;

    let service = GroupService::new(db);
    let err = service
        .put(
            group.id,
            &GroupRequest {
                name: Some(group.name.clone()),
                student_ids: Some(vec![foreign.id]),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    let repo = StudentRepository::new(db);
    assert_eq!(repo.get_by_id(member.id).await?.unwrap().group_id, Some(group.id));
    assert_eq!(repo.get_by_id(foreign.id).await?.unwrap().group_id, Some(other.id));

    Ok(())
}

/// Tests that an empty member list empties the group.
///
/// Expected: Ok with every former member released
#[tokio::test]
async fn empty_list_releases_all_members() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;
    let member = factory::create_student_in_group(db, group.id).await?;

    let service = GroupService::new(db);
    let detail = service
        .put(
            group.id,
            &GroupRequest {
                name: Some(group.name.clone()),
                student_ids: Some(vec![]),
            },
        )
        .await?;

    assert!(detail.students.is_empty());
    let stored = StudentRepository::new(db).get_by_id(member.id).await?.unwrap();
    assert_eq!(stored.group_id, None);

    Ok(())
}

/// Tests the completeness check.
///
/// Expected: Err(Validation)
#[tokio::test]
async fn incomplete_request_is_rejected() -> Result<(), DomainError> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;

    let service = GroupService::new(db);
    let err = service
        .put(
            group.id,
            &GroupRequest {
                name: Some("Only".to_string()),
                student_ids: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));

    Ok(())
}
