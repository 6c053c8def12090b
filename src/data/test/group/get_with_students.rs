use super::*;

/// Tests loading a group with its derived member list.
///
/// Verifies that every student pointing at the group appears, ordered by id,
/// and students of other groups do not.
///
/// Expected: Ok(Some) with both members in ascending id order
#[tokio::test]
async fn loads_members_in_id_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;
    let other = factory::create_group(db).await?;
    let a = factory::create_student_in_group(db, group.id).await?;
    let b = factory::create_student_in_group(db, group.id).await?;
    factory::create_student_in_group(db, other.id).await?;

    let repo = GroupRepository::new(db);
    let (loaded, students) = repo.get_with_students(group.id).await?.unwrap();

    assert_eq!(loaded.id, group.id);
    let member_ids: Vec<i32> = students.iter().map(|s| s.id).collect();
    assert_eq!(member_ids, vec![a.id, b.id]);

    Ok(())
}

/// Tests loading a group with no members.
///
/// Expected: Ok(Some) with an empty student list
#[tokio::test]
async fn loads_empty_group() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let group = factory::create_group(db).await?;

    let repo = GroupRepository::new(db);
    let (loaded, students) = repo.get_with_students(group.id).await?.unwrap();

    assert_eq!(loaded.id, group.id);
    assert!(students.is_empty());

    Ok(())
}

/// Tests listing all groups with members.
///
/// Expected: Ok with both groups and their own member lists
#[tokio::test]
async fn lists_all_groups_with_members() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let full = factory::create_group(db).await?;
    let empty = factory::create_group(db).await?;
    let member = factory::create_student_in_group(db, full.id).await?;

    let repo = GroupRepository::new(db);
    let rows = repo.get_all_with_students().await?;

    assert_eq!(rows.len(), 2);
    let (_, full_members) = rows.iter().find(|(g, _)| g.id == full.id).unwrap();
    let (_, empty_members) = rows.iter().find(|(g, _)| g.id == empty.id).unwrap();
    assert_eq!(full_members.len(), 1);
    assert_eq!(full_members[0].id, member.id);
    assert!(empty_members.is_empty());

    Ok(())
}
