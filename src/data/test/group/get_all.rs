use super::*;

/// Tests listing all groups without loading members.
///
/// Expected: Ok with every group in ascending id order
#[tokio::test]
async fn lists_groups_in_id_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_group(db).await?;
    let second = factory::create_group(db).await?;
    factory::create_student_in_group(db, first.id).await?;

    let repository = GroupRepository::new(db);
    let groups = repository.get_all().await?;

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].id, first.id);
    assert_eq!(groups[1].id, second.id);
    assert_eq!(groups[0].name, first.name);

    Ok(())
}

/// Tests listing groups from an empty table.
///
/// Expected: Ok with an empty list
#[tokio::test]
async fn empty_table_yields_no_groups() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_university_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repository = GroupRepository::new(db);

    assert!(repository.get_all().await?.is_empty());

    Ok(())
}
