pub use sea_orm_migration::prelude::*;

mod m20260810_000001_create_group_table;
mod m20260810_000002_create_student_table;
mod m20260810_000003_create_course_table;
mod m20260810_000004_create_student_course_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_000001_create_group_table::Migration),
            Box::new(m20260810_000002_create_student_table::Migration),
            Box::new(m20260810_000003_create_course_table::Migration),
            Box::new(m20260810_000004_create_student_course_table::Migration),
        ]
    }
}
