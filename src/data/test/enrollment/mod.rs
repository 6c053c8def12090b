use crate::data::enrollment::EnrollmentRepository;
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;
use test_utils::factory;

mod delete_many;
