use crate::data::course::CourseRepository;
use crate::model::course::CourseScalarUpdate;
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;
use test_utils::factory;

mod delete;
mod get_with_students;
