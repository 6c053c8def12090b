use crate::data::enrollment::EnrollmentRepository;
use crate::error::DomainError;
use crate::service::enrollment::CourseEnrollmentService;
use test_utils::builder::TestBuilder;
use test_utils::factory;

mod replace;
