pub mod card;
pub mod grade;
pub mod queue;
pub mod summary;
