pub mod connection;

mod colleges;
mod students;
mod users;

pub use colleges::CollegeRepository;
pub use students::StudentRepository;
pub use users::UserRepository;

use async_trait::async_trait;

use crate::domain::college::College;
use crate::domain::error::Result;
use crate::domain::student::Student;

/// Store operations the batch pipeline needs for students: unique-key
/// lookup, single insert, and the one batched roster append per batch.
/// Each row performs its own lookup followed by its own insert, so a
/// lookup always observes rows committed earlier in the same batch.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn find_by_unique_keys(
        &self,
        email: &str,
        roll_number: &str,
    ) -> Result<Option<Student>>;

    async fn insert(&self, student: &Student) -> Result<()>;

    /// Append all of a batch's new student ids to the coordinator's roster
    /// in one write.
    async fn append_roster(&self, faculty_id: &str, student_ids: &[String]) -> Result<()>;
}

/// Store operations for colleges.
#[async_trait]
pub trait CollegeStore: Send + Sync {
    async fn find_by_unique_keys(&self, email: &str, code: &str) -> Result<Option<College>>;

    async fn insert(&self, college: &College) -> Result<()>;
}
