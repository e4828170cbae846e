pub mod lookup_repo;
pub mod project_repo;
pub mod user_repo;

pub use lookup_repo::LookupRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
