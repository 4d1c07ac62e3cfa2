//! Database repositories.

mod movie;
mod petition;
mod review;
mod user;
mod vote;

pub use movie::MovieRepository;
pub use petition::PetitionRepository;
pub use review::ReviewRepository;
pub use user::UserRepository;
pub use vote::VoteRepository;
