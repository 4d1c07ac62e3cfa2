//! Database entities.

pub mod movie;
pub mod petition;
pub mod review;
pub mod user;
pub mod vote;

pub use movie::Entity as Movie;
pub use petition::Entity as Petition;
pub use review::Entity as Review;
pub use user::Entity as User;
pub use vote::Entity as Vote;
