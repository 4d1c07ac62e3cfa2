//! Business logic services.

#![allow(missing_docs)]

pub mod catalog;
pub mod petition;
pub mod review;
pub mod user;
pub mod vote;

pub use catalog::{CatalogService, CreateMovieInput, MovieDetail, UpdateMovieInput};
pub use petition::{CreatePetitionInput, PetitionService, PetitionWithVotes};
pub use review::ReviewService;
pub use user::{CreateUserInput, UserService};
pub use vote::{VoteOutcome, VoteService};
