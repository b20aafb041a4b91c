pub mod completion;
pub mod movie;
pub mod ratings;

pub use completion::{ChatRequest, ChatResponse, CompletionOptions};
pub use movie::{CandidateMovie, MovieDetails, MoviePage, MIN_VOTE_AVERAGE};
pub use ratings::{ExternalRatings, OmdbResponse, RatingsLookup};
