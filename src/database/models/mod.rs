pub mod movie;
pub mod user;

pub use movie::{Director, Genre, Movie, NewMovie};
pub use user::{User, UserChanges};
