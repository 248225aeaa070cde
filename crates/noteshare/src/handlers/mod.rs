pub mod collaborations;
pub mod error;
pub mod extractors;
pub mod health;
pub mod notes;
pub mod users;

pub use error::AppError;
pub use extractors::CurrentUser;
