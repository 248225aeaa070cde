mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::user_notes_key;
pub use serialization::{
    deserialize_notes, serialize_notes, Result as SerializationResult, SerializationError,
};
pub use traits::Cache;
