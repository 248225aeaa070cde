use uuid::Uuid;

/// Returns the cache key for a user's note listing.
pub fn user_notes_key(user_id: Uuid) -> String {
    format!("notes:{}", user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_notes_key() {
        let key = user_notes_key(Uuid::nil());
        assert_eq!(key, "notes:00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_user_notes_key_differs_per_user() {
        let a = user_notes_key(Uuid::new_v4());
        let b = user_notes_key(Uuid::new_v4());
        assert_ne!(a, b);
    }
}
