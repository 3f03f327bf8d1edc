use super::MAX_GAME_ID_LENGTH;

/// Check that a game id is safe to use as a storage key and file name
///
/// Allowed: 1 to 64 ASCII letters, digits, `-` or `_`.
pub fn validate_game_id(game_id: &str) -> Result<&str, String> {
    if game_id.is_empty() {
        return Err("Game id cannot be empty".to_string());
    }

    if game_id.len() > MAX_GAME_ID_LENGTH {
        return Err(format!(
            "Game id must be {} characters or less",
            MAX_GAME_ID_LENGTH
        ));
    }

    if !game_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("Game id must contain only letters, numbers, '-' and '_'".to_string());
    }

    Ok(game_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_game_ids() {
        assert_eq!(validate_game_id("default"), Ok("default"));
        assert_eq!(validate_game_id("office-2026_B"), Ok("office-2026_B"));
    }

    #[test]
    fn test_empty_game_id() {
        assert!(validate_game_id("").is_err());
    }

    #[test]
    fn test_game_id_too_long() {
        let id = "a".repeat(MAX_GAME_ID_LENGTH + 1);
        assert!(validate_game_id(&id).is_err());
        assert!(validate_game_id(&id[..MAX_GAME_ID_LENGTH]).is_ok());
    }

    #[test]
    fn test_game_id_rejects_path_characters() {
        assert!(validate_game_id("../secret").is_err());
        assert!(validate_game_id("a/b").is_err());
        assert!(validate_game_id("a.json").is_err());
        assert!(validate_game_id("with space").is_err());
    }
}
