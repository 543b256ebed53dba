use anyhow::{Context, Result};

/// Reads an integer override from the environment. A variable that is set but not a number is an error.
pub fn get_env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(v) => v
            .parse::<usize>()
            .map(Some)
            .with_context(|| format!("{} must be a valid number", key)),
        Err(_) => Ok(None),
    }
}
