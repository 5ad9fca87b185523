//! Password hashing. bcrypt at cost 12, run on the blocking pool so
//! handlers never stall a worker thread.

use anyhow::{Context, Result};

const BCRYPT_COST: u32 = 12;

/// Hash a password for storage. The raw password is consumed and never logged.
///
/// # Errors
/// Returns an error if hashing fails or the blocking task is cancelled.
pub async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .context("password hashing task failed")?
        .context("failed to hash password")
}

/// Check a password against a stored hash.
///
/// # Errors
/// Returns an error if the stored hash is malformed or the task is cancelled.
pub async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("password verification task failed")?
        .context("failed to verify password")
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt at cost 12 is slow by design; a single round trip keeps the
    // test suite tolerable while still covering both directions.
    #[tokio::test]
    async fn hash_then_verify_round_trip() -> Result<()> {
        let hash = hash_password("abcdef12".to_string()).await?;
        assert!(hash.starts_with("$2"));
        assert!(verify_password("abcdef12".to_string(), hash.clone()).await?);
        assert!(!verify_password("wrong-pass1".to_string(), hash).await?);
        Ok(())
    }

    #[tokio::test]
    async fn verify_rejects_malformed_hash() {
        let result = verify_password("abcdef12".to_string(), "not-a-hash".to_string()).await;
        assert!(result.is_err());
    }
}
