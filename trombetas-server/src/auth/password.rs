//! Administrator password (Argon2 PHC strings)

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::utils::AppError;

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// The single administrator credential
#[derive(Debug, Clone)]
pub enum AdminCredential {
    /// No password configured; login always fails with `LoginDisabled`
    Disabled,
    Hash(String),
}

impl AdminCredential {
    /// `ADMIN_PASSWORD_HASH` wins over `ADMIN_PASSWORD`, which is hashed here
    pub fn resolve(hash: Option<&str>, plain: Option<&str>) -> Result<Self, AppError> {
        if let Some(hash) = hash.filter(|h| !h.is_empty()) {
            PasswordHash::new(hash)
                .map_err(|e| AppError::config(format!("ADMIN_PASSWORD_HASH is not a PHC string: {e}")))?;
            return Ok(Self::Hash(hash.to_string()));
        }
        if let Some(plain) = plain.filter(|p| !p.is_empty()) {
            let hash = hash_password(plain)
                .map_err(|e| AppError::config(format!("Failed to hash ADMIN_PASSWORD: {e}")))?;
            return Ok(Self::Hash(hash));
        }
        Ok(Self::Disabled)
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Hash(_))
    }

    pub fn verify(&self, password: &str) -> bool {
        match self {
            Self::Disabled => false,
            Self::Hash(hash) => verify_password(password, hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("trombetas").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("trombetas", &hash));
        assert!(!verify_password("Trombetas", &hash));
        assert!(!verify_password("trombetas", "not-a-hash"));
    }

    #[test]
    fn test_resolve_prefers_hash() {
        let hash = hash_password("from-hash").unwrap();
        let cred = AdminCredential::resolve(Some(&hash), Some("from-plain")).unwrap();
        assert!(cred.verify("from-hash"));
        assert!(!cred.verify("from-plain"));
    }

    #[test]
    fn test_resolve_plain_and_disabled() {
        let cred = AdminCredential::resolve(None, Some("segredo")).unwrap();
        assert!(cred.is_enabled());
        assert!(cred.verify("segredo"));

        let cred = AdminCredential::resolve(Some(""), None).unwrap();
        assert!(!cred.is_enabled());
        assert!(!cred.verify(""));
    }

    #[test]
    fn test_resolve_rejects_malformed_hash() {
        assert!(AdminCredential::resolve(Some("plaintext"), None).is_err());
    }
}
