use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

pub fn hash_pin(pin: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(pin.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash PIN: {}", e))?;
    Ok(hash.to_string())
}

/// False for a wrong PIN and for an unparsable stored hash.
pub fn verify_pin(pin: &str, pin_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(pin_hash) {
        Ok(hash) => hash,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(pin.as_bytes(), &parsed_hash)
        .is_ok()
}
