// utils/password.rs
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::Rng;

use crate::error::ErrorMessage;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

const MAX_PASSWORD_LENGTH: usize = 64;
const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

// Key is the UTF-8 secret copied into a 16 byte buffer, zero padded.
fn cipher_key(secret: &str) -> [u8; 16] {
    let mut key = [0u8; 16];
    let bytes = secret.as_bytes();
    let len = bytes.len().min(key.len());
    key[..len].copy_from_slice(&bytes[..len]);
    key
}

/// Encrypts a password with AES-128-CBC and a zero IV, base64 encoded.
/// The zero IV keeps ciphertexts deterministic so logins can match on
/// plain equality against the stored column.
pub fn encrypt(password: impl Into<String>, secret: &str) -> Result<String, ErrorMessage> {
    let password = password.into();

    if password.is_empty() {
        return Err(ErrorMessage::EmptyPassword);
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ErrorMessage::ExceededMaxPasswordLength(MAX_PASSWORD_LENGTH));
    }

    let iv = [0u8; 16];
    let ciphertext = Aes128CbcEnc::new(&cipher_key(secret).into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(password.as_bytes());

    Ok(BASE64.encode(ciphertext))
}

pub fn decrypt(encrypted: impl Into<String>, secret: &str) -> Result<String, ErrorMessage> {
    let ciphertext = BASE64
        .decode(encrypted.into())
        .map_err(|_| ErrorMessage::InvalidCiphertext)?;

    let iv = [0u8; 16];
    let plaintext = Aes128CbcDec::new(&cipher_key(secret).into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| ErrorMessage::InvalidCiphertext)?;

    String::from_utf8(plaintext).map_err(|_| ErrorMessage::InvalidCiphertext)
}

/// Checks complexity rules and returns every failure message, empty when
/// the password passes.
pub fn validate_password(password: &str, username: Option<&str>) -> Vec<String> {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long.".to_string());
    } else if password.len() > MAX_PASSWORD_LENGTH {
        errors.push("Password must not exceed 64 characters.".to_string());
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        errors.push("Password must contain at least one uppercase letter.".to_string());
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        errors.push("Password must contain at least one lowercase letter.".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number.".to_string());
    }

    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        errors.push(format!(
            "Password must contain at least one special character ({}).",
            SPECIAL_CHARS
        ));
    }

    if let Some(username) = username {
        if !username.is_empty() && password.eq_ignore_ascii_case(username) {
            errors.push("Password cannot be the same as the username.".to_string());
        }

        if username.len() >= 3
            && password.to_lowercase().contains(&username.to_lowercase())
        {
            errors.push("Password cannot contain the username.".to_string());
        }
    }

    if contains_weak_pattern(password) {
        errors.push(
            "Password contains common weak patterns. Please choose a more secure password."
                .to_string(),
        );
    }

    errors
}

fn contains_weak_pattern(password: &str) -> bool {
    let lowered = password.to_lowercase();

    // The regex crate has no backreferences, so scan for 4+ repeats by hand.
    let mut run = 1;
    let mut prev: Option<char> = None;
    for c in lowered.chars() {
        if prev == Some(c) {
            run += 1;
            if run >= 4 {
                return true;
            }
        } else {
            run = 1;
            prev = Some(c);
        }
    }

    const WEAK_SEQUENCES: [&str; 6] =
        ["123456", "abcdef", "qwerty", "password", "admin", "login"];

    WEAK_SEQUENCES.iter().any(|weak| lowered.contains(weak))
}

/// Suggests a password with at least one character from each category,
/// shuffled in place. Length is clamped to 8..=64.
pub fn generate_strong_password(length: usize) -> String {
    const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    const NUMBERS: &[u8] = b"0123456789";
    const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

    let length = length.clamp(8, MAX_PASSWORD_LENGTH);
    let all_chars: Vec<u8> = [UPPERCASE, LOWERCASE, NUMBERS, SYMBOLS].concat();

    let mut rng = rand::rng();
    let mut password = vec![
        UPPERCASE[rng.random_range(0..UPPERCASE.len())],
        LOWERCASE[rng.random_range(0..LOWERCASE.len())],
        NUMBERS[rng.random_range(0..NUMBERS.len())],
        SYMBOLS[rng.random_range(0..SYMBOLS.len())],
    ];

    while password.len() < length {
        password.push(all_chars[rng.random_range(0..all_chars.len())]);
    }

    for i in 0..password.len() {
        let j = rng.random_range(i..password.len());
        password.swap(i, j);
    }

    String::from_utf8(password).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "NexDeskSecretKey123";

    #[test]
    fn encrypt_is_deterministic() {
        let first = encrypt("admin123", SECRET).unwrap();
        let second = encrypt("admin123", SECRET).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn encrypt_then_decrypt_round_trips() {
        let ciphertext = encrypt("S3cure!Pass", SECRET).unwrap();

        assert_ne!(ciphertext, "S3cure!Pass");
        assert_eq!(decrypt(ciphertext, SECRET).unwrap(), "S3cure!Pass");
    }

    #[test]
    fn encrypt_rejects_empty_password() {
        let result = encrypt("", SECRET);

        assert!(matches!(result, Err(ErrorMessage::EmptyPassword)));
    }

    #[test]
    fn encrypt_rejects_overlong_password() {
        let password = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let result = encrypt(password, SECRET);

        assert!(matches!(
            result,
            Err(ErrorMessage::ExceededMaxPasswordLength(MAX_PASSWORD_LENGTH))
        ));
    }

    #[test]
    fn decrypt_rejects_invalid_base64() {
        let result = decrypt("not base64!", SECRET);

        assert!(matches!(result, Err(ErrorMessage::InvalidCiphertext)));
    }

    #[test]
    fn short_secrets_are_zero_padded() {
        let ciphertext = encrypt("S3cure!Pass", "tiny").unwrap();

        assert_eq!(decrypt(ciphertext, "tiny").unwrap(), "S3cure!Pass");
    }

    #[test]
    fn strong_password_passes_validation() {
        let errors = validate_password("Xk9#mQ2$vL", None);

        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn weak_password_collects_every_failure() {
        let errors = validate_password("abc", None);

        assert!(errors.contains(&"Password must be at least 8 characters long.".to_string()));
        assert!(errors
            .contains(&"Password must contain at least one uppercase letter.".to_string()));
        assert!(errors.contains(&"Password must contain at least one number.".to_string()));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn password_matching_username_is_rejected() {
        let errors = validate_password("Johndoe1!", Some("johndoe1!"));

        assert!(errors.contains(&"Password cannot be the same as the username.".to_string()));
    }

    #[test]
    fn password_containing_username_is_rejected() {
        let errors = validate_password("Xk9#bob$vL", Some("bob"));

        assert!(errors.contains(&"Password cannot contain the username.".to_string()));
    }

    #[test]
    fn repeated_characters_are_a_weak_pattern() {
        assert!(contains_weak_pattern("Xaaaa9#$"));
        assert!(!contains_weak_pattern("Xaaa9#$b"));
    }

    #[test]
    fn common_sequences_are_weak_patterns() {
        assert!(contains_weak_pattern("Qwerty9#$"));
        assert!(contains_weak_pattern("X123456#$"));
        assert!(contains_weak_pattern("MyPassword9#"));
    }

    #[test]
    fn generated_password_is_strong() {
        let password = generate_strong_password(12);

        assert_eq!(password.len(), 12);
        assert!(validate_password(&password, None).is_empty());
    }

    #[test]
    fn generated_password_length_is_clamped() {
        assert_eq!(generate_strong_password(2).len(), 8);
        assert_eq!(generate_strong_password(500).len(), MAX_PASSWORD_LENGTH);
    }
}
