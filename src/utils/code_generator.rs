//! Random short code generation.

use rand::Rng;

/// Alphabet for generated codes: 26 uppercase, 26 lowercase, 10 digits.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Codes that collide with system routes and can never be handed out.
pub const RESERVED_CODES: &[&str] = &["api", "health", "healthz"];

/// Generates a random code of `length` characters.
///
/// Each character is drawn uniformly from [`CODE_ALPHABET`] using the
/// thread-local CSPRNG.
///
/// # Examples
///
/// ```
/// use tinylink::utils::code_generator::generate_code;
///
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if `code` is reserved for a system route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
