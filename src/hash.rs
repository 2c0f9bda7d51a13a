use crate::error::McfError;
use crate::lexer;

use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::{alphabet, Engine};
use std::fmt;
use std::str::FromStr;

// The bcrypt flavor of radix-64: its own alphabet ordering and no padding.
// Decoding must not insist on canonical trailing bits, because format
// validation only checks alphabet membership.
const BCRYPT_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::BCRYPT,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

// A 16-byte salt occupies the first 22 characters of the payload; the digest
// takes the rest.
const ENCODED_SALT_LEN: usize = 22;

/// A stored bcrypt hash string split into its component fields.
///
/// Bcrypt persists everything a verifier needs in one line of text:
///
/// ```text
/// $2b$12$<22 salt characters><31 digest characters>
/// ```
///
/// * `2b` is the version: the literal `2`, plus a revision letter (`a`, `b`,
///   `x`, or `y`) on everything but the oldest hashes.
/// * `12` is the work factor: exactly two decimal digits.
/// * The payload packs the salt and digest in bcrypt's own radix-64 alphabet
///   (`.`, `/`, `0-9`, `A-Z`, `a-z`).
///
/// Parsing checks the whole string strictly (length, prefix, delimiters, digit
/// cost, payload alphabet) and fails with [`McfError::InvalidHash`] on any
/// deviation. A parsed value is an immutable snapshot of the input and can be
/// formatted back into the exact original string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct McfHash {
    setting: String,
    version: String,
    work_factor: String,
    hash: String,
}

impl FromStr for McfHash {
    type Err = McfError;

    /// Splits a stored bcrypt hash string into its fields.
    ///
    /// The string must pass every format check; no partially parsed value is
    /// ever produced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match lexer::scan(s) {
            Some(f) => f,
            None => return Err(McfError::InvalidHash),
        };

        Ok(Self {
            setting: s[..format.setting_len].to_string(),
            version: s[1..1 + format.version_len].to_string(),
            work_factor: s[format.work_factor_offset..format.work_factor_offset + 2].to_string(),
            hash: s[format.hash_offset..].to_string(),
        })
    }
}

impl fmt::Display for McfHash {
    /// Reassembles the exact hash string the value was parsed from.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}${}", self.setting, self.hash)
    }
}

impl McfHash {
    /// The non-secret setting prefix: `$`, the version, `$`, and the two cost
    /// digits (`$2b$12` for a new-format hash, `$2$12` for an old-format one).
    /// The delimiter that follows the cost digits is not part of the setting.
    pub fn setting(&self) -> &str {
        &self.setting
    }

    /// The version field: `"2"` for the oldest hashes, otherwise `"2"` followed
    /// by the revision letter (`"2a"`, `"2b"`, `"2x"`, `"2y"`).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The two cost digits exactly as they appear in the string, e.g. `"04"`.
    pub fn work_factor_str(&self) -> &str {
        &self.work_factor
    }

    /// The work factor as an integer.
    ///
    /// Two decimal digits, so always within `0..=99`. Whether a given cost is
    /// acceptable is the calling library's policy; this crate only reads it.
    pub fn work_factor(&self) -> u32 {
        two_digit_value(self.work_factor.as_bytes())
    }

    /// The salt-and-digest payload: every character after the last `$`.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Decodes the salt characters at the front of the payload into the raw
    /// bytes a key derivation consumes. A well-formed payload carries a 16-byte
    /// salt in its first 22 characters.
    pub fn salt_bytes(&self) -> Result<Vec<u8>, McfError> {
        match BCRYPT_B64.decode(&self.hash[..ENCODED_SALT_LEN]) {
            Ok(salt) => Ok(salt),
            Err(_) => Err(McfError::InvalidHash),
        }
    }

    /// Decodes the digest characters that follow the salt into raw bytes. A
    /// well-formed payload carries a 23-byte digest after the salt.
    pub fn digest_bytes(&self) -> Result<Vec<u8>, McfError> {
        match BCRYPT_B64.decode(&self.hash[ENCODED_SALT_LEN..]) {
            Ok(digest) => Ok(digest),
            Err(_) => Err(McfError::InvalidHash),
        }
    }

    /// Reports whether this hash was generated with a work factor below
    /// `min_work_factor` and should therefore be regenerated the next time the
    /// password is available in plain text.
    pub fn needs_rehash(&self, min_work_factor: u32) -> bool {
        self.work_factor() < min_work_factor
    }
}

/// Reports whether `hash` is a well-formed bcrypt hash string.
///
/// Equivalent to `hash.parse::<McfHash>().is_ok()` without constructing the
/// parsed value.
pub fn is_valid_hash(hash: &str) -> bool {
    lexer::scan(hash).is_some()
}

/// Reads the work factor out of a stored hash string without splitting it into
/// its fields.
///
/// Fails with [`McfError::InvalidHash`] if `hash` is not a well-formed bcrypt
/// hash string.
pub fn work_factor(hash: &str) -> Result<u32, McfError> {
    let format = match lexer::scan(hash) {
        Some(f) => f,
        None => return Err(McfError::InvalidHash),
    };

    Ok(two_digit_value(&hash.as_bytes()[format.work_factor_offset..]))
}

fn two_digit_value(digits: &[u8]) -> u32 {
    10 * u32::from(digits[0] - b'0') + u32::from(digits[1] - b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    // A real stored hash in the new 2b format at cost 04.
    const KNOWN_HASH: &str = "$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie";
    const KNOWN_SALT: &str = "EGdrhbKUv8Oc9vGiXX0HQO";
    const KNOWN_DIGEST: &str = "xSg445d458Muh7DAHskb6QbtCvdxcie";

    // 53 characters, all from the bcrypt alphabet.
    const PAYLOAD: &str = "abcdefghijklmnopqrstuvABCDEFGHIJKLMNOPQRSTUVWXYZ01234";

    #[test]
    fn test_parse_new_format() {
        let hash = McfHash::from_str(KNOWN_HASH).unwrap();

        assert_eq!(hash.setting(), "$2b$04");
        assert_eq!(hash.version(), "2b");
        assert_eq!(hash.work_factor_str(), "04");
        assert_eq!(hash.work_factor(), 4);
        assert_eq!(hash.hash(), format!("{KNOWN_SALT}{KNOWN_DIGEST}"));
    }

    #[test]
    fn test_parse_old_format() {
        let hash = McfHash::from_str(&format!("$2$10${PAYLOAD}")).unwrap();

        assert_eq!(hash.setting(), "$2$10");
        assert_eq!(hash.version(), "2");
        assert_eq!(hash.work_factor_str(), "10");
        assert_eq!(hash.work_factor(), 10);
        assert_eq!(hash.hash(), PAYLOAD);
    }

    #[test]
    fn test_parse_accepts_every_revision_letter() {
        for (letter, expected) in [("a", "2a"), ("b", "2b"), ("x", "2x"), ("y", "2y")] {
            let hash = McfHash::from_str(&format!("$2{letter}$10${PAYLOAD}")).unwrap();
            assert_eq!(hash.version(), expected);
        }
    }

    #[test]
    fn test_rejects_wrong_lengths() {
        assert!(McfHash::from_str("").is_err());
        assert!(McfHash::from_str("$2b$04$").is_err());
        assert!(McfHash::from_str(&KNOWN_HASH[..58]).is_err());
        assert!(McfHash::from_str(&format!("{KNOWN_HASH}e")).is_err());
        assert!(McfHash::from_str(&format!("{KNOWN_HASH}{KNOWN_HASH}")).is_err());
    }

    #[test]
    fn test_rejects_wrong_prefix() {
        assert!(McfHash::from_str(&format!("x2b$04${PAYLOAD}")).is_err());
        assert!(McfHash::from_str(&format!("$3b$04${PAYLOAD}")).is_err());
        assert!(McfHash::from_str(&format!("2b$04$a{PAYLOAD}")).is_err());
    }

    #[test]
    fn test_unknown_version_letter_rejected() {
        // 'c' is not a revision letter, so the only thing this position could
        // legally hold is the '$' of an old-format string. Same for an
        // uppercase letter.
        assert!(McfHash::from_str(&format!("$2c$04${PAYLOAD}")).is_err());
        assert!(McfHash::from_str(&format!("$2A$04${PAYLOAD}")).is_err());
    }

    #[test]
    fn test_rejects_non_digit_cost() {
        assert!(McfHash::from_str(&format!("$2b$1a${PAYLOAD}")).is_err());
        assert!(McfHash::from_str(&format!("$2b$a1${PAYLOAD}")).is_err());
        assert!(McfHash::from_str(&format!("$2b$  ${PAYLOAD}")).is_err());
    }

    #[test]
    fn test_cost_range_is_not_policed() {
        let low = McfHash::from_str(&format!("$2b$00${PAYLOAD}")).unwrap();
        assert_eq!(low.work_factor(), 0);

        let high = McfHash::from_str(&format!("$2b$99${PAYLOAD}")).unwrap();
        assert_eq!(high.work_factor(), 99);
    }

    #[test]
    fn test_rejects_corrupt_payload() {
        for bad in ["+", "_", " ", "$", "="] {
            let mut corrupted = KNOWN_HASH.to_string();
            corrupted.replace_range(30..31, bad);

            assert!(
                McfHash::from_str(&corrupted).is_err(),
                "accepted a payload containing {bad:?}"
            );
        }
    }

    #[test]
    fn test_rejects_non_ascii() {
        // 60 bytes once encoded, but the payload holds a two-byte character.
        let hash = format!("$2b$04${}é", &PAYLOAD[..51]);

        assert_eq!(hash.len(), 60);
        assert!(!is_valid_hash(&hash));
    }

    #[test]
    fn test_work_factor_of_string() {
        assert_eq!(work_factor(&format!("$2b$12${PAYLOAD}")).unwrap(), 12);
        assert_eq!(work_factor(&format!("$2$08${PAYLOAD}")).unwrap(), 8);
        assert_eq!(work_factor(KNOWN_HASH).unwrap(), 4);
        assert!(work_factor("not a hash").is_err());
    }

    #[test]
    fn test_is_valid_hash() {
        assert!(is_valid_hash(KNOWN_HASH));
        assert!(is_valid_hash(&format!("$2$10${PAYLOAD}")));
        assert!(!is_valid_hash(""));
        assert!(!is_valid_hash("hunter2"));
        assert!(!is_valid_hash(
            "$argon2id$v=19$m=128,t=2,p=1$VnZ3ZFNhZkc$djHLRc+4K/DqQL0f8DMAQQ"
        ));
    }

    #[test]
    fn test_reparse_yields_identical_value() {
        let first = McfHash::from_str(KNOWN_HASH).unwrap();
        let second = McfHash::from_str(KNOWN_HASH).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_display_round_trips() {
        let hash = McfHash::from_str(KNOWN_HASH).unwrap();
        assert_eq!(hash.to_string(), KNOWN_HASH);

        let old = format!("$2$10${PAYLOAD}");
        assert_eq!(McfHash::from_str(&old).unwrap().to_string(), old);
    }

    #[test]
    fn test_salt_and_digest_bytes() {
        let hash = McfHash::from_str(KNOWN_HASH).unwrap();

        let salt = hash.salt_bytes().unwrap();
        assert_eq!(salt.len(), 16);
        assert_eq!(BCRYPT_B64.encode(&salt), KNOWN_SALT);

        let digest = hash.digest_bytes().unwrap();
        assert_eq!(digest.len(), 23);
        assert_eq!(BCRYPT_B64.encode(&digest), KNOWN_DIGEST);
    }

    #[test]
    fn test_needs_rehash() {
        let hash = McfHash::from_str(KNOWN_HASH).unwrap();
        assert!(hash.needs_rehash(10));
        assert!(!hash.needs_rehash(4));

        let strong = McfHash::from_str(&format!("$2b$12${PAYLOAD}")).unwrap();
        assert!(!strong.needs_rehash(10));
    }

    #[test]
    fn test_version_and_length_not_cross_checked() {
        // The version width and the total length are checked independently, so
        // a 59-byte string may carry a two-letter version and a 60-byte string
        // a bare one.
        let short_new = format!("$2a$10${}", &PAYLOAD[..52]);
        assert_eq!(short_new.len(), 59);
        assert!(is_valid_hash(&short_new));
        assert_eq!(McfHash::from_str(&short_new).unwrap().hash().len(), 52);

        let long_old = format!("$2$10${PAYLOAD}4");
        assert_eq!(long_old.len(), 60);
        assert!(is_valid_hash(&long_old));
    }
}
