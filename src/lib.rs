#![deny(missing_docs)]

//! A library for parsing and validating [bcrypt](https://en.wikipedia.org/wiki/Bcrypt)
//! hash strings in the
//! [modular crypt format](https://en.wikipedia.org/wiki/Crypt_(C)). A bcrypt verifier
//! stores everything it needs in one line of text, such as
//! `$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW`, and this crate
//! takes such a line apart: it checks the format strictly and exposes the version,
//! the work factor, and the salt-and-digest payload.
//!
//! This crate does not compute bcrypt digests and never touches a password. Pair it
//! with a crate that does, such as the
//! [bcrypt crate](https://docs.rs/bcrypt/latest/bcrypt/), when you need to hash or
//! verify; this crate alone is enough for jobs like auditing stored hashes for weak
//! work factors or validating input at an API boundary.
//!
//! # Usage
//!
//! To use bcrypt-mcf, add the following to your Cargo.toml:
//!
//! ```toml
//! [dependencies]
//! bcrypt-mcf = "0.4.1"
//! ```
//!
//! # Examples
//!
//! Check whether a stored string is a well-formed bcrypt hash:
//!
//! ```rust
//! use bcrypt_mcf::is_valid_hash;
//!
//! assert!(is_valid_hash("$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie"));
//! assert!(!is_valid_hash("hunter2"));
//! ```
//!
//! Split a hash string into its fields:
//!
//! ```rust
//! use bcrypt_mcf::McfHash;
//! use std::str::FromStr;
//!
//! let stored = "$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie";
//! let hash = McfHash::from_str(stored).unwrap();
//!
//! assert_eq!(hash.version(), "2b");
//! assert_eq!(hash.work_factor(), 4);
//! assert_eq!(hash.setting(), "$2b$04");
//! ```
//!
//! Read the work factor without splitting the string:
//!
//! ```rust
//! use bcrypt_mcf::work_factor;
//!
//! let stored = "$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie";
//!
//! assert_eq!(work_factor(stored).unwrap(), 4);
//! ```
//!
//! Find hashes that should be regenerated with a higher work factor:
//!
//! ```rust
//! use bcrypt_mcf::McfHash;
//! use std::str::FromStr;
//!
//! let stored = "$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie";
//! let hash = McfHash::from_str(stored).unwrap();
//!
//! assert!(hash.needs_rehash(12));
//! ```
//!
//! Recover the raw salt and digest bytes:
//!
//! ```rust
//! use bcrypt_mcf::McfHash;
//! use std::str::FromStr;
//!
//! let stored = "$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie";
//! let hash = McfHash::from_str(stored).unwrap();
//!
//! assert_eq!(hash.salt_bytes().unwrap().len(), 16);
//! assert_eq!(hash.digest_bytes().unwrap().len(), 23);
//! ```
//!
//! A parsed hash formats back into the exact string it came from:
//!
//! ```rust
//! use bcrypt_mcf::McfHash;
//! use std::str::FromStr;
//!
//! let stored = "$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie";
//!
//! assert_eq!(McfHash::from_str(stored).unwrap().to_string(), stored);
//! ```

mod error;
mod hash;
mod lexer;

pub use error::McfError;
pub use hash::{is_valid_hash, work_factor, McfHash};
