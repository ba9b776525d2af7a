use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Crockford base32 alphabet, lowercase (no i, l, o, u).
pub const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

/// Output task identifier: 8 Crockford base32 characters encoding 40 random bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(String);

impl TaskId {
    pub const LEN: usize = 8;
    const RANDOM_BYTES: usize = 5;

    /// Generate from an explicit random source, which fills the 5-byte buffer it is handed.
    pub fn generate_with<F>(mut fill_random: F) -> std::result::Result<Self, TaskIdGenerationError>
    where
        F: FnMut(&mut [u8]) -> std::result::Result<(), TaskIdGenerationError>,
    {
        let mut bytes = [0_u8; Self::RANDOM_BYTES];
        fill_random(&mut bytes)?;

        let mut padded = [0_u8; std::mem::size_of::<u64>()];
        padded[3..].copy_from_slice(&bytes);
        Ok(Self::encode(u64::from_be_bytes(padded)))
    }

    /// Most significant 5-bit chunk first.
    fn encode(bits: u64) -> Self {
        let encoded = (0..Self::LEN)
            .rev()
            .map(|chunk| ALPHABET[((bits >> (chunk * 5)) & 0x1f) as usize] as char)
            .collect();
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate_and_normalize(value: &str) -> Result<String, TaskIdParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TaskIdParseError::Empty);
        }
        if trimmed.len() != Self::LEN {
            return Err(TaskIdParseError::InvalidLength(trimmed.len()));
        }

        let normalized = trimmed.to_ascii_lowercase();
        if !normalized.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(TaskIdParseError::InvalidCharacter);
        }

        Ok(normalized)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = TaskIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Self::validate_and_normalize(s)?))
    }
}

impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TaskIdVisitor;

        impl serde::de::Visitor<'_> for TaskIdVisitor {
            type Value = TaskId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an 8-character crockford base32 task id")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TaskIdVisitor)
    }
}

/// Random source backed by the OS CSPRNG.
pub fn os_random(bytes: &mut [u8]) -> std::result::Result<(), TaskIdGenerationError> {
    getrandom::fill(bytes).map_err(TaskIdGenerationError::random_source)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskIdGenerationError {
    RandomSource(String),
}

impl TaskIdGenerationError {
    fn random_source(error: impl fmt::Display) -> Self {
        Self::RandomSource(error.to_string())
    }
}

impl fmt::Display for TaskIdGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RandomSource(message) => write!(f, "task id generation failed: {message}"),
        }
    }
}

impl std::error::Error for TaskIdGenerationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskIdParseError {
    Empty,
    InvalidLength(usize),
    InvalidCharacter,
}

impl fmt::Display for TaskIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "task id cannot be empty"),
            Self::InvalidLength(actual) => write!(
                f,
                "task id must be exactly {} characters (got {})",
                TaskId::LEN,
                actual
            ),
            Self::InvalidCharacter => {
                write!(f, "task id must contain only crockford base32 characters")
            }
        }
    }
}

impl std::error::Error for TaskIdParseError {}
