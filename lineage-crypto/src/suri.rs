//! Derivation path expressions.
//!
//! A path is one or more junctions followed by an optional password suffix:
//!
//! ```text
//! path     := junction+ ("///" password)?
//! junction := "//" segment    (hard)
//!           | "/" segment     (soft)
//! ```
//!
//! Segments are non-empty and never contain `/`. Parsing only checks that an
//! expression is well formed; whether a junction kind is supported is decided
//! at derivation time.

use std::fmt;

use lineage_types::constants::{MAX_DERIVATION_DEPTH, MAX_SURI_LEN};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::hash::blake3_kdf;

const PASSWORD_SEPARATOR: &str = "///";

/// Reasons a derivation path expression is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuriError {
    #[error("derivation path is empty")]
    Empty,

    #[error("derivation path must start with '/'")]
    MissingLeadingSlash,

    #[error("empty junction at byte {position}")]
    EmptySegment { position: usize },

    #[error("password suffix after '///' is empty")]
    EmptyPassword,

    #[error("derivation path too deep: {depth} > {max}")]
    TooDeep { depth: usize, max: usize },

    #[error("derivation path too long: {len} > {max} bytes")]
    TooLong { len: usize, max: usize },
}

/// One step of a derivation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Junction {
    Hard(String),
    Soft(String),
}

impl Junction {
    pub fn segment(&self) -> &str {
        match self {
            Junction::Hard(s) | Junction::Soft(s) => s,
        }
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, Junction::Hard(_))
    }

    /// 32-byte chain code mixed into the key at this step.
    ///
    /// Numeric segments and named segments use separate KDF contexts so `//1`
    /// and a name whose bytes happen to equal the index encoding never collide.
    pub fn chain_code(&self) -> [u8; 32] {
        let segment = self.segment();
        match segment.parse::<u64>() {
            Ok(index) => blake3_kdf("lineage-junction-index", &index.to_le_bytes()),
            Err(_) => blake3_kdf("lineage-junction-name", segment.as_bytes()),
        }
    }
}

impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Junction::Hard(s) => write!(f, "//{s}"),
            Junction::Soft(s) => write!(f, "/{s}"),
        }
    }
}

/// A parsed derivation path.
#[derive(Clone)]
pub struct DerivationPath {
    junctions: Vec<Junction>,
    password: Option<Zeroizing<String>>,
}

impl DerivationPath {
    pub fn parse(input: &str) -> Result<Self, SuriError> {
        if input.len() > MAX_SURI_LEN {
            return Err(SuriError::TooLong {
                len: input.len(),
                max: MAX_SURI_LEN,
            });
        }

        let (path_part, password) = match input.find(PASSWORD_SEPARATOR) {
            Some(idx) => {
                let pw = &input[idx + PASSWORD_SEPARATOR.len()..];
                if pw.is_empty() {
                    return Err(SuriError::EmptyPassword);
                }
                (&input[..idx], Some(Zeroizing::new(pw.to_string())))
            }
            None => (input, None),
        };

        if path_part.is_empty() {
            return Err(SuriError::Empty);
        }
        if !path_part.starts_with('/') {
            return Err(SuriError::MissingLeadingSlash);
        }

        let mut junctions = Vec::new();
        let mut rest = path_part;
        while !rest.is_empty() {
            let hard = rest.starts_with("//");
            let skip = if hard { 2 } else { 1 };
            let position = path_part.len() - rest.len() + skip;
            rest = &rest[skip..];

            let end = rest.find('/').unwrap_or(rest.len());
            let segment = &rest[..end];
            if segment.is_empty() {
                return Err(SuriError::EmptySegment { position });
            }
            junctions.push(if hard {
                Junction::Hard(segment.to_string())
            } else {
                Junction::Soft(segment.to_string())
            });
            rest = &rest[end..];
        }

        if junctions.len() > MAX_DERIVATION_DEPTH {
            return Err(SuriError::TooDeep {
                depth: junctions.len(),
                max: MAX_DERIVATION_DEPTH,
            });
        }

        Ok(Self {
            junctions,
            password,
        })
    }

    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().map(String::as_str)
    }

    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub fn is_fully_hard(&self) -> bool {
        self.junctions.iter().all(Junction::is_hard)
    }
}

/// Renders the junctions only; a password suffix is shown as `///***`.
impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for j in &self.junctions {
            write!(f, "{j}")?;
        }
        if self.password.is_some() {
            write!(f, "{PASSWORD_SEPARATOR}***")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivationPath({self})")
    }
}

impl PartialEq for DerivationPath {
    fn eq(&self, other: &Self) -> bool {
        self.junctions == other.junctions && self.password() == other.password()
    }
}

impl Eq for DerivationPath {}

impl std::str::FromStr for DerivationPath {
    type Err = SuriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Strip the password suffix from a path expression, if present.
///
/// Used before a path is persisted or displayed.
pub fn public_path(input: &str) -> &str {
    match input.find(PASSWORD_SEPARATOR) {
        Some(idx) => &input[..idx],
        None => input,
    }
}
