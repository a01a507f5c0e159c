//! Types for per-file transfer descriptors.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// A coerced boolean list element.
///
/// The upstream job description encodes per-replica flags as the literal
/// tokens `True`/`False`/`None`/`NULL`; anything else is kept verbatim so an
/// unexpected value stays inspectable instead of being swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    True,
    False,
    Null,
    /// Unrecognized token, passed through unchanged.
    Raw(String),
}

impl FlagValue {
    /// Coerce a raw list token.
    pub fn parse(token: &str) -> Self {
        match token {
            "True" => FlagValue::True,
            "False" => FlagValue::False,
            "None" | "NULL" => FlagValue::Null,
            other => FlagValue::Raw(other.to_string()),
        }
    }

    /// The boolean this flag resolves to, when it resolves to one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::True => Some(true),
            FlagValue::False => Some(false),
            _ => None,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, FlagValue::True)
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::True => write!(f, "True"),
            FlagValue::False => write!(f, "False"),
            FlagValue::Null => write!(f, "None"),
            FlagValue::Raw(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for FlagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlagValue::True => serializer.serialize_bool(true),
            FlagValue::False => serializer.serialize_bool(false),
            FlagValue::Null => serializer.serialize_none(),
            FlagValue::Raw(s) => serializer.serialize_str(s),
        }
    }
}

/// A status code as it appears in the status report: file outcomes carry
/// integer codes, an extracted global error code is the matched digit string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatusCode {
    Int(i64),
    Text(String),
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Int(n) => write!(f, "{}", n),
            StatusCode::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Transfer direction discriminator stamped on every descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Input,
    Output,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Input => "input",
            FileType::Output => "output",
        }
    }
}

/// One per-file transfer descriptor.
///
/// Identity and policy fields are populated by the descriptor builder; the
/// outcome fields stay `None` until the transfer backend fills them in during
/// the dispatch call.
#[derive(Debug, Clone, Serialize)]
pub struct FileSpec {
    pub filetype: FileType,
    pub scope: String,
    pub lfn: String,
    pub guid: String,
    /// Expected size in bytes, `None` when the input token was unparseable.
    pub filesize: Option<u64>,
    pub checksum: String,
    pub allow_lan: FlagValue,
    pub allow_wan: FlagValue,
    pub direct_access_lan: FlagValue,
    pub direct_access_wan: FlagValue,
    pub is_tar: FlagValue,
    pub accessmode: String,
    pub storage_token: String,
    /// Working directory shared by every descriptor in the invocation.
    pub workdir: PathBuf,
    // outcome, written by the transfer backend
    pub status: Option<String>,
    pub status_code: Option<StatusCode>,
    pub turl: Option<String>,
}
