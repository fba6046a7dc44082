//! Data types shared by the structural hasher and the mutation classifier.

use serde::{Deserialize, Serialize};

/// How a [`Fingerprint`] was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintMethod {
    Ast,
    Raw,
}

/// A content fingerprint: `"<method>-sha256:<hex>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub hash: String,
    pub method: FingerprintMethod,
    pub node_count: usize,
}

impl Fingerprint {
    pub fn raw(hex: &str) -> Self {
        Self {
            hash: format!("raw-sha256:{hex}"),
            method: FingerprintMethod::Raw,
            node_count: 0,
        }
    }

    pub fn ast(hex: &str, node_count: usize) -> Self {
        Self {
            hash: format!("ast-sha256:{hex}"),
            method: FingerprintMethod::Ast,
            node_count,
        }
    }
}

/// One entry in a structural fingerprint's top-level declaration sequence.
/// Serialized to canonical JSON before hashing; field order here is the
/// serialized order and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintNode {
    pub type_tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_count: Option<usize>,
    pub exported: bool,
    pub children: Vec<String>,
}

/// The kind of top-level declaration an [`ExportSignature`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    Fn,
    Class,
    Interface,
    Type,
    Var,
    Ref,
    Default,
}

impl ExportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportKind::Fn => "fn",
            ExportKind::Class => "class",
            ExportKind::Interface => "interface",
            ExportKind::Type => "type",
            ExportKind::Var => "var",
            ExportKind::Ref => "ref",
            ExportKind::Default => "default",
        }
    }
}

/// An exported top-level declaration, the unit the mutation classifier diffs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSignature {
    pub kind: ExportKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_count: Option<usize>,
}

impl ExportSignature {
    /// The `(kind, name)` identity used to match a signature across versions.
    pub fn key(&self) -> (ExportKind, &str) {
        (self.kind, self.name.as_str())
    }

    /// `fn:<name>:<param_count>` for functions, `<kind>:<name>` otherwise.
    pub fn format(&self) -> String {
        match (self.kind, self.param_count) {
            (ExportKind::Fn, Some(count)) => format!("fn:{}:{}", self.name, count),
            _ => format!("{}:{}", self.kind.as_str(), self.name),
        }
    }
}
