//! Mutation classification: did a write change the exported API surface?

use std::collections::HashMap;
use std::path::Path;
use serde::{Deserialize, Serialize};

use super::hasher::extract_exports;
use super::types::{ExportKind, ExportSignature};

/// The outcome of comparing a file's exported surface before and after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationClass {
    AstRefactor,
    IntentEvolution,
    Unknown,
}

/// Full classifier output: the class, a human-readable reason, and the
/// signature-level diff that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub mutation_class: MutationClass,
    pub reason: String,
    pub added: Vec<ExportSignature>,
    pub removed: Vec<ExportSignature>,
    pub changed: Vec<String>,
}

/// Compare `old_content` and `new_content` at `path` and classify the mutation.
pub fn classify(old_content: &str, new_content: &str, path: &Path) -> Classification {
    let old_exports = extract_exports(old_content, path);
    let new_exports = extract_exports(new_content, path);

    if old_exports.is_empty() && new_exports.is_empty() {
        return Classification {
            mutation_class: MutationClass::Unknown,
            reason: "non-source or parse failure".to_string(),
            added: Vec::new(),
            removed: Vec::new(),
            changed: Vec::new(),
        };
    }

    let old_map: HashMap<(ExportKind, &str), &ExportSignature> =
        old_exports.iter().map(|sig| (sig.key(), sig)).collect();
    let new_map: HashMap<(ExportKind, &str), &ExportSignature> =
        new_exports.iter().map(|sig| (sig.key(), sig)).collect();

    let added: Vec<ExportSignature> = new_exports
        .iter()
        .filter(|sig| !old_map.contains_key(&sig.key()))
        .cloned()
        .collect();

    let removed: Vec<ExportSignature> = old_exports
        .iter()
        .filter(|sig| !new_map.contains_key(&sig.key()))
        .cloned()
        .collect();

    let mut changed = Vec::new();
    for (key, old_sig) in &old_map {
        if let Some(new_sig) = new_map.get(key) {
            let differs = old_sig.kind != new_sig.kind
                || (old_sig.kind == ExportKind::Fn && old_sig.param_count != new_sig.param_count);
            if differs {
                changed.push(format!("{} → {}", old_sig.format(), new_sig.format()));
            }
        }
    }

    if added.is_empty() && removed.is_empty() && changed.is_empty() {
        return Classification {
            mutation_class: MutationClass::AstRefactor,
            reason: "Exported API surface unchanged, internal refactor only".to_string(),
            added,
            removed,
            changed,
        };
    }

    let reason = format!(
        "Exported API surface changed: {} added, {} removed, {} changed",
        added.len(),
        removed.len(),
        changed.len()
    );

    Classification {
        mutation_class: MutationClass::IntentEvolution,
        reason,
        added,
        removed,
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ts(name: &str) -> PathBuf {
        PathBuf::from(name)
    }

    #[test]
    fn reformat_only_is_ast_refactor() {
        let old = "export function f(a) { return a; }";
        let new = "export function f(a) {\n  return a;\n}\n";
        let result = classify(old, new, &ts("a.ts"));
        assert_eq!(result.mutation_class, MutationClass::AstRefactor);
    }

    #[test]
    fn arity_change_is_intent_evolution() {
        let old = "export function f(a) {}";
        let new = "export function f(a, b) {}";
        let result = classify(old, new, &ts("a.ts"));
        assert_eq!(result.mutation_class, MutationClass::IntentEvolution);
        assert_eq!(result.changed, vec!["fn:f:1 → fn:f:2".to_string()]);
    }

    #[test]
    fn new_export_is_added() {
        let old = "export function f() {}";
        let new = "export function f() {}\nexport function g() {}";
        let result = classify(old, new, &ts("a.ts"));
        assert_eq!(result.mutation_class, MutationClass::IntentEvolution);
        assert_eq!(result.added.len(), 1);
        assert_eq!(result.added[0].name, "g");
    }

    #[test]
    fn non_source_content_is_unknown() {
        let result = classify("plain text", "more plain text", &ts("notes.txt"));
        assert_eq!(result.mutation_class, MutationClass::Unknown);
    }
}
