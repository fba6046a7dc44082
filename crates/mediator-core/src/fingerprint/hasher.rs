//! Structural (AST) and raw (byte) content fingerprinting.
//!
//! The structural hasher walks only the top-level declaration list of a
//! TypeScript/JavaScript source file and throws away position, range, and
//! comment information before hashing, so the resulting fingerprint is
//! unaffected by reformatting.

use sha2::{Digest, Sha256};
use std::path::Path;
use tree_sitter::{Node, Parser};

use super::types::{ExportKind, ExportSignature, Fingerprint, FingerprintNode};

const SUPPORTED_EXTENSIONS: &[&str] =
    &["ts", "tsx", "js", "jsx", "mts", "cts", "mjs", "cjs"];

/// True if `path`'s extension (case-folded) is one the structural hasher
/// understands.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn build_parser(path: &Path) -> Option<Parser> {
    let mut parser = Parser::new();
    let is_tsx = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("tsx") || e.eq_ignore_ascii_case("jsx"))
        .unwrap_or(false);

    let language = if is_tsx {
        tree_sitter_typescript::LANGUAGE_TSX
    } else {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT
    };
    parser.set_language(&language.into()).ok()?;
    Some(parser)
}

/// Compute the fingerprint for `content` found at `path`. Falls back to a
/// raw content hash when the extension is unsupported or parsing fails.
pub fn fingerprint(content: &str, path: &Path) -> Fingerprint {
    if is_supported(path)
        && let Some(nodes) = parse_declarations(content, path)
    {
        let canonical = serde_json::to_string(&nodes).unwrap_or_default();
        let hex = hex_sha256(canonical.as_bytes());
        return Fingerprint::ast(&hex, nodes.len());
    }
    Fingerprint::raw(&hex_sha256(content.as_bytes()))
}

/// Compute the raw content fingerprint regardless of extension. Used by the
/// optimistic lock guard, which only ever compares raw hashes.
pub fn raw_fingerprint(content: &str) -> Fingerprint {
    Fingerprint::raw(&hex_sha256(content.as_bytes()))
}

fn hex_sha256(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse `content` and project its top-level declarations into fingerprint
/// nodes. Returns `None` if the file cannot be parsed (parser unavailable or
/// syntax error at the root).
fn parse_declarations(content: &str, path: &Path) -> Option<Vec<FingerprintNode>> {
    let mut parser = build_parser(path)?;
    let tree = parser.parse(content, None)?;
    let root = tree.root_node();
    if root.has_error() {
        return None;
    }

    let bytes = content.as_bytes();
    let mut nodes = Vec::new();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if let Some(node) = project_statement(child, bytes, false) {
            nodes.push(node);
        }
    }
    Some(nodes)
}

fn text<'a>(node: Node, bytes: &'a [u8]) -> &'a str {
    node.utf8_text(bytes).unwrap_or("")
}

/// Project one top-level statement. Unwraps `export` wrappers, recursing once
/// with `exported = true`; everything else not in the recognized declaration
/// list is skipped (it contributes nothing to the fingerprint).
fn project_statement(node: Node, bytes: &[u8], exported: bool) -> Option<FingerprintNode> {
    match node.kind() {
        "export_statement" => project_export_statement(node, bytes),
        "function_declaration" | "generator_function_declaration" => {
            project_function(node, bytes, exported)
        }
        "class_declaration" => project_class(node, bytes, exported),
        "interface_declaration" => project_interface(node, bytes, exported),
        "type_alias_declaration" => Some(FingerprintNode {
            type_tag: "type-alias".to_string(),
            name: field_text(node, "name", bytes),
            param_count: None,
            exported,
            children: Vec::new(),
        }),
        "lexical_declaration" | "variable_declaration" => {
            project_variable(node, bytes, exported)
        }
        _ => None,
    }
}

fn project_export_statement(node: Node, bytes: &[u8]) -> Option<FingerprintNode> {
    if field_opt(node, "default").is_some() || has_child_kind(node, "default") {
        let declaration = node.child_by_field_name("declaration");
        let name = declaration
            .and_then(|d| field_text(d, "name", bytes))
            .or_else(|| declaration.map(|d| text(d, bytes).to_string()));
        return Some(FingerprintNode {
            type_tag: "export-default".to_string(),
            name,
            param_count: None,
            exported: true,
            children: Vec::new(),
        });
    }

    if let Some(declaration) = node.child_by_field_name("declaration") {
        return project_statement(declaration, bytes, true);
    }

    // `export { a, b as c }`: re-export specifier list, one node per name.
    if let Some(clause) = first_child_of_kind(node, "export_clause") {
        let mut cursor = clause.walk();
        let first_name = clause
            .children(&mut cursor)
            .find(|c| c.kind() == "export_specifier")
            .and_then(|spec| {
                spec.child_by_field_name("alias")
                    .or_else(|| spec.child_by_field_name("name"))
                    .map(|n| text(n, bytes).to_string())
            });
        return Some(FingerprintNode {
            type_tag: "export-ref".to_string(),
            name: first_name,
            param_count: None,
            exported: true,
            children: Vec::new(),
        });
    }

    None
}

fn project_function(node: Node, bytes: &[u8], exported: bool) -> Option<FingerprintNode> {
    let name = field_text(node, "name", bytes);
    let param_count = node
        .child_by_field_name("parameters")
        .map(|params| named_child_count(params));
    let children = body_child_tags(node, bytes);
    Some(FingerprintNode {
        type_tag: "fn".to_string(),
        name,
        param_count,
        exported,
        children,
    })
}

fn project_class(node: Node, bytes: &[u8], exported: bool) -> Option<FingerprintNode> {
    let name = field_text(node, "name", bytes);
    let children = node
        .child_by_field_name("body")
        .map(|body| {
            let mut cursor = body.walk();
            body.children(&mut cursor)
                .map(|c| c.kind().to_string())
                .collect()
        })
        .unwrap_or_default();
    Some(FingerprintNode {
        type_tag: "class".to_string(),
        name,
        param_count: None,
        exported,
        children,
    })
}

fn project_interface(node: Node, bytes: &[u8], exported: bool) -> Option<FingerprintNode> {
    let name = field_text(node, "name", bytes);
    let children = node
        .child_by_field_name("body")
        .map(|body| {
            let mut cursor = body.walk();
            body.children(&mut cursor)
                .map(|c| c.kind().to_string())
                .collect()
        })
        .unwrap_or_default();
    Some(FingerprintNode {
        type_tag: "interface".to_string(),
        name,
        param_count: None,
        exported,
        children,
    })
}

fn project_variable(node: Node, bytes: &[u8], exported: bool) -> Option<FingerprintNode> {
    let mut cursor = node.walk();
    let declarator = node
        .children(&mut cursor)
        .find(|c| c.kind() == "variable_declarator")?;
    let name = field_text(declarator, "name", bytes);
    let init_tag = declarator
        .child_by_field_name("value")
        .map(|v| v.kind().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    Some(FingerprintNode {
        type_tag: "var".to_string(),
        name,
        param_count: None,
        exported,
        children: vec![init_tag],
    })
}

fn body_child_tags(node: Node, bytes: &[u8]) -> Vec<String> {
    let _ = bytes;
    node.child_by_field_name("body")
        .map(|body| {
            let mut cursor = body.walk();
            body.children(&mut cursor)
                .map(|c| c.kind().to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn field_text(node: Node, field: &str, bytes: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| text(n, bytes).to_string())
}

fn field_opt<'a>(node: Node<'a>, field: &str) -> Option<Node<'a>> {
    node.child_by_field_name(field)
}

fn has_child_kind(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == kind)
}

fn first_child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

fn named_child_count(node: Node) -> usize {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).count()
}

/// Extract export signatures for the mutation classifier. Shares the parse
/// path with [`fingerprint`]; returns an empty sequence for unsupported or
/// unparseable content.
pub fn extract_exports(content: &str, path: &Path) -> Vec<ExportSignature> {
    let Some(nodes) = (if is_supported(path) {
        parse_declarations(content, path)
    } else {
        None
    }) else {
        return Vec::new();
    };

    nodes
        .into_iter()
        .filter(|node| node.exported)
        .filter_map(|node| {
            let kind = match node.type_tag.as_str() {
                "fn" => ExportKind::Fn,
                "class" => ExportKind::Class,
                "interface" => ExportKind::Interface,
                "type-alias" => ExportKind::Type,
                "var" => ExportKind::Var,
                "export-ref" => ExportKind::Ref,
                "export-default" => ExportKind::Default,
                _ => return None,
            };
            let name = node.name.unwrap_or_else(|| "default".to_string());
            Some(ExportSignature {
                kind,
                name,
                param_count: node.param_count,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ts(name: &str) -> PathBuf {
        PathBuf::from(name)
    }

    #[test]
    fn unsupported_extension_falls_back_to_raw() {
        let fp = fingerprint("hello world", &ts("notes.txt"));
        assert!(fp.hash.starts_with("raw-sha256:"));
        assert_eq!(fp.node_count, 0);
    }

    #[test]
    fn reformatting_does_not_change_ast_fingerprint() {
        let a = "export function f(a) {\n  return a;\n}\n";
        let b = "export function f(a)   {\n\n\n    return a;\n}\n\n";
        let fp_a = fingerprint(a, &ts("a.ts"));
        let fp_b = fingerprint(b, &ts("a.ts"));
        assert_eq!(fp_a, fp_b);
    }

    #[test]
    fn arity_change_is_visible_in_export_signature() {
        let before = extract_exports("export function f(a) {}", &ts("a.ts"));
        let after = extract_exports("export function f(a, b) {}", &ts("a.ts"));
        assert_eq!(before[0].param_count, Some(1));
        assert_eq!(after[0].param_count, Some(2));
    }

    #[test]
    fn non_exported_declarations_are_excluded_from_exports() {
        let exports = extract_exports("function helper() {}", &ts("a.ts"));
        assert!(exports.is_empty());
    }

    #[test]
    fn malformed_source_falls_back_to_raw() {
        let fp = fingerprint("export function f(", &ts("a.ts"));
        assert!(fp.hash.starts_with("raw-sha256:"));
    }
}
