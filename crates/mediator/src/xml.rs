//! Renders the `<intent_context>` handshake document the Context Injector
//! returns in place of actually running `select_active_intent`.

use mediator_core::intent::Intent;

/// XML-escape the five reserved characters in `text`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Build the `<intent_context>` document for a just-selected intent.
pub fn intent_context(intent: &Intent) -> String {
    let mut scope = String::new();
    for path in &intent.owned_scope {
        scope.push_str(&format!("<path>{}</path>", escape(path)));
    }

    let mut constraints = String::new();
    for rule in &intent.constraints {
        constraints.push_str(&format!("<rule>{}</rule>", escape(rule)));
    }

    let mut criteria = String::new();
    for criterion in &intent.acceptance_criteria {
        criteria.push_str(&format!("<criterion>{}</criterion>", escape(criterion)));
    }

    let instructions = "Work only within the listed owned scope. Declare read_hash on writes to \
         existing files using the raw-sha256 fingerprint of the content you read.";

    format!(
        "<intent_context>\n  \
         <id>{}</id><name>{}</name><status>{}</status>\n  \
         <owned_scope>{scope}</owned_scope>\n  \
         <constraints>{constraints}</constraints>\n  \
         <acceptance_criteria>{criteria}</acceptance_criteria>\n  \
         <instructions>{}</instructions>\n\
         </intent_context>",
        escape(&intent.id),
        escape(&intent.name),
        intent.status,
        escape(&instructions),
    )
}
