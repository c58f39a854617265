//! Prompt construction and defensive reply parsing for LLM-assisted
//! selection.
//!
//! The model is asked to name exactly one candidate. Replies are parsed
//! defensively: anything that does not resolve to a candidate name is a
//! parse failure, and the caller falls back to the algorithmic strategy
//! rather than erroring.

use crate::registry::NodeInfo;

/// Format the selection prompt listing candidates and the input text.
pub(crate) fn build_selection_prompt(input_text: &str, candidates: &[NodeInfo]) -> String {
    let mut prompt = String::from(
        "You are routing a request to the single best-matching workflow node.\n\
         Candidates:\n",
    );
    for info in candidates {
        if info.description.is_empty() {
            prompt.push_str(&format!("- {}\n", info.name));
        } else {
            prompt.push_str(&format!("- {}: {}\n", info.name, info.description));
        }
    }
    prompt.push_str("\nRequest:\n");
    prompt.push_str(input_text);
    prompt.push_str("\n\nReply with exactly one candidate name from the list and nothing else.\n");
    prompt
}

/// Resolve a model reply to a canonical candidate name, if possible.
///
/// Only the first non-empty line is considered, with surrounding quotes,
/// backticks, and trailing punctuation stripped. The remainder must match
/// a candidate name exactly (case-insensitively); the canonical name from
/// the registry is returned, never the model's own spelling.
pub(crate) fn parse_selection_reply(reply: &str, candidates: &[NodeInfo]) -> Option<String> {
    let line = reply.lines().map(str::trim).find(|l| !l.is_empty())?;
    let cleaned = line
        .trim_start_matches(['-', '*', ' '])
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`'))
        .trim_end_matches(['.', '!'])
        .trim();

    candidates
        .iter()
        .find(|info| info.name.eq_ignore_ascii_case(cleaned))
        .map(|info| info.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<NodeInfo> {
        vec![
            NodeInfo {
                name: "Billing".to_string(),
                agent_type: "specialist".to_string(),
                description: "Refunds and invoices".to_string(),
                keywords: Vec::new(),
            },
            NodeInfo {
                name: "Support".to_string(),
                agent_type: "specialist".to_string(),
                description: String::new(),
                keywords: Vec::new(),
            },
        ]
    }

    #[test]
    fn prompt_lists_every_candidate() {
        let prompt = build_selection_prompt("charged twice", &candidates());
        assert!(prompt.contains("- Billing: Refunds and invoices"));
        assert!(prompt.contains("- Support"));
        assert!(prompt.contains("charged twice"));
    }

    #[test]
    fn parses_quoted_and_cased_replies() {
        let c = candidates();
        assert_eq!(parse_selection_reply("\"billing\"", &c).as_deref(), Some("Billing"));
        assert_eq!(parse_selection_reply("  Support.\n", &c).as_deref(), Some("Support"));
        assert_eq!(parse_selection_reply("`Billing`", &c).as_deref(), Some("Billing"));
    }

    #[test]
    fn rejects_anything_that_is_not_a_candidate() {
        let c = candidates();
        assert!(parse_selection_reply("The best match is Billing", &c).is_none());
        assert!(parse_selection_reply("Refunds", &c).is_none());
        assert!(parse_selection_reply("", &c).is_none());
    }
}
