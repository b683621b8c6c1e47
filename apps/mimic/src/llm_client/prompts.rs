// Shared prompt constants and prompt-building utilities.
// Each component defines its own templates in generation/prompts.rs.
// This file contains cross-cutting fragments and the template filler.

/// Persona line opening every style-mimicking prompt.
pub const MIMIC_PERSONA: &str =
    "You are an AI Bot that is very good at mimicking an author writing style.";

/// Fills `{name}` placeholders in a single pass over the template.
///
/// Substituted values are never rescanned, so a post that happens to contain
/// `{subject}` is interpolated verbatim. Unknown placeholders are left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_every_occurrence() {
        let filled = fill_template("{a} and {b} then {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(filled, "x and y then x");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let filled = fill_template(
            "posts: {posts}\nsubject: {subject}",
            &[("posts", "I love {subject} placeholders"), ("subject", "tea")],
        );
        assert_eq!(filled, "posts: I love {subject} placeholders\nsubject: tea");
    }

    #[test]
    fn test_fill_template_leaves_unknown_and_unclosed_braces() {
        let filled = fill_template("{unknown} {a} {open", &[("a", "1")]);
        assert_eq!(filled, "{unknown} 1 {open");
    }

    #[test]
    fn test_fill_template_handles_multibyte_text() {
        let filled = fill_template("→ {a} ←", &[("a", "café ☕")]);
        assert_eq!(filled, "→ café ☕ ←");
    }
}
