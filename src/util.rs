use tree_sitter::Node;

/// Extract UTF-8 text from a tree-sitter node, returning `""` on failure.
pub fn txt<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

/// Strip surrounding quotes (`'`, `"`, `` ` ``) from a string literal.
pub fn trim_quotes(s: &str) -> &str {
    s.trim_matches(|c: char| c == '\'' || c == '"' || c == '`')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_quotes_strips_single_and_double() {
        assert_eq!(trim_quotes("'./Button'"), "./Button");
        assert_eq!(trim_quotes("\"@/hooks\""), "@/hooks");
    }

    #[test]
    fn trim_quotes_leaves_bare_strings() {
        assert_eq!(trim_quotes("./Button"), "./Button");
    }
}
