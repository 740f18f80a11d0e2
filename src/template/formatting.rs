//! Colour codes and template node joining.
//!
//! Templates use `&` as the colour escape (`&6`, `&l`, `&#ffaa00`); the
//! rendered form uses the `§` section sign that clients understand.

use tracing::warn;

use crate::config::ConfigSection;

/// Section sign used by rendered colour codes.
pub const COLOR_CHAR: char = '§';

/// Escape character used in templates.
pub const ALT_COLOR_CHAR: char = '&';

fn is_code(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r' | 'x')
}

/// Translate `&` colour codes and `&#RRGGBB` hex colours into `§` codes.
pub fn colorize(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 16);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != ALT_COLOR_CHAR || i + 1 >= chars.len() {
            out.push(c);
            i += 1;
            continue;
        }

        let next = chars[i + 1];
        if next == '#' && i + 8 <= chars.len() && chars[i + 2..i + 8].iter().all(char::is_ascii_hexdigit) {
            out.push(COLOR_CHAR);
            out.push('x');
            for digit in &chars[i + 2..i + 8] {
                out.push(COLOR_CHAR);
                out.push(*digit);
            }
            i += 8;
        } else if is_code(next) {
            out.push(COLOR_CHAR);
            out.push(next.to_ascii_lowercase());
            i += 2;
        } else {
            out.push(c);
            i += 1;
        }
    }

    out
}

/// Remove rendered `§` colour codes.
pub fn strip_colors(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == COLOR_CHAR {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_hexdigit() || is_code(next) {
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }

    out
}

/// Colourise then strip, leaving plain text.
pub fn colorize_and_strip(input: &str) -> String {
    strip_colors(&colorize(input))
}

/// Join several template nodes of `section` with single spaces.
///
/// A missing node is replaced by `Error <document>.<node>` so broken
/// configuration shows up in the output instead of failing the render.
pub fn join_nodes<S: AsRef<str>>(section: &ConfigSection, nodes: &[S]) -> String {
    let parts: Vec<String> = nodes
        .iter()
        .map(|node| {
            let node = node.as_ref();
            section.get_string(node).unwrap_or_else(|| {
                let qualified = section.qualified(node);
                warn!("Missing template node {}", qualified);
                format!("Error {}", qualified)
            })
        })
        .collect();
    colorize(&parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_document;

    #[test]
    fn test_colorize_codes() {
        assert_eq!(colorize("&6Gold &lBold&r"), "§6Gold §lBold§r");
        assert_eq!(colorize("&A upper"), "§a upper");
    }

    #[test]
    fn test_colorize_leaves_plain_ampersands() {
        assert_eq!(colorize("Tom & Jerry &z"), "Tom & Jerry &z");
        assert_eq!(colorize("trailing &"), "trailing &");
    }

    #[test]
    fn test_colorize_hex() {
        assert_eq!(colorize("&#FFaa00hi"), "§x§F§F§a§a§0§0hi");
        assert_eq!(colorize("&#12345"), "&#12345");
    }

    #[test]
    fn test_strip_colors() {
        assert_eq!(strip_colors("§6Gold §lBold"), "Gold Bold");
        assert_eq!(colorize_and_strip("&#FFaa00&lHi"), "Hi");
    }

    #[test]
    fn test_join_nodes_with_missing_node() {
        let doc = parse_document("messages", "messages:\n  a: \"&6one\"\n  b: two\n").unwrap();
        let section = doc.section("messages").unwrap();

        assert_eq!(join_nodes(&section, &["a", "b"]), "§6one two");
        assert_eq!(
            join_nodes(&section, &["a", "gone"]),
            "§6one Error messages.messages.gone"
        );
    }
}
