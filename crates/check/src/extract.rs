//! Declaration Extractor: source text in, declared symbol names out.
//!
//! Lines are scanned independently. A declaration split across lines is
//! invisible, and a line the pattern does not match contributes nothing.

use crate::model::{Declaration, SourceText, SymbolSet};
use crate::pattern::DeclarationPattern;

/// Source name used when extracting from a bare string.
pub const INLINE_SOURCE: &str = "<input>";

/// Extract the symbols declared in `source_text`.
pub fn extract(source_text: &str, pattern: &DeclarationPattern) -> SymbolSet {
    let mut set = SymbolSet::new();
    scan_into(&mut set, INLINE_SOURCE, source_text, pattern);
    set
}

/// Extract from several sources, in the given order, into one set.
pub fn extract_sources(sources: &[SourceText], pattern: &DeclarationPattern) -> SymbolSet {
    let mut set = SymbolSet::new();
    for source in sources {
        let added = scan_into(&mut set, &source.name, &source.text, pattern);
        log::debug!(
            "{}: {} new declaration(s) in {}",
            pattern.label(),
            added,
            source.name
        );
    }
    set
}

fn scan_into(set: &mut SymbolSet, source: &str, text: &str, pattern: &DeclarationPattern) -> usize {
    // A UTF-8 BOM would otherwise hide a first-line declaration from anchored patterns
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut added = 0;
    for (idx, line) in text.lines().enumerate() {
        let Some(name) = pattern.match_line(line) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let fresh = set.insert(Declaration {
            name: name.to_string(),
            source: source.to_string(),
            line: idx + 1,
        });
        if fresh {
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native() -> DeclarationPattern {
        DeclarationPattern::from_regex("native", r#"^pub extern "C" fn (\w+)\("#).unwrap()
    }

    #[test]
    fn extracts_in_line_order() {
        let src = "pub extern \"C\" fn foo() {}\n// nothing here\npub extern \"C\" fn bar(x: u8) {}\n";
        let set = extract(src, &native());
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["foo", "bar"]);
        assert_eq!(set.get("bar").unwrap().line, 3);
        assert_eq!(set.get("bar").unwrap().source, INLINE_SOURCE);
    }

    #[test]
    fn duplicate_declarations_collapse() {
        let src = "pub extern \"C\" fn qux() {}\npub extern \"C\" fn qux() {}\n";
        let set = extract(src, &native());
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("qux").unwrap().line, 1);
    }

    #[test]
    fn partial_declaration_contributes_nothing() {
        let src = "pub extern \"C\" fn (x: u8) {}\npub extern \"C\" fn\n";
        assert!(extract(src, &native()).is_empty());
    }

    #[test]
    fn split_declaration_is_invisible() {
        let src = "pub extern \"C\"\nfn split() {}\n";
        assert!(extract(src, &native()).is_empty());
    }

    #[test]
    fn empty_and_garbage_input() {
        assert!(extract("", &native()).is_empty());
        assert!(extract("\u{0}\u{1}}}{{ ))((\n\n\r\n", &native()).is_empty());
    }

    #[test]
    fn leading_bom_is_ignored() {
        let src = "\u{feff}pub extern \"C\" fn foo() {}\npub extern \"C\" fn bar() {}\n";
        let set = extract(src, &native());
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["foo", "bar"]);
        assert_eq!(set.get("foo").unwrap().line, 1);
    }

    #[test]
    fn crlf_line_endings() {
        let src = "pub extern \"C\" fn foo() {}\r\npub extern \"C\" fn bar() {}\r\n";
        assert_eq!(extract(src, &native()).len(), 2);
    }

    #[test]
    fn multi_source_keeps_first_site() {
        let sources = vec![
            SourceText::new("a.rs", "pub extern \"C\" fn foo() {}\n"),
            SourceText::new("b.rs", "\npub extern \"C\" fn foo() {}\npub extern \"C\" fn bar() {}\n"),
        ];
        let set = extract_sources(&sources, &native());
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["foo", "bar"]);
        assert_eq!(set.get("foo").unwrap().source, "a.rs");
        assert_eq!(set.get("bar").unwrap().source, "b.rs");
        assert_eq!(set.get("bar").unwrap().line, 3);
    }
}
