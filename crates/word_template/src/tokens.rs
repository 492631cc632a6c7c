//! Template variable tokens
//!
//! A variable is written in the document text as `${name}`. Word frequently
//! splits what the author typed into several runs (spell checking, revision
//! ids, formatting changes), so the raw XML may look like
//! `${</w:t></w:r><w:proofErr w:type="spellStart"/><w:r><w:t>name</w:t></w:r>...}`.
//! [`repair`] glues such fragments back together before anything else looks
//! at the text.

use regex_lite::{Captures, Regex};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Opening delimiter of a variable
pub const TAG_START: &str = "${";
/// Closing delimiter of a variable
pub const TAG_END: &str = "}";
/// Markup inserted after each line break of a substituted value
pub const LINE_BREAK: &str = "<w:br/>";

/// A `$`, anything up to the first `{`, then anything but another `{` up to
/// the first `}`
static BROKEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[^{]*\{[^{}]*\}").expect("broken tag pattern is valid"));

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^{}]*)\}").expect("variable pattern is valid"));

/// Reassemble variables that were split across several runs.
///
/// Every span from a `$` to the first `}` following a `{` has its markup
/// removed. A second `{` before that `}` leaves the span as literal text.
/// Text outside those spans is left untouched, and text without a `$` is
/// returned as-is.
pub fn repair(text: &str) -> String {
    if !text.contains('$') {
        return text.to_string();
    }

    BROKEN_TAG
        .replace_all(text, |caps: &Captures<'_>| strip_markup(&caps[0]))
        .into_owned()
}

fn strip_markup(span: &str) -> String {
    MARKUP.replace_all(span, "").into_owned()
}

/// Distinct variable names appearing in `text`
pub fn variable_names(text: &str) -> BTreeSet<String> {
    VARIABLE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Escape a value so it can be placed inside a `<w:t>` element.
///
/// Ampersands go first so the entities produced for `<` and `>` are not
/// escaped twice. Line breaks are kept and followed by a `<w:br/>`.
pub fn clean_string(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\n', &format!("\n{}", LINE_BREAK))
}

/// Wrap a bare variable name in `${` and `}`.
///
/// A name that already starts with `${` or already ends with `}` is taken to
/// be in its full form and is returned unchanged.
pub fn full_tag(name: &str) -> Cow<'_, str> {
    if !name.starts_with(TAG_START) && !name.ends_with(TAG_END) {
        Cow::Owned(format!("{}{}{}", TAG_START, name, TAG_END))
    } else {
        Cow::Borrowed(name)
    }
}

/// Replace every occurrence of `tag` in `part` with `value`.
///
/// This is a literal substring replacement. Returns how many occurrences
/// were replaced; `part` is not reallocated when there are none.
pub fn replace_tag(part: &mut String, tag: &str, value: &str) -> usize {
    if tag.is_empty() {
        return 0;
    }

    let count = part.matches(tag).count();
    if count > 0 {
        *part = part.replace(tag, value);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_repair_split_token() {
        let broken = r#"Lorem ipsum <w:r><w:t>${</w:t></w:r><w:proofErr w:type="spellStart"/><w:r><w:t>var1</w:t></w:r><w:proofErr w:type="spellEnd"/><w:r><w:t>}</w:t></w:r> dolor sit amet"#;
        assert_eq!(
            repair(broken),
            "Lorem ipsum <w:r><w:t>${var1}</w:t></w:r> dolor sit amet"
        );
    }

    #[test]
    fn test_repair_split_inside_name() {
        let broken = "<w:t>${first</w:t><w:t>_name}</w:t>";
        assert_eq!(repair(broken), "<w:t>${first_name}</w:t>");
    }

    #[test]
    fn test_repair_split_between_dollar_and_brace() {
        let broken = "<w:t>$</w:t><w:t>{name}</w:t>";
        assert_eq!(repair(broken), "<w:t>${name}</w:t>");
    }

    #[test]
    fn test_repair_leaves_markup_outside_tokens() {
        let text = "<w:p><w:r><w:t>${a}</w:t></w:r><w:r><w:t>${b}</w:t></w:r></w:p>";
        assert_eq!(repair(text), text);
    }

    #[test]
    fn test_repair_without_closing_brace() {
        let text = "<w:t>${unterminated</w:t><w:t>text</w:t>";
        assert_eq!(repair(text), text);
    }

    #[test]
    fn test_repair_skips_nested_brace() {
        let text = "<w:t>${a</w:t><w:t>{b}</w:t>";
        assert_eq!(repair(text), text);
        assert!(variable_names("<w:t>${a{b}</w:t>").is_empty());
    }

    #[test]
    fn test_repair_is_idempotent_on_sample() {
        let broken = "<w:t>${</w:t><x/><w:t>v</w:t><w:t>}</w:t> and ${w}";
        let once = repair(broken);
        assert_eq!(repair(&once), once);
    }

    #[test]
    fn test_variable_names() {
        let text = "<w:t>${variable1}</w:t><w:t>Display</w:t><w:t>${variable2}</w:t><w:t>${variable1}</w:t>";
        let names = variable_names(text);
        assert_eq!(
            names,
            BTreeSet::from(["variable1".to_string(), "variable2".to_string()])
        );
    }

    #[test]
    fn test_variable_names_none() {
        assert!(variable_names("<w:t>$ 100 {not a tag}</w:t>").is_empty());
    }

    #[test]
    fn test_clean_string() {
        assert_eq!(
            clean_string("my < clean > string\n& on two lines"),
            "my &lt; clean &gt; string\n<w:br/>&amp; on two lines"
        );
    }

    #[test]
    fn test_clean_string_keeps_existing_entities_single_escaped() {
        assert_eq!(clean_string("&lt;"), "&amp;lt;");
        assert_eq!(clean_string("a<b"), "a&lt;b");
    }

    #[test]
    fn test_full_tag() {
        assert_eq!(full_tag("tag1"), "${tag1}");
        assert_eq!(full_tag("${tag1}"), "${tag1}");
        assert!(matches!(full_tag("${tag1}"), Cow::Borrowed(_)));
        // one delimiter is enough to be taken as a full tag
        assert_eq!(full_tag("tag1}"), "tag1}");
        assert_eq!(full_tag("${tag1"), "${tag1");
    }

    #[test]
    fn test_replace_tag() {
        let mut part = "<w:t>${a}</w:t><w:t>${b}</w:t><w:t>${a}</w:t>".to_string();
        assert_eq!(replace_tag(&mut part, "${a}", "x"), 2);
        assert_eq!(part, "<w:t>x</w:t><w:t>${b}</w:t><w:t>x</w:t>");
    }

    #[test]
    fn test_replace_tag_is_literal() {
        let mut part = "<w:t>${a.b}</w:t><w:t>${axb}</w:t>".to_string();
        assert_eq!(replace_tag(&mut part, "${a.b}", "$1"), 1);
        assert_eq!(part, "<w:t>$1</w:t><w:t>${axb}</w:t>");
    }

    #[test]
    fn test_replace_tag_missing() {
        let mut part = "<w:t>${a}</w:t>".to_string();
        assert_eq!(replace_tag(&mut part, "${zzz}", "x"), 0);
        assert_eq!(part, "<w:t>${a}</w:t>");
    }

    proptest! {
        #[test]
        fn prop_repair_without_dollar_is_identity(text in "[^$]*") {
            prop_assert_eq!(repair(&text), text);
        }

        #[test]
        fn prop_repair_keeps_whole_tokens(
            before in "[a-z <>/:]{0,20}",
            name in "[A-Za-z0-9_]{1,12}",
            after in "[a-z <>/:]{0,20}",
        ) {
            let text = format!("{}<w:t>${{{}}}</w:t>{}", before, name, after);
            let repaired = repair(&text);
            prop_assert_eq!(&repaired, &text);
            prop_assert_eq!(repair(&repaired), repaired);
        }

        #[test]
        fn prop_repair_joins_split_name(
            chunks in proptest::collection::vec("[A-Za-z0-9_]{1,6}", 1..5),
        ) {
            let mut broken = String::from("<w:r><w:t>${</w:t></w:r>");
            for chunk in &chunks {
                broken.push_str(&format!("<w:proofErr/><w:r><w:t>{}</w:t></w:r>", chunk));
            }
            broken.push_str("<w:r><w:t>}</w:t></w:r>");

            let expected = format!("<w:r><w:t>${{{}}}</w:t></w:r>", chunks.concat());
            prop_assert_eq!(repair(&broken), expected);
        }
    }
}
