//! Email address format (RFC 5322 mailbox).
//!
//! Accepts a single mailbox: either a bare `local@domain` addr-spec or an
//! optional display name followed by `<local@domain>`. Words may carry
//! UTF-8 text (RFC 6532), whitespace may follow the `@`, and the address may
//! end with a parenthesised comment. Address lists and groups are rejected.

use std::sync::LazyLock;

use regex::Regex;

/// `atext` from RFC 5322 section 3.2.3, plus any non-ASCII character.
const ATEXT: &str = r"(?:[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]|[^\x00-\x7F])";

/// Display-name words also allow `.` (obsolete phrase syntax).
const PHRASE_ATEXT: &str = r"(?:[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]|[^\x00-\x7F])";

const QUOTED_CHAR: &str = r#"(?:[^"\\\r\n]|\\[^\r\n])"#;

const DOMAIN_LITERAL: &str = r"\[[^\[\]\\\r\n]*\]";

/// Trailing comment such as `(Jo Lee)`; nesting is not supported.
const COMMENT: &str = r"\((?:[^()\\\r\n]|\\[^\r\n])*\)";

static MAILBOX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let dot_atom = format!(r"{a}+(?:\.{a}+)*", a = ATEXT);
    // a quoted local part must not be empty
    let local = format!(r#"(?:{dot_atom}|"{q}+")"#, q = QUOTED_CHAR);
    let addr_spec = format!(
        r"{local}@[ \t]*(?:{dot_atom}|{literal})",
        literal = DOMAIN_LITERAL,
    );
    let word = format!(r#"(?:{p}+|"{q}*")"#, p = PHRASE_ATEXT, q = QUOTED_CHAR);
    let phrase = format!(r"{word}(?:[ \t]+{word})*");
    Regex::new(&format!(
        r"^[ \t]*(?:{addr_spec}|(?:{phrase}[ \t]*)?<{addr_spec}>)(?:[ \t]*{comment})*[ \t]*$",
        comment = COMMENT,
    ))
    .expect("Invalid mailbox regex")
});

/// True when the value parses as exactly one mailbox address.
pub fn email_format(value: &str) -> bool {
    MAILBOX_REGEX.is_match(value)
}
