//! Marker based templates.

//! Templates are split into an opener and a closer on the *first*
//! occurrence of their marker. Later occurrences stay in the closer as
//! literal text. Without a marker the whole template is the opener and
//! the closer is empty.

use itertools::Itertools;
use kstring::KString;

pub const CHILDREN_MARKER: &str = "%children%";
pub const CHILD_MARKER: &str = "%child%";
pub const SLOT_MARKER: &str = "%slot%";
pub const CLASSES_MARKER: &str = "%classes%";
pub const ATTRIBUTES_MARKER: &str = "%attributes%";

/// Split `template` on the first `marker`.
pub fn split<'t>(template: &'t str, marker: &str) -> (&'t str, &'t str) {
    template.split_once(marker).unwrap_or((template, ""))
}

/// `name="value"` pairs joined by spaces, with one leading space if
/// there are any. Values are not escaped.
pub fn attributes_fragment(attributes: &[(KString, KString)]) -> String {
    if attributes.is_empty() {
        return String::new()
    }
    let joined = attributes.iter()
        .map(|(name, value)| format!("{name}=\"{value}\""))
        .join(" ");
    format!(" {joined}")
}

fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Drop empty `class`/`id` attributes, collapse whitespace runs to a
/// single space, and remove whitespace in front of `>`.
pub fn tidy(s: &str) -> String {
    let s = s.replace("class=\"\"", "").replace("id=\"\"", "");
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        if is_space(c) {
            pending_space = true;
            continue;
        }
        if pending_space && c != '>' {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    if pending_space {
        out.push(' ');
    }
    out
}

/// The part of a component wrapper before its children, with classes
/// and attributes substituted.
pub fn wrapper_opener(
    template: &str,
    classes: &[KString],
    attributes: &[(KString, KString)]
) -> String {
    let (opener, _) = split(template, CHILDREN_MARKER);
    let opener = opener
        .replace(CLASSES_MARKER, &classes.iter().join(" "))
        .replace(ATTRIBUTES_MARKER, &attributes_fragment(attributes));
    tidy(&opener)
}

pub fn wrapper_closer(template: &str) -> &str {
    split(template, CHILDREN_MARKER).1
}

pub fn children_opener(template: &str) -> &str {
    split(template, CHILD_MARKER).0
}

pub fn children_closer(template: &str) -> &str {
    split(template, CHILD_MARKER).1
}

pub fn slot_opener(template: &str) -> &str {
    split(template, SLOT_MARKER).0
}

pub fn slot_closer(template: &str) -> &str {
    split(template, SLOT_MARKER).1
}
