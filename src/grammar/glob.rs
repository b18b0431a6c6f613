//! Part-of-speech globs.
//!
//! Rule files gate and describe parts of speech with shell-style globs
//! (`v5*`, `v[15]*`, `vs-*`) and extended alternation groups
//! (`@(v1|v5k)`). A glob is compiled to an anchored `Regex` once, when the
//! rule is built, so matching during the search is a single regex call.
//!
//! ```text
//! glob                  regex
//! *                     ^(?:.*)$
//! v[15]*                ^(?:v[15].*)$
//! @(v1|vs-*)            ^(?:(?:v1|vs\-.*))$
//! +(ab)                 ^(?:(?:ab)+)$
//! ```
//!
//! `!(...)` has no regex equivalent without look-around and is rejected.

use crate::error::RuleError;
use regex::Regex;
use std::hash::{Hash, Hasher};

/// A compiled POS glob. Equality and hashing use the glob text only.
#[derive(Clone)]
pub struct PosGlob {
    source: String,
    matcher: Regex,
}

impl PosGlob {
    /// Compile `source`.
    pub fn new(source: &str) -> Result<Self, RuleError> {
        let pattern = translate(source)
            .map_err(|reason| RuleError::InvalidPosGlob { glob: source.to_string(), reason })?;
        let matcher = Regex::new(&pattern)
            .map_err(|err| RuleError::InvalidPosGlob { glob: source.to_string(), reason: err.to_string() })?;
        Ok(PosGlob { source: source.to_string(), matcher })
    }

    /// The unconstrained glob `*`.
    pub fn any() -> Self {
        PosGlob { source: "*".to_string(), matcher: crate::static_regex!("^(?:.*)$").clone() }
    }

    /// Fold whitespace-separated globs (`a b\tc`) into one alternation `@(a|b|c)`.
    pub fn from_tag_list(tags: &str) -> Result<Self, RuleError> {
        let joined: Vec<&str> = tags.split_whitespace().collect();
        if joined.is_empty() {
            return Err(RuleError::InvalidPosGlob { glob: tags.to_string(), reason: "empty tag list".to_string() });
        }
        Self::new(&format!("@({})", joined.join("|")))
    }

    /// Whether `tag` is accepted by this glob.
    pub fn matches(&self, tag: &str) -> bool {
        self.matcher.is_match(tag)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for PosGlob {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for PosGlob {}

impl Hash for PosGlob {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl std::fmt::Debug for PosGlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PosGlob({:?})", self.source)
    }
}

impl std::fmt::Display for PosGlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Translate glob syntax into an anchored regex pattern.
fn translate(glob: &str) -> Result<String, String> {
    let mut out = String::from("^(?:");
    let mut open_groups: Vec<char> = Vec::new();
    let mut chars = glob.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '@' | '?' | '*' | '+' | '!' if chars.peek() == Some(&'(') => {
                if c == '!' {
                    return Err("negated groups `!(...)` are not supported".to_string());
                }
                chars.next();
                open_groups.push(c);
                out.push_str("(?:");
            }
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '|' if !open_groups.is_empty() => out.push('|'),
            ')' if !open_groups.is_empty() => {
                out.push(')');
                match open_groups.pop() {
                    Some('?') => out.push('?'),
                    Some('*') => out.push('*'),
                    Some('+') => out.push('+'),
                    _ => {}
                }
            }
            ')' => return Err("unmatched `)`".to_string()),
            '[' => {
                let mut body: Vec<char> = Vec::new();
                let mut closed = false;
                // A `]` directly after `[` (or `[!`) is a literal member.
                while let Some(inner) = chars.next() {
                    let at_start = body.is_empty() || (body.len() == 1 && matches!(body[0], '!' | '^'));
                    if inner == ']' && !at_start {
                        closed = true;
                        break;
                    }
                    body.push(inner);
                }
                if !closed {
                    return Err("unterminated `[` character class".to_string());
                }
                out.push_str(&translate_class(&body));
            }
            '\\' => {
                let escaped = chars.next().ok_or_else(|| "trailing `\\`".to_string())?;
                out.push_str(&regex::escape(escaped.encode_utf8(&mut [0; 4])));
            }
            other => out.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }

    if !open_groups.is_empty() {
        return Err("unclosed `(` group".to_string());
    }
    out.push_str(")$");
    Ok(out)
}

fn translate_class(body: &[char]) -> String {
    let (negated, members) = match body.first() {
        Some('!') | Some('^') => (true, &body[1..]),
        _ => (false, body),
    };
    let mut class = String::from(if negated { "[^" } else { "[" });
    for (i, &c) in members.iter().enumerate() {
        if c == '-' && i > 0 && i + 1 < members.len() {
            class.push('-');
        } else {
            class.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
    }
    class.push(']');
    class
}
