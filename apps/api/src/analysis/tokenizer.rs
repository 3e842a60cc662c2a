//! Tokenizer — lowercases free text and splits it into keyword-like tokens.
//!
//! Only `[a-z0-9+#.]` survive inside a token, so `c++`, `c#` and `node.js`
//! stay whole while punctuation such as `,` `(` `/` becomes a separator.

use std::collections::HashSet;

/// Splits `text` into lowercase tokens, in order, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_token_char(c) || c.is_whitespace() { c } else { ' ' })
        .collect();

    normalized
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Stable dedup: keeps the first occurrence of every token.
pub fn unique<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for token in tokens {
        let token = token.into();
        if seen.insert(token.clone()) {
            out.push(token);
        }
    }
    out
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '#' | '.')
}
