// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MalformedResult;

/// One decoded compiler outcome.
///
/// Decoded from the compiler's JSON:
///
/// ```json
/// { "tokens": ["fn", "main"], "ast": "digraph {}", "ptree": "digraph {}", "analysis": ["ok"] }
/// ```
///
/// `tokens` may also be a single markup string (`<code><p>fn</p>...</code>`),
/// and `analysis` may be a single string with one message per line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResult {
    /// Token names, in source order.
    #[serde(deserialize_with = "deserialize_tokens")]
    pub tokens: Vec<String>,
    /// Graph specification of the abstract syntax tree.
    pub ast: String,
    /// Graph specification of the parse tree.
    pub ptree: String,
    /// Analysis messages.
    #[serde(deserialize_with = "deserialize_analysis")]
    pub analysis: Vec<String>,
}

impl CompileResult {
    /// Decodes a raw compiler result.
    pub fn from_json(raw: &str) -> Result<Self, MalformedResult> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrText {
    List(Vec<String>),
    Text(String),
}

fn deserialize_tokens<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    match ListOrText::deserialize(de)? {
        ListOrText::List(tokens) => Ok(tokens),
        ListOrText::Text(markup) => split_token_markup(&markup)
            .ok_or_else(|| D::Error::custom("token markup is not a <code> block of <p> entries")),
    }
}

fn deserialize_analysis<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(match ListOrText::deserialize(de)? {
        ListOrText::List(messages) => messages,
        ListOrText::Text(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect(),
    })
}

/// Splits `<code><p>a</p><p>b</p></code>` into `["a", "b"]`.
///
/// Surrounding whitespace and whitespace between entries is ignored.
/// Returns `None` if the text is not in that shape.
#[must_use]
pub fn split_token_markup(markup: &str) -> Option<Vec<String>> {
    let mut rest = markup
        .trim()
        .strip_prefix("<code>")?
        .strip_suffix("</code>")?
        .trim_start();
    let mut tokens = Vec::new();
    while !rest.is_empty() {
        let body = rest.strip_prefix("<p>")?;
        let end = body.find("</p>")?;
        tokens.push(body[..end].to_owned());
        rest = body[end + "</p>".len()..].trim_start();
    }
    Some(tokens)
}
