// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! README retrieval and comment stripping

use crate::http::{self, Fetch};
use crate::repo::Repo;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// README filenames, in the order they are tried
pub const README_CANDIDATES: [(&str, ReadmeFormat); 2] = [
    ("README.md", ReadmeFormat::Markdown),
    ("README.rst", ReadmeFormat::RestructuredText),
];

/// Markup format of a README
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadmeFormat {
    Markdown,
    RestructuredText,
}

/// README of the checked repository; all fields are `None` when none was found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Readme {
    pub filename: Option<String>,
    pub text: Option<String>,
    pub format: Option<ReadmeFormat>,
}

impl Readme {
    pub fn new(filename: &str, text: &str, format: ReadmeFormat) -> Self {
        Self {
            filename: Some(filename.to_string()),
            text: Some(text.to_string()),
            format: Some(format),
        }
    }

    /// README that could not be found
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn is_missing(&self) -> bool {
        self.text.is_none()
    }

    /// Fetch the first README that exists on the remote.
    ///
    /// Comments are stripped unless `include_comments` is set.
    pub async fn fetch(fetch: &dyn Fetch, repo: &Repo, include_comments: bool) -> Self {
        for (filename, format) in README_CANDIDATES {
            let url = repo.raw_url(filename);
            let Some(text) = http::get_ok(fetch, &url).await else {
                continue;
            };
            info!(%url, "Found README");
            let mut readme = Self::new(filename, &text, format);
            if !include_comments {
                readme.remove_comments();
            }
            return readme;
        }

        let location = repo.raw_url("");
        warn!(%location, "Did not find a README[.md|.rst] file");
        Self::missing()
    }

    /// Strip comments appropriate to the README format
    pub fn remove_comments(&mut self) {
        let Some(text) = self.text.take() else {
            return;
        };
        let mut text = strip_html_comments(&text);
        if self.format == Some(ReadmeFormat::RestructuredText) {
            text = strip_rst_comments(&text);
        }
        self.text = Some(text);
    }
}

/// Remove `<!-- ... -->` comments.
///
/// The match is greedy: everything from the first opening marker to the last
/// closing marker goes, including text between separate comments.
pub fn strip_html_comments(text: &str) -> String {
    match Regex::new(r"(?s)<!--.*-->") {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Remove reStructuredText comment blocks.
///
/// A comment is an explicit markup line (`..` then whitespace or end of line)
/// that is not a directive, hyperlink target, footnote, citation or
/// substitution definition. Its indented body goes with it, including blank
/// lines followed by more indented lines.
pub fn strip_rst_comments(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut kept = Vec::new();
    let mut in_comment = false;

    for (i, line) in lines.iter().copied().enumerate() {
        if in_comment {
            if is_indented(line) {
                continue;
            }
            if line.trim().is_empty() && body_continues(&lines[i + 1..]) {
                continue;
            }
            in_comment = false;
        }
        if is_rst_comment(line) {
            in_comment = true;
            continue;
        }
        kept.push(line);
    }

    kept.join("\n")
}

fn is_indented(line: &str) -> bool {
    line.starts_with([' ', '\t']) && !line.trim().is_empty()
}

/// The next non-blank line is still part of an indented body
fn body_continues(rest: &[&str]) -> bool {
    rest.iter()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| is_indented(line))
}

fn is_rst_comment(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("..") else {
        return false;
    };
    if !(rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace())) {
        return false;
    }
    let body = rest.trim_start();
    if body.starts_with('_') || body.starts_with('[') || body.starts_with('|') {
        return false;
    }
    !is_directive(body)
}

fn is_directive(body: &str) -> bool {
    match body.find("::") {
        Some(end) => {
            let name = &body[..end];
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | ':' | '.'))
        }
        None => false,
    }
}
