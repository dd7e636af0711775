// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! The fair-software.eu badge
//!
//! The badge is a shields.io static badge whose message is the encoded
//! compliance vector, e.g.
//! `https://img.shields.io/badge/fair--software.eu-%E2%97%8F%20%20...-green`.

use crate::compliance::Compliance;
use crate::readme::ReadmeFormat;

/// Every fair-software.eu badge URL starts with this
pub const BADGE_PREFIX: &str = "https://img.shields.io/badge/fair--software.eu";

/// Page the badge links to
pub const BADGE_TARGET: &str = "https://fair-software.eu";

/// Length of an encoded vector: five 9-character symbols and four `%20%20` separators
const ENCODED_LEN: usize = 69;

/// Result of looking for a badge in README text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeSearch {
    pub found: bool,
    /// Declared compliance; all unknown when no badge was found
    pub compliance: Compliance,
}

/// Find the badge in `text` and decode the compliance it declares
pub fn find(text: &str) -> BadgeSearch {
    let Some(location) = text.find(BADGE_PREFIX) else {
        return BadgeSearch {
            found: false,
            compliance: Compliance::unknown(),
        };
    };

    // skip the '-' between label and message
    let start = location + BADGE_PREFIX.len();
    let encoded: String = text[start..].chars().skip(1).take(ENCODED_LEN).collect();

    BadgeSearch {
        found: true,
        compliance: Compliance::decode(&encoded),
    }
}

/// shields.io colour for a compliance vector
pub fn color(compliance: &Compliance) -> &'static str {
    match compliance.compliant_count() {
        0 | 1 => "red",
        2 | 3 => "orange",
        4 => "yellow",
        _ => "green",
    }
}

/// Badge image URL for a compliance vector
pub fn url(compliance: &Compliance) -> String {
    format!("{}-{}-{}", BADGE_PREFIX, compliance.encode(), color(compliance))
}

/// Badge markup for pasting into a README of the given format
pub fn snippet(compliance: &Compliance, format: Option<ReadmeFormat>) -> String {
    let url = url(compliance);
    match format {
        Some(ReadmeFormat::RestructuredText) => format!(
            "|fair-software.eu|\n\n.. |fair-software.eu| image:: {}\n   :target: {}",
            url, BADGE_TARGET
        ),
        Some(ReadmeFormat::Markdown) | None => {
            format!("[![fair-software.eu]({})]({})", url, BADGE_TARGET)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE: &str = "%E2%97%8F%20%20%E2%97%8B%20%20%E2%97%8F%20%20%E2%97%8B%20%20%E2%97%8F";

    #[test]
    fn test_find_badge_in_markdown() {
        let text = format!(
            "# Project\n\n[![fair-software.eu]({}-{}-yellow)]({})\n",
            BADGE_PREFIX, FIVE, BADGE_TARGET
        );
        let search = find(&text);
        assert!(search.found);
        assert_eq!(search.compliance, Compliance::new(true, false, true, false, true));
    }

    #[test]
    fn test_find_without_badge() {
        let search = find("# Project\n\nNo badge here.\n");
        assert!(!search.found);
        assert_eq!(search.compliance.count(None), 5);
    }

    #[test]
    fn test_find_truncated_badge_is_unknown() {
        let text = format!("{}-%E2%97%8F%20%20%E2%97%8F-red", BADGE_PREFIX);
        let search = find(&text);
        assert!(search.found);
        assert_eq!(search.compliance, Compliance::unknown());
    }

    #[test]
    fn test_find_prefix_at_end_of_text() {
        let search = find(BADGE_PREFIX);
        assert!(search.found);
        assert_eq!(search.compliance, Compliance::unknown());
    }

    #[test]
    fn test_encoded_length_matches() {
        assert_eq!(Compliance::new(true, true, false, false, true).encode().len(), ENCODED_LEN);
    }

    #[test]
    fn test_color_scale() {
        assert_eq!(color(&Compliance::new(false, false, false, false, false)), "red");
        assert_eq!(color(&Compliance::new(true, false, false, false, false)), "red");
        assert_eq!(color(&Compliance::new(true, true, false, false, false)), "orange");
        assert_eq!(color(&Compliance::new(true, true, true, false, false)), "orange");
        assert_eq!(color(&Compliance::new(true, true, true, true, false)), "yellow");
        assert_eq!(color(&Compliance::new(true, true, true, true, true)), "green");
    }

    #[test]
    fn test_snippet_is_found_again() {
        let compliance = Compliance::new(true, true, false, true, false);
        for format in [Some(ReadmeFormat::Markdown), Some(ReadmeFormat::RestructuredText), None] {
            let search = find(&snippet(&compliance, format));
            assert!(search.found);
            assert_eq!(search.compliance, compliance);
        }
    }

    #[test]
    fn test_markdown_snippet() {
        let compliance = Compliance::new(true, true, true, true, true);
        assert_eq!(
            snippet(&compliance, Some(ReadmeFormat::Markdown)),
            format!(
                "[![fair-software.eu](https://img.shields.io/badge/fair--software.eu-{}-green)](https://fair-software.eu)",
                compliance.encode()
            )
        );
    }
}
