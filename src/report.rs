// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Comparing the computed compliance with the README badge, and printing it

use crate::badge;
use crate::checks::CheckOutcome;
use crate::compliance::Compliance;
use crate::Assessment;
use colored::{Color, Colorize};
use serde::Serialize;

/// How the computed compliance relates to the badge in the README
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No README was found, so there is nothing to compare against
    NoReadme,
    /// The README has no fair-software.eu badge
    BadgeMissing,
    /// The badge matches the computed compliance
    Matches,
    /// The repository is more compliant than its badge says
    Exceeds,
    /// The badge disagrees with the computed compliance
    Differs,
}

impl Verdict {
    /// Compare the assessment with the badge in its README
    pub fn of(assessment: &Assessment) -> Self {
        let Some(text) = assessment.readme.text.as_deref() else {
            return Self::NoReadme;
        };
        let declared = badge::find(text);
        if !declared.found {
            Self::BadgeMissing
        } else if assessment.compliance == declared.compliance {
            Self::Matches
        } else if assessment.compliance.exceeds(&declared.compliance) {
            Self::Exceeds
        } else {
            Self::Differs
        }
    }

    /// Process exit code; only a matching badge succeeds
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Matches => 0,
            Self::NoReadme | Self::BadgeMissing | Self::Exceeds | Self::Differs => 1,
        }
    }
}

/// Machine-readable report
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub repository: String,
    pub platform: String,
    pub branch: &'a str,
    pub readme: Option<&'a str>,
    pub compliance: &'a Compliance,
    pub checks: &'a [CheckOutcome],
    pub verdict: Verdict,
    pub badge: String,
}

impl<'a> JsonReport<'a> {
    pub fn new(assessment: &'a Assessment) -> Self {
        Self {
            repository: assessment.repo.url().to_string(),
            platform: assessment.repo.platform().to_string(),
            branch: assessment.repo.branch(),
            readme: assessment.readme.filename.as_deref(),
            compliance: &assessment.compliance,
            checks: &assessment.outcomes,
            verdict: Verdict::of(assessment),
            badge: assessment.badge(),
        }
    }
}

/// Terminal reporter. Colour is decided once by the caller.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Per-check lines: force notes or one tick/cross per signal
    pub fn render_outcome(&self, outcome: &CheckOutcome) -> String {
        let mut out = String::new();
        if outcome.forced {
            out.push_str(&format!("{}: force {}\n", outcome.recommendation, outcome.compliant));
            return out;
        }
        out.push_str(&format!("{}\n", outcome.recommendation));
        for signal in &outcome.signals {
            let mark = if signal.passed {
                self.paint("\u{2713}", Color::Green)
            } else {
                self.paint("\u{00D7}", Color::Red)
            };
            out.push_str(&format!("      {} {}\n", mark, signal.name));
        }
        out
    }

    /// Full human-readable report for an assessment
    pub fn render(&self, assessment: &Assessment) -> String {
        let mut out = String::new();
        for outcome in &assessment.outcomes {
            out.push_str(&self.render_outcome(outcome));
        }
        out.push_str(&format!("\nCalculated compliance: {}\n\n", assessment.compliance));
        out.push_str(&self.render_verdict(assessment, Verdict::of(assessment)));
        out
    }

    /// Message explaining the verdict, with a badge snippet where one helps
    pub fn render_verdict(&self, assessment: &Assessment, verdict: Verdict) -> String {
        let filename = assessment.readme.filename.as_deref().unwrap_or("README");
        let badge = assessment.badge();
        match verdict {
            Verdict::NoReadme => format!(
                "{}\n",
                self.paint("No README found, so the badge cannot be compared.", Color::Red)
            ),
            Verdict::BadgeMissing => format!(
                "It seems you have not yet added the fair-software.eu badge to your {}. \
                 You can do so by pasting the following snippet:\n\n{}\n",
                filename, badge
            ),
            Verdict::Matches => format!(
                "{}\n",
                self.paint("Expected badge is equal to the actual badge. It's all good.", Color::Green)
            ),
            Verdict::Exceeds => format!(
                "{} The compliance of your repository exceeds the current fair-software.eu badge \
                 in your {}. You can replace it with the following snippet:\n\n{}\n",
                self.paint("Congratulations!", Color::Green),
                filename,
                badge
            ),
            Verdict::Differs => format!(
                "The compliance of your repository is different from the current fair-software.eu \
                 badge in your {}. Please replace it with the following snippet:\n\n{}\n",
                filename, badge
            ),
        }
    }

    pub fn print(&self, assessment: &Assessment) {
        print!("{}", self.render(assessment));
    }
}
