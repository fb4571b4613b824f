//! Note filename building
//!
//! Titles are sanitised into filesystem-safe stems. Site profiles can add a
//! date suffix pulled from the article's first block.

use crate::types::ContentBlock;
use chrono::NaiveDate;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

/// Stem used when the sanitised title is empty
pub const UNTITLED_STEM: &str = "Untitled";

/// Site-specific filename behaviour
pub trait SiteProfile: Send + Sync {
    /// Profile identifier
    fn name(&self) -> &'static str;

    /// Date suffix (`MM-DD-YYYY`) derived from the blocks, if any
    fn date_suffix(&self, blocks: &[ContentBlock]) -> Option<String>;
}

/// Profile that never adds a suffix
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProfile;

impl SiteProfile for DefaultProfile {
    fn name(&self) -> &'static str {
        "default"
    }

    fn date_suffix(&self, _blocks: &[ContentBlock]) -> Option<String> {
        None
    }
}

/// Blogs whose opening paragraph carries a byline like
/// "Posted by Jane on March 3, 2021".
#[derive(Debug, Clone, Copy, Default)]
pub struct BylineDateProfile;

fn byline_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bon\s+([a-z]+)\.?\s+(\d{1,2}),\s*(\d{4})\b")
            .expect("byline date pattern is valid")
    })
}

/// Find `on <Month> <Day>, <Year>` in text and format it `MM-DD-YYYY`
pub fn parse_byline_date(text: &str) -> Option<String> {
    let caps = byline_date_regex().captures(text)?;
    let candidate = format!("{} {} {}", &caps[1], &caps[2], &caps[3]);
    let date = NaiveDate::parse_from_str(&candidate, "%B %d %Y").ok()?;
    Some(date.format("%m-%d-%Y").to_string())
}

impl SiteProfile for BylineDateProfile {
    fn name(&self) -> &'static str {
        "byline-date"
    }

    fn date_suffix(&self, blocks: &[ContentBlock]) -> Option<String> {
        let first = blocks.first()?;
        let suffix = parse_byline_date(&first.text);
        if suffix.is_none() {
            tracing::debug!("No byline date found in first block");
        }
        suffix
    }
}

/// Profile selector exposed to the shell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Default,
    BylineDate,
}

impl Profile {
    /// Resolve to the profile implementation
    pub fn site_profile(&self) -> &'static dyn SiteProfile {
        match self {
            Profile::Default => &DefaultProfile,
            Profile::BylineDate => &BylineDateProfile,
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Profile::Default),
            "byline-date" | "byline_date" => Ok(Profile::BylineDate),
            _ => Err("Invalid profile: must be default or byline-date".to_string()),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.site_profile().name())
    }
}

/// Keep ASCII alphanumerics, space, `-` and `_`; replace everything else with `_`
pub fn sanitize_title(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build `<title>[_<MM-DD-YYYY>].md`
pub fn build_filename(title: &str, blocks: &[ContentBlock], profile: &dyn SiteProfile) -> String {
    let mut stem = sanitize_title(title);
    if stem.is_empty() {
        stem = UNTITLED_STEM.to_string();
    }

    match profile.date_suffix(blocks) {
        Some(date) => format!("{}_{}.md", stem, date),
        None => format!("{}.md", stem),
    }
}
