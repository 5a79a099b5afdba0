use std::sync::OnceLock;

use regex::Regex;

use super::{all_captures, first_count, first_text};
use crate::profile::ResearchGateProfile;

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<h1[^>]*>([^<]+)</h1>").unwrap())
}

fn institution_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)institution[^>]*>([^<]+)</[^>]*>").unwrap())
}

fn publications_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)\s*Publications?").unwrap())
}

fn citations_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)\s*Citations?").unwrap())
}

fn h_index_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)h-index[^>]*>(\d+)").unwrap())
}

fn interest_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<a[^>]*class="[^"]*(?:research-interest|keyword)[^"]*"[^>]*>([^<]+)</a>"#)
            .unwrap()
    })
}

pub fn extract(html: &str) -> ResearchGateProfile {
    ResearchGateProfile {
        name: first_text(name_re(), html),
        institution: first_text(institution_re(), html),
        publications: first_count(publications_re(), html),
        citations: first_count(citations_re(), html),
        research_interests: research_interests(html),
        h_index: first_count(h_index_re(), html),
    }
}

// Keyword chips repeat across the page layout; keep first occurrences only.
fn research_interests(html: &str) -> Vec<String> {
    let mut interests: Vec<String> = Vec::new();
    for raw in all_captures(interest_re(), html) {
        let topic = raw.trim();
        if !topic.is_empty() && !interests.iter().any(|t| t == topic) {
            interests.push(topic.to_string());
        }
    }
    interests
}
