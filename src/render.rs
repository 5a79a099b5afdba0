use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::profile::CombinedRecord;

/// Stands in for any metric that was not collected.
pub const NOT_AVAILABLE: &str = "N/A";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct Link {
    pub label: String,
    pub url: String,
}

pub struct Education {
    pub institution: String,
    pub department: String,
}

/// Hand-maintained biography around the collected metrics.
pub struct StaticContent {
    pub name: String,
    pub about: String,
    pub research_interests: Vec<String>,
    pub education: Vec<Education>,
    pub links: Vec<Link>,
    pub projects: Vec<String>,
    pub stats_badge_url: String,
}

impl Default for StaticContent {
    fn default() -> Self {
        let link = |label: &str, url: &str| Link {
            label: label.to_string(),
            url: url.to_string(),
        };
        Self {
            name: "Yu-Hao Tseng".into(),
            about: "I'm a researcher at National Taiwan Ocean University, specializing in oceanography and marine sciences.".into(),
            research_interests: vec![
                "Ocean Current Analysis".into(),
                "Marine Dynamics".into(),
                "Geographic Information Systems (GIS)".into(),
                "Data Visualization".into(),
            ],
            education: vec![Education {
                institution: "National Taiwan Ocean University".into(),
                department: "Department of Marine Environmental Informatics".into(),
            }],
            links: vec![
                link("ResearchGate", "https://www.researchgate.net/profile/Yu-Hao-Tseng"),
                link("Google Scholar", "https://scholar.google.com/citations?user=_zozF1AAAAAJ"),
                link("LinkedIn", "https://www.linkedin.com/in/yu-hao-tseng-70316221b/"),
            ],
            projects: vec![
                "Ocean Current Observation and Analysis".into(),
                "GMT (Generic Mapping Tools) Applications".into(),
                "MATLAB Ocean Dynamics Modeling".into(),
                "OpenDrift Trajectory Modeling".into(),
            ],
            stats_badge_url: "https://github-readme-stats.vercel.app/api?username=ja754969&show_icons=true&theme=radical".into(),
        }
    }
}

/// The four headline numbers. `None` means not collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub publications: Option<u64>,
    pub citations: Option<u64>,
    pub h_index: Option<u64>,
    pub i10_index: Option<u64>,
}

impl Metrics {
    /// Publications come from ResearchGate, the rest from Google Scholar.
    /// Zero is what the extractors report for a field they could not find, so
    /// it counts as not collected.
    pub fn from_record(record: &CombinedRecord) -> Self {
        let present = |v: u64| Some(v).filter(|v| *v > 0);
        let scholar = record.scholar();
        Self {
            publications: record.researchgate().and_then(|p| present(p.publications)),
            citations: scholar.and_then(|p| present(p.citations)),
            h_index: scholar.and_then(|p| present(p.h_index)),
            i10_index: scholar.and_then(|p| present(p.i10_index)),
        }
    }
}

fn metric(value: Option<u64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Build the Markdown document. Output depends only on the arguments.
pub fn render(
    record: &CombinedRecord,
    content: &StaticContent,
    generated_at: NaiveDateTime,
) -> String {
    let m = Metrics::from_record(record);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "# {}\n", content.name);

    let _ = writeln!(out, "## About Me\n{}\n", content.about);

    let _ = writeln!(out, "## 📊 Research Metrics");
    let _ = writeln!(out, "- **Publications**: {}", metric(m.publications));
    let _ = writeln!(out, "- **Citations**: {}", metric(m.citations));
    let _ = writeln!(out, "- **H-index**: {}", metric(m.h_index));
    let _ = writeln!(out, "- **i10-index**: {}\n", metric(m.i10_index));

    let _ = writeln!(out, "## 🔬 Research Interests");
    for topic in &content.research_interests {
        let _ = writeln!(out, "- {}", topic);
    }
    out.push('\n');

    let _ = writeln!(out, "## 📚 Education");
    for e in &content.education {
        let _ = writeln!(out, "- **{}**\n  - {}", e.institution, e.department);
    }
    out.push('\n');

    let _ = writeln!(out, "## 🔗 Links");
    for l in &content.links {
        let _ = writeln!(out, "- [{}]({})", l.label, l.url);
    }
    out.push('\n');

    let _ = writeln!(out, "## 💻 Current Projects");
    for p in &content.projects {
        let _ = writeln!(out, "- {}", p);
    }
    out.push('\n');

    let _ = writeln!(out, "## 📈 Repository Statistics");
    let _ = writeln!(out, "![GitHub Stats]({})\n", content.stats_badge_url);

    let _ = writeln!(out, "---");
    let _ = writeln!(
        out,
        "*Last updated: {}*",
        generated_at.format(TIMESTAMP_FORMAT)
    );
    out
}
