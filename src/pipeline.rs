use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::aggregate::{Aggregator, PACING_DELAY};
use crate::config;
use crate::net::Fetch;
use crate::profile::CombinedRecord;
use crate::render::{self, StaticContent};

/// Knobs for one run.
pub struct RunOptions {
    pub config_path: PathBuf,
    /// Overrides `readme_path` from the config file.
    pub output: Option<PathBuf>,
    pub delay: Duration,
    pub progress: bool,
}

impl RunOptions {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            output: None,
            delay: PACING_DELAY,
            progress: false,
        }
    }
}

pub struct UpdateSummary {
    pub output: PathBuf,
    pub record: CombinedRecord,
}

/// Load config and collect every configured source.
pub async fn collect<F: Fetch + Clone>(
    opts: &RunOptions,
    fetcher: F,
) -> Result<(config::Config, CombinedRecord)> {
    let cfg = config::load(&opts.config_path)?;
    let record = Aggregator::new(fetcher)
        .with_delay(opts.delay)
        .with_progress(opts.progress)
        .collect(&cfg)
        .await;
    Ok((cfg, record))
}

/// Collect and render without touching the output file.
pub async fn preview<F: Fetch + Clone>(
    opts: &RunOptions,
    fetcher: F,
    generated_at: NaiveDateTime,
) -> Result<String> {
    let (_, record) = collect(opts, fetcher).await?;
    Ok(render::render(&record, &StaticContent::default(), generated_at))
}

/// One full pass: load config, collect, render, overwrite the output.
pub async fn run_update<F: Fetch + Clone>(
    opts: &RunOptions,
    fetcher: F,
) -> Result<UpdateSummary> {
    println!("Starting dashboard update...");
    let (cfg, record) = collect(opts, fetcher).await?;

    let generated_at = Local::now().naive_local();
    let document = render::render(&record, &StaticContent::default(), generated_at);

    let output = opts.output.clone().unwrap_or(cfg.readme_path);
    write_atomic(&output, &document)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {} bytes to {}", document.len(), output.display());
    println!(
        "{} updated successfully at {}",
        output.display(),
        generated_at.format(render::TIMESTAMP_FORMAT)
    );
    println!("Dashboard update completed!");

    Ok(UpdateSummary { output, record })
}

/// Write to a sibling temp file and rename over `path`, so a failed write
/// leaves the previous document in place.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Profiles};
    use crate::profile::SourceId;
    use crate::sources::tests::StubFetcher;

    const GS: &str = "https://scholar.test/citations?user=abc";

    const SCHOLAR_PAGE: &str = r#"<html><body>
<div id="gsc_prf_in">A. Researcher</div>
<table id="gsc_rsb_st"><tbody>
<tr><td class="gsc_rsb_sc1">Citations</td><td class="gsc_rsb_std">120</td></tr>
<tr><td class="gsc_rsb_sc1">h-index</td><td class="gsc_rsb_std">15</td></tr>
<tr><td class="gsc_rsb_sc1">i10-index</td><td class="gsc_rsb_std">6</td></tr>
</tbody></table>
</body></html>"#;

    fn options(dir: &Path, cfg: &Config) -> RunOptions {
        let config_path = dir.join("dashboard_config.toml");
        config::write(&config_path, cfg).unwrap();
        let mut opts = RunOptions::new(config_path);
        opts.delay = Duration::ZERO;
        opts
    }

    fn scholar_only(readme: PathBuf) -> Config {
        Config {
            readme_path: readme,
            profiles: Profiles {
                google_scholar: Some(GS.into()),
                ..Profiles::default()
            },
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn scholar_only_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let readme = dir.path().join("README.md");
        let opts = options(dir.path(), &scholar_only(readme.clone()));
        let stub = StubFetcher::with_pages(&[(GS, SCHOLAR_PAGE)]);

        let summary = run_update(&opts, stub.clone()).await.unwrap();

        let scholar = summary.record.scholar().unwrap();
        assert_eq!(scholar.name, "A. Researcher");
        assert_eq!(scholar.citations, 120);
        assert_eq!(scholar.h_index, 15);
        assert_eq!(scholar.i10_index, 6);
        assert!(summary.record.get(SourceId::ResearchGate).is_none());
        assert_eq!(stub.calls(), 1);

        let doc = fs::read_to_string(&readme).unwrap();
        assert!(doc.contains("- **Publications**: N/A\n"));
        assert!(doc.contains("- **Citations**: 120\n"));
        assert!(doc.contains("- **H-index**: 15\n"));
        assert!(doc.contains("- **i10-index**: 6\n"));
        assert!(doc.contains("*Last updated: "));
        assert!(!dir.path().join("README.md.tmp").exists());
    }

    #[tokio::test]
    async fn failing_sources_still_write_a_document() {
        let dir = tempfile::tempdir().unwrap();
        let readme = dir.path().join("out").join("README.md");
        let cfg = Config {
            readme_path: readme.clone(),
            ..Config::default()
        };
        let opts = options(dir.path(), &cfg);

        let summary = run_update(&opts, StubFetcher::default()).await.unwrap();
        assert_eq!(summary.output, readme);
        assert_eq!(summary.record.len(), 3);

        let doc = fs::read_to_string(&readme).unwrap();
        assert_eq!(doc.matches(": N/A\n").count(), 4);
    }

    #[tokio::test]
    async fn output_override_wins_and_replaces_previous() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("STATUS.md");
        fs::write(&target, "stale").unwrap();

        let mut opts = options(dir.path(), &scholar_only(dir.path().join("unused.md")));
        opts.output = Some(target.clone());
        run_update(&opts, StubFetcher::default()).await.unwrap();

        assert!(fs::read_to_string(&target).unwrap().starts_with("# "));
        assert!(!dir.path().join("unused.md").exists());
    }

    #[tokio::test]
    async fn malformed_config_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("dashboard_config.toml");
        fs::write(&config_path, "profiles = 3 = 4").unwrap();
        let readme = dir.path().join("README.md");
        fs::write(&readme, "previous").unwrap();

        let mut opts = RunOptions::new(&config_path);
        opts.output = Some(readme.clone());
        let stub = StubFetcher::default();

        assert!(run_update(&opts, stub.clone()).await.is_err());
        assert_eq!(stub.calls(), 0);
        assert_eq!(fs::read_to_string(&readme).unwrap(), "previous");
    }

    #[tokio::test]
    async fn missing_config_is_created_then_used() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("dashboard_config.toml");
        let mut opts = RunOptions::new(&config_path);
        opts.delay = Duration::ZERO;

        let (cfg, record) = collect(&opts, StubFetcher::default()).await.unwrap();
        assert!(config_path.exists());
        assert_eq!(cfg, Config::default());
        assert_eq!(record.len(), 3);
    }

    #[tokio::test]
    async fn preview_leaves_disk_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let readme = dir.path().join("README.md");
        let opts = options(dir.path(), &scholar_only(readme.clone()));
        let stub = StubFetcher::with_pages(&[(GS, SCHOLAR_PAGE)]);
        let at = chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();

        let doc = preview(&opts, stub, at).await.unwrap();
        assert!(doc.contains("- **Citations**: 120\n"));
        assert!(doc.ends_with("*Last updated: 2025-01-02 03:04:05*\n"));
        assert!(!readme.exists());
    }
}
