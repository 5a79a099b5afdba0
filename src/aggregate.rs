use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::Config;
use crate::net::Fetch;
use crate::profile::{CombinedRecord, SourceId};
use crate::sources::SourceClient;

/// Pause after each network-bound source so consecutive requests do not look
/// like a crawler.
pub const PACING_DELAY: Duration = Duration::from_secs(2);

/// Visits every configured source once, in `SourceId::ALL` order.
pub struct Aggregator<F> {
    fetcher: F,
    delay: Duration,
    progress: bool,
}

impl<F: Fetch + Clone> Aggregator<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            delay: PACING_DELAY,
            progress: false,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Draw a progress bar on stderr while collecting.
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    /// Clients for the sources present in `config`; the rest are skipped.
    pub fn clients(&self, config: &Config) -> Vec<SourceClient<F>> {
        SourceId::ALL
            .into_iter()
            .filter_map(|id| {
                let url = config.profiles.url(id)?;
                Some(SourceClient::new(id, url, self.fetcher.clone()))
            })
            .collect()
    }

    pub async fn collect(&self, config: &Config) -> CombinedRecord {
        let clients = self.clients(config);
        let pb = self.progress_bar(clients.len());
        let mut record = CombinedRecord::new();

        for client in &clients {
            pb.set_message(client.id().as_str());
            let profile = client.fetch_profile().await;
            if profile.is_empty() {
                info!("No data from {}", client.id());
            }
            record.insert(profile);
            pb.inc(1);

            if client.is_network_bound() && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        pb.finish_and_clear();
        if record.is_empty() {
            warn!("No profile URLs configured");
        }
        info!("Collected {} of {} sources", record.len(), SourceId::ALL.len());
        record
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:30} {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=> "));
        }
        pb
    }
}
