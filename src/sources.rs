use tracing::{debug, info, warn};

use crate::extract;
use crate::net::Fetch;
use crate::profile::{LinkedInProfile, ResearchGateProfile, ScholarProfile, SourceId, SourceProfile};

/// Fetch `url` and run `extract` over the body. Any fetch failure is logged
/// and degrades to the default profile.
async fn fetch_or_default<F, P>(
    fetcher: &F,
    id: SourceId,
    url: &str,
    extract: fn(&str) -> P,
) -> P
where
    F: Fetch,
    P: Default,
{
    match fetcher.fetch(url).await {
        Ok(body) => {
            info!("Fetched {} ({} bytes)", id, body.len());
            extract(&body)
        }
        Err(e) => {
            warn!("Error scraping {}: {}", id, e);
            P::default()
        }
    }
}

pub struct ResearchGateClient<F> {
    url: String,
    fetcher: F,
}

impl<F: Fetch> ResearchGateClient<F> {
    pub fn new(url: impl Into<String>, fetcher: F) -> Self {
        Self {
            url: url.into(),
            fetcher,
        }
    }

    pub async fn fetch_profile(&self) -> ResearchGateProfile {
        fetch_or_default(
            &self.fetcher,
            SourceId::ResearchGate,
            &self.url,
            extract::researchgate::extract,
        )
        .await
    }
}

pub struct ScholarClient<F> {
    url: String,
    fetcher: F,
}

impl<F: Fetch> ScholarClient<F> {
    pub fn new(url: impl Into<String>, fetcher: F) -> Self {
        Self {
            url: url.into(),
            fetcher,
        }
    }

    pub async fn fetch_profile(&self) -> ScholarProfile {
        fetch_or_default(
            &self.fetcher,
            SourceId::GoogleScholar,
            &self.url,
            extract::scholar::extract,
        )
        .await
    }
}

/// LinkedIn serves profiles only to signed-in sessions, so there is nothing to
/// scrape. The client keeps the configured URL and always reports the fixed
/// empty profile without touching the network.
pub struct LinkedInClient {
    url: String,
}

impl LinkedInClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn fetch_profile(&self) -> LinkedInProfile {
        debug!("Skipping network read for {}", self.url);
        LinkedInProfile {
            current_position: String::new(),
            education: String::new(),
            experience: Vec::new(),
        }
    }
}

/// A configured client for one source.
pub enum SourceClient<F> {
    ResearchGate(ResearchGateClient<F>),
    GoogleScholar(ScholarClient<F>),
    LinkedIn(LinkedInClient),
}

impl<F: Fetch> SourceClient<F> {
    pub fn new(id: SourceId, url: impl Into<String>, fetcher: F) -> Self {
        match id {
            SourceId::ResearchGate => Self::ResearchGate(ResearchGateClient::new(url, fetcher)),
            SourceId::GoogleScholar => Self::GoogleScholar(ScholarClient::new(url, fetcher)),
            SourceId::LinkedIn => Self::LinkedIn(LinkedInClient::new(url)),
        }
    }

    pub fn id(&self) -> SourceId {
        match self {
            Self::ResearchGate(_) => SourceId::ResearchGate,
            Self::GoogleScholar(_) => SourceId::GoogleScholar,
            Self::LinkedIn(_) => SourceId::LinkedIn,
        }
    }

    pub fn is_network_bound(&self) -> bool {
        !matches!(self, Self::LinkedIn(_))
    }

    pub async fn fetch_profile(&self) -> SourceProfile {
        match self {
            Self::ResearchGate(c) => SourceProfile::ResearchGate(c.fetch_profile().await),
            Self::GoogleScholar(c) => SourceProfile::GoogleScholar(c.fetch_profile().await),
            Self::LinkedIn(c) => SourceProfile::LinkedIn(c.fetch_profile()),
        }
    }
}
