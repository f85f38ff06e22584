use crate::config::Config;
use crate::upstream::UpstreamClient;

/// Shared by every worker through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::new(&config.api_url, config.upstream_timeout)?;
        Ok(Self { upstream, config })
    }
}
