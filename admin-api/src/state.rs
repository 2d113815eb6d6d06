use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::i18n::Translator;
use crate::report_builder::{HttpReportBuilder, ReportBuilder};
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct AppState {
    pub service_name: String,
    pub clock: Arc<dyn Clock>,
    pub translator: Translator,
    pub report_builder: Arc<dyn ReportBuilder>,
}

impl AppState {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let rb = &cfg.report_builder;

        let timeout = Duration::from_secs(rb.timeout_secs.unwrap_or(5));
        let mut client_builder = Client::builder().timeout(timeout);
        if let Some(secs) = rb.connect_timeout_secs {
            client_builder = client_builder.connect_timeout(Duration::from_secs(secs));
        }
        let client = client_builder.build()?;
        debug!("HTTP client created with timeout: {:?}", timeout);

        // Parse and validate report builder URL at startup
        let url = Url::parse(&rb.url)
            .map_err(|e| anyhow::anyhow!("Invalid report builder URL '{}': {}", rb.url, e))?;
        if url.cannot_be_a_base() {
            anyhow::bail!("Invalid report builder URL '{}': cannot be a base", rb.url);
        }
        info!("Registered report builder: url='{}'", url);

        let max_outbound = rb.max_outbound_concurrency.unwrap_or(32);
        if max_outbound == 0 {
            anyhow::bail!("report_builder.max_outbound_concurrency must be at least 1");
        }
        debug!("Report builder limited to {} concurrent request(s)", max_outbound);

        let default_locale = cfg.default_locale.clone().unwrap_or_else(|| "en".into());
        let translator = Translator::new(default_locale, &cfg.messages);

        Ok(AppState {
            service_name: cfg
                .service_name
                .clone()
                .unwrap_or_else(|| "backend".into()),
            clock: Arc::new(SystemClock),
            translator,
            report_builder: Arc::new(HttpReportBuilder::new(
                client,
                url,
                rb.token.clone(),
                max_outbound,
                timeout,
            )),
        })
    }
}
