//! Evaluation-callback delivery
//!
//! The reporting collaborator: takes a finished [`FinalReport`] snapshot
//! and posts it to the configured evaluation endpoint. Delivery failures
//! are the caller's to log; nothing here can take the service down.

use async_trait::async_trait;

use honeypot_config::CallbackConfig;
use honeypot_core::FinalReport;

use crate::ServerError;

/// Destination for final reports
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn deliver(&self, report: &FinalReport) -> Result<(), ServerError>;
}

/// POSTs report JSON to the evaluation endpoint
pub struct HttpCallbackSink {
    client: reqwest::Client,
    url: String,
}

impl HttpCallbackSink {
    pub fn new(config: &CallbackConfig) -> Result<Self, ServerError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServerError::Callback(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl ReportSink for HttpCallbackSink {
    async fn deliver(&self, report: &FinalReport) -> Result<(), ServerError> {
        let response = self
            .client
            .post(&self.url)
            .json(report)
            .send()
            .await
            .map_err(|e| ServerError::Callback(e.to_string()))?;

        tracing::info!(
            session_id = %report.session_id,
            status = %response.status(),
            "final report delivered"
        );

        if !response.status().is_success() {
            return Err(ServerError::Callback(format!(
                "callback endpoint returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// No-op sink used when the callback is disabled
pub struct DisabledSink;

#[async_trait]
impl ReportSink for DisabledSink {
    async fn deliver(&self, report: &FinalReport) -> Result<(), ServerError> {
        tracing::debug!(
            session_id = %report.session_id,
            "callback disabled, report not delivered"
        );
        Ok(())
    }
}
