//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;

use honeypot_agent::HoneypotAgent;
use honeypot_config::Settings;
use honeypot_detector::ScamDetector;

use crate::reporter::ReportSink;
use crate::session::SessionManager;

/// Everything a request handler needs
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sessions: Arc<SessionManager>,
    pub detector: Arc<ScamDetector>,
    pub agent: Arc<HoneypotAgent>,
    pub reporter: Arc<dyn ReportSink>,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(
        settings: Settings,
        reporter: Arc<dyn ReportSink>,
        metrics: PrometheusHandle,
    ) -> Self {
        let sessions = Arc::new(SessionManager::with_config(
            settings.server.max_sessions,
            Duration::from_secs(settings.server.session_timeout_secs),
            Duration::from_secs(settings.server.cleanup_interval_secs),
        ));

        Self {
            settings: Arc::new(settings),
            sessions,
            detector: Arc::new(ScamDetector::new()),
            agent: Arc::new(HoneypotAgent::default()),
            reporter,
            metrics,
        }
    }

    /// State with default settings, a disabled callback sink, and a
    /// detached metrics recorder
    #[cfg(test)]
    pub fn for_tests() -> Self {
        use metrics_exporter_prometheus::PrometheusBuilder;

        let handle = PrometheusBuilder::new().build_recorder().handle();
        Self::new(
            Settings::default(),
            Arc::new(crate::reporter::DisabledSink),
            handle,
        )
    }
}
