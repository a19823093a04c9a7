use chrono::NaiveDate;
use clap::ValueEnum;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use summerjob::config::PlannerConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) planner: PlannerConfig,
}

/// Output encoding for issue reports on the CLI and over HTTP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    AppState {
        readiness: Arc::new(AtomicBool::new(true)),
        metrics: Arc::new(recorder.handle()),
        planner: PlannerConfig::default(),
    }
}
