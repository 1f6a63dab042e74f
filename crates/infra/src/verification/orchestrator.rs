use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use waterwatch_ai::{
    adjust_for_weather, AnalysisMethod, AnalysisRecord, ConfidenceModel, PollutionAnalyzer, RgbSampleAnalyzer,
    SatelliteSource, SimplifiedAnalyzer, VerificationResult, VerificationStats, WeatherSnapshot,
};
use waterwatch_core::ReportId;

use super::{SimulationDelay, VerificationError, VerificationRequest, NO_IMAGERY_REASON, TECHNICAL_FAILURE_REASON};
use crate::config::{AnalyzerKind, GatewayConfig};
use crate::gateway::{http_client, GatewayError, ImageryGateway, OpenWeatherGateway, SatelliteGateway, WeatherGateway};
use crate::history::VerificationHistory;

/// Build the analyzer selected by configuration.
pub fn analyzer_for(kind: AnalyzerKind, model: ConfidenceModel) -> Arc<dyn PollutionAnalyzer> {
    match kind {
        AnalyzerKind::Simplified => Arc::new(SimplifiedAnalyzer::new(model)),
        AnalyzerKind::RgbSample => Arc::new(RgbSampleAnalyzer::new(model)),
    }
}

/// Coordinates gateways, analyzer and history for each verification call.
///
/// Every public entry point returns a [`VerificationResult`]; failures degrade to
/// a rejection at the confidence floor instead of surfacing as errors.
pub struct VerificationOrchestrator {
    imagery: Arc<dyn ImageryGateway>,
    weather: Arc<dyn WeatherGateway>,
    analyzer: Arc<dyn PollutionAnalyzer>,
    model: ConfidenceModel,
    history: Arc<dyn VerificationHistory>,
    delay: SimulationDelay,
}

impl core::fmt::Debug for VerificationOrchestrator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VerificationOrchestrator")
            .field("model", &self.model)
            .field("history_len", &self.history.len())
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl VerificationOrchestrator {
    pub fn new(
        imagery: Arc<dyn ImageryGateway>,
        weather: Arc<dyn WeatherGateway>,
        analyzer: Arc<dyn PollutionAnalyzer>,
        history: Arc<dyn VerificationHistory>,
    ) -> Self {
        Self {
            imagery,
            weather,
            analyzer,
            model: ConfidenceModel::default(),
            history,
            delay: SimulationDelay::default(),
        }
    }

    /// Wire the live gateways from configuration. All providers share one HTTP
    /// client.
    pub fn from_config(cfg: &GatewayConfig, history: Arc<dyn VerificationHistory>) -> Result<Self, GatewayError> {
        let model = ConfidenceModel::default();
        let client = http_client(cfg.timeout)?;
        let imagery = Arc::new(SatelliteGateway::from_config(client.clone(), cfg));
        let weather = Arc::new(OpenWeatherGateway::from_config(client, cfg));
        let analyzer = analyzer_for(cfg.analyzer, model.clone());
        Ok(Self::new(imagery, weather, analyzer, history).with_model(model))
    }

    /// Model used by the simulate path (and the delay sampling).
    pub fn with_model(mut self, model: ConfidenceModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_delay(mut self, delay: SimulationDelay) -> Self {
        self.delay = delay;
        self
    }

    /// Full pipeline against the live gateways.
    pub async fn verify(&self, request: &VerificationRequest) -> VerificationResult {
        debug!(
            report_id = %request.report_id,
            pollution_type = %request.pollution_type,
            photo_url = %request.photo_url,
            "starting verification"
        );

        match self.try_verify(request).await {
            Ok(result) => result,
            Err(err) => {
                warn!(report_id = %request.report_id, error = %err, "verification failed");
                VerificationResult::rejected(
                    request.report_id,
                    Some(TECHNICAL_FAILURE_REASON.to_string()),
                    Some(err.to_string()),
                )
            }
        }
    }

    async fn try_verify(&self, request: &VerificationRequest) -> Result<VerificationResult, VerificationError> {
        let coordinates = request.coordinates()?;

        let Some(image) = self.imagery.fetch_image(coordinates, None).await else {
            warn!(report_id = %request.report_id, "no satellite imagery available");
            return Ok(VerificationResult::rejected(
                request.report_id,
                Some(NO_IMAGERY_REASON.to_string()),
                None,
            ));
        };

        let analysis = self.analyzer.analyze(&image, &request.pollution_type)?;
        let weather = self.weather.current(coordinates).await;
        let adjusted = adjust_for_weather(analysis.confidence, weather.as_ref());

        let record = analysis
            .record
            .with_satellite(image.source, Some(image.date))
            .with_weather(weather)
            .with_verification_time(Utc::now());
        let result = VerificationResult::decided(request.report_id, adjusted, record);

        self.history.record(result.clone());
        info!(
            report_id = %request.report_id,
            source = image.source.as_str(),
            status = %result.status,
            confidence = result.confidence,
            "verification complete"
        );
        Ok(result)
    }

    /// Offline path: no gateway calls, synthetic weather, artificial delay.
    pub async fn simulate(&self, request: &VerificationRequest) -> VerificationResult {
        let random = self.model.random();
        let delay = self.delay.sample(random.next_unit());
        debug!(report_id = %request.report_id, delay_ms = delay.as_millis() as u64, "simulating verification");
        tokio::time::sleep(delay).await;

        let confidence = self.model.score(&request.pollution_type);
        let weather = WeatherSnapshot::synthetic(&**random);
        let record = AnalysisRecord::new(
            request.pollution_type.clone(),
            confidence,
            AnalysisMethod::Simulated,
            Utc::now(),
        )
        .with_satellite(SatelliteSource::Simulated, None)
        .with_weather(Some(weather))
        .with_verification_time(Utc::now());
        let result = VerificationResult::decided(request.report_id, confidence, record);

        self.history.record(result.clone());
        info!(
            report_id = %request.report_id,
            status = %result.status,
            confidence = result.confidence,
            "simulated verification complete"
        );
        result
    }

    /// Verify each request in order. A failing item yields its own rejection and
    /// never aborts the batch.
    pub async fn batch_verify(&self, requests: &[VerificationRequest]) -> Vec<VerificationResult> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            results.push(self.verify(request).await);
        }
        info!(count = results.len(), "batch verification complete");
        results
    }

    pub fn stats(&self) -> VerificationStats {
        let all = self.history.all();
        VerificationStats::from_results(&all)
    }

    /// Most recent recorded result for a report, if any.
    pub fn history_for(&self, report_id: &ReportId) -> Option<VerificationResult> {
        self.history.get(report_id)
    }
}
