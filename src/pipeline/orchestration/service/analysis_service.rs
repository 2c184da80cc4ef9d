use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::common::StdRandom;
use crate::config::Configuration;
use crate::error::AppError;
use crate::intake::ImagePayload;
use crate::pipeline::domain::FoodAnalysis;
use crate::pipeline::orchestration::processing_pipeline::FoodAnalysisPipeline;
use crate::pipeline::services::recognition::ModelRegistry;
use chrono::{DateTime, Utc};
use futures::Future;
use futures::task::Context;
use futures::task::Poll;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::util::BoxService;
use tower::{Service, ServiceBuilder};
use tracing::{debug, info};
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// One submitted image plus correlation data for logging.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub request_id: Uuid,
    pub received_at: DateTime<Utc>,
    pub payload: ImagePayload,
}

impl AnalysisRequest {
    pub fn new(payload: ImagePayload) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            received_at: Utc::now(),
            payload,
        }
    }
}

#[derive(Clone)]
pub struct AnalysisService {
    registry: Arc<ModelRegistry>,
    configuration: Arc<Configuration>,
    request_counter: Arc<AtomicU64>,
}

impl AnalysisService {
    pub fn new(registry: Arc<ModelRegistry>, configuration: Arc<Configuration>) -> Self {
        Self {
            registry,
            configuration,
            request_counter: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Service<AnalysisRequest> for AnalysisService {
    type Response = FoodAnalysis;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: AnalysisRequest) -> Self::Future {
        let registry = self.registry.clone();
        let configuration = self.configuration.clone();
        let index = self.request_counter.fetch_add(1, Ordering::Relaxed);

        Box::pin(async move {
            let AnalysisRequest {
                request_id,
                received_at,
                payload,
            } = req;
            debug!("Request {} received at {}", request_id, received_at);

            // Decoding and the pipeline are CPU bound.
            let analysis = tokio::task::spawn_blocking(move || -> Result<FoodAnalysis, AppError> {
                let grid = payload.decode()?;
                let model = registry.get()?;
                let pipeline = FoodAnalysisPipeline::from_configuration(model, &configuration);
                let mut rng = match configuration.random_seed {
                    Some(seed) => StdRandom::seeded(seed.wrapping_add(index)),
                    None => StdRandom::from_entropy(),
                };
                Ok(pipeline.analyze_with_rng(grid, &mut rng))
            })
            .await
            .map_err(|e| AppError::Service(format!("Analysis task failed: {}", e)))??;

            info!(
                "Request {} -> {} (food={}, confidence {:.2}) in {}ms",
                request_id,
                analysis.name,
                analysis.is_food,
                analysis.confidence,
                (Utc::now() - received_at).num_milliseconds()
            );
            Ok::<_, BoxError>(analysis)
        })
    }
}

/// Map an error coming out of the service stack back to `AppError`.
pub fn into_app_error(error: BoxError) -> AppError {
    if error.is::<Elapsed>() {
        return AppError::Timeout;
    }
    match error.downcast::<AppError>() {
        Ok(app_error) => *app_error,
        Err(other) => AppError::Service(other.to_string()),
    }
}

pub struct AnalysisServiceBuilder {
    registry: Arc<ModelRegistry>,
    configuration: Arc<Configuration>,
    analysis_timeout: Option<Duration>,
}

impl AnalysisServiceBuilder {
    pub fn new(registry: Arc<ModelRegistry>, configuration: Arc<Configuration>) -> Self {
        let analysis_timeout = configuration.analysis_timeout();
        Self {
            registry,
            configuration,
            analysis_timeout,
        }
    }

    pub fn analysis_timeout(mut self, analysis_timeout: Duration) -> Self {
        self.analysis_timeout = Some(analysis_timeout);
        self
    }

    pub fn build(self) -> BoxService<AnalysisRequest, FoodAnalysis, BoxError> {
        let service = ServiceBuilder::new()
            .option_layer(self.analysis_timeout.map(TimeoutLayer::new))
            .service(AnalysisService::new(self.registry, self.configuration));
        BoxService::new(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PixelGrid;
    use crate::error::ImageDecodeError;
    use crate::pipeline::services::recognition::FoodRecognitionModel;
    use image::{ImageBuffer, Rgb};
    use tower::ServiceExt;

    fn registry() -> Arc<ModelRegistry> {
        Arc::new(ModelRegistry::new(|| FoodRecognitionModel::builder().build()))
    }

    fn pixels(rgb: [u8; 3]) -> ImagePayload {
        ImagePayload::Pixels(PixelGrid::new(ImageBuffer::from_pixel(16, 16, Rgb(rgb))).unwrap())
    }

    #[tokio::test]
    async fn test_dark_image_is_non_food() {
        let service = AnalysisServiceBuilder::new(registry(), Arc::new(Configuration::default())).build();
        let analysis = service
            .oneshot(AnalysisRequest::new(pixels([10, 10, 10])))
            .await
            .unwrap();
        assert_eq!(analysis.name, "Dark Scene");
        assert!(!analysis.is_food);
    }

    #[tokio::test]
    async fn test_invalid_payload_surfaces_decode_error() {
        let service = AnalysisServiceBuilder::new(registry(), Arc::new(Configuration::default())).build();
        let error = service
            .oneshot(AnalysisRequest::new(ImagePayload::Base64("%%%".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(
            into_app_error(error),
            AppError::ImageDecode(ImageDecodeError::InvalidBase64(_))
        ));
    }

    #[tokio::test]
    async fn test_seeded_services_are_reproducible() {
        let configuration = Arc::new(Configuration::default().with_random_seed(42));
        let first = AnalysisService::new(registry(), configuration.clone())
            .oneshot(AnalysisRequest::new(pixels([200, 200, 200])))
            .await
            .unwrap();
        let second = AnalysisService::new(registry(), configuration)
            .oneshot(AnalysisRequest::new(pixels([200, 200, 200])))
            .await
            .unwrap();
        assert!(first.is_food);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_requests_share_one_model() {
        let registry = registry();
        let mut service = AnalysisService::new(registry.clone(), Arc::new(Configuration::default()));
        for _ in 0..3 {
            let analysis = service
                .ready()
                .await
                .unwrap()
                .call(AnalysisRequest::new(pixels([200, 200, 200])))
                .await
                .unwrap();
            assert!(analysis.is_food);
        }
        assert!(registry.is_initialized());
    }

    #[tokio::test]
    async fn test_slow_analysis_times_out() {
        let registry = Arc::new(ModelRegistry::new(|| {
            std::thread::sleep(Duration::from_millis(300));
            FoodRecognitionModel::builder().build()
        }));
        let service = AnalysisServiceBuilder::new(registry, Arc::new(Configuration::default()))
            .analysis_timeout(Duration::from_millis(10))
            .build();
        let error = service
            .oneshot(AnalysisRequest::new(pixels([200, 200, 200])))
            .await
            .unwrap_err();
        assert!(matches!(into_app_error(error), AppError::Timeout));
    }
}
