/// Test helper functions and service builders
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tipdesk_lib::modules::data_import::ImportService;
use tipdesk_lib::modules::prediction::domain::{
    NewPrediction, NewPredictionMatch, PredictionMatchRecord, PredictionRecord,
    PredictionRepository,
};
use tipdesk_lib::modules::prediction::{InMemoryPredictionRepository, PredictionService};
use tipdesk_lib::shared::errors::{AppError, AppResult};
use uuid::Uuid;

/// In-memory store that can be told to fail specific writes
#[derive(Default)]
pub struct FlakyRepository {
    pub inner: InMemoryPredictionRepository,
    failing_parent_dates: Mutex<Vec<NaiveDate>>,
    failing_match_dates: Mutex<Vec<NaiveDate>>,
    fail_deletes: Mutex<bool>,
    pub delete_calls: AtomicUsize,
}

impl FlakyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parent insert fails for predictions dated `day`
    pub fn fail_parent_on(self, day: NaiveDate) -> Self {
        self.failing_parent_dates.lock().unwrap().push(day);
        self
    }

    /// Match insert fails for parents dated `day`
    pub fn fail_matches_on(self, day: NaiveDate) -> Self {
        self.failing_match_dates.lock().unwrap().push(day);
        self
    }

    pub fn fail_deletes(self) -> Self {
        *self.fail_deletes.lock().unwrap() = true;
        self
    }
}

#[async_trait]
impl PredictionRepository for FlakyRepository {
    async fn insert_prediction(&self, prediction: NewPrediction) -> AppResult<PredictionRecord> {
        if self
            .failing_parent_dates
            .lock()
            .unwrap()
            .contains(&prediction.prediction_date)
        {
            return Err(AppError::ExternalServiceError(
                "503 Service Unavailable".to_string(),
            ));
        }
        self.inner.insert_prediction(prediction).await
    }

    async fn insert_matches(
        &self,
        prediction_id: Uuid,
        matches: Vec<NewPredictionMatch>,
    ) -> AppResult<()> {
        let parent = self.inner.find_prediction(prediction_id).await?;
        let failing = self.failing_match_dates.lock().unwrap().clone();
        if parent.map_or(false, |p| failing.contains(&p.prediction_date)) {
            return Err(AppError::DatabaseError(
                "400 Bad Request: invalid input syntax for type numeric".to_string(),
            ));
        }
        self.inner.insert_matches(prediction_id, matches).await
    }

    async fn list_predictions(&self, limit: Option<usize>) -> AppResult<Vec<PredictionRecord>> {
        self.inner.list_predictions(limit).await
    }

    async fn list_matches(&self, prediction_id: Uuid) -> AppResult<Vec<PredictionMatchRecord>> {
        self.inner.list_matches(prediction_id).await
    }

    async fn find_prediction(&self, id: Uuid) -> AppResult<Option<PredictionRecord>> {
        self.inner.find_prediction(id).await
    }

    async fn update_prediction(&self, id: Uuid, prediction: NewPrediction) -> AppResult<()> {
        self.inner.update_prediction(id, prediction).await
    }

    async fn delete_matches(&self, prediction_id: Uuid) -> AppResult<()> {
        self.inner.delete_matches(prediction_id).await
    }

    async fn delete_prediction(&self, id: Uuid) -> AppResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_deletes.lock().unwrap() {
            return Err(AppError::ExternalServiceError("502 Bad Gateway".to_string()));
        }
        self.inner.delete_prediction(id).await
    }
}

pub struct TestServices {
    pub prediction_service: Arc<PredictionService>,
    pub import_service: ImportService,
}

/// Build the services over any repository
pub fn build_services(repository: Arc<dyn PredictionRepository>) -> TestServices {
    let prediction_service = Arc::new(PredictionService::new(repository));
    let import_service = ImportService::new(Arc::clone(&prediction_service));
    TestServices {
        prediction_service,
        import_service,
    }
}
