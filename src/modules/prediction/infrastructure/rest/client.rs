//! Adapter for the hosted backend's REST interface.
//!
//! Row-level security and authentication live in the backend; this client
//! only forwards the configured key. Failed calls are reported, never retried.

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::models::{eq_filter, order_clause, MatchRow, PredictionRow};
use crate::modules::prediction::domain::{
    NewPrediction, NewPredictionMatch, PredictionMatchRecord, PredictionRecord,
    PredictionRepository,
};
use crate::shared::config::BackendConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};

pub struct RestPredictionRepository {
    client: Client,
    config: BackendConfig,
}

impl RestPredictionRepository {
    pub fn new(config: BackendConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("tipdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.config.table_url(table))
            .header("apikey", &self.config.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.config.api_key))
    }

    async fn send(&self, operation: &str, table: &str, request: RequestBuilder) -> AppResult<Response> {
        LogContext::store_operation(operation, table, None);
        let timer = TimedOperation::new(&format!("store_{}_{}", operation, table));

        let response = request.send().await.map_err(|e| {
            LogContext::error_with_context(&e, &format!("{} on {} failed", operation, table));
            AppError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            timer.finish_with_info(&format!("HTTP {}", status.as_u16()));
            return Err(status_error(status, &body));
        }

        let duration = timer.finish();
        LogContext::store_operation(operation, table, Some(duration));
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &str,
        table: &str,
        request: RequestBuilder,
    ) -> AppResult<T> {
        let response = self.send(operation, table, request).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Map a non-success response to the error taxonomy
pub fn status_error(status: StatusCode, body: &str) -> AppError {
    let detail = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body.trim())
    };

    match status.as_u16() {
        401 | 403 => AppError::Unauthorized(detail),
        404 => AppError::NotFound(detail),
        400 | 409 | 422 => AppError::DatabaseError(detail),
        500..=599 => AppError::ExternalServiceError(detail),
        _ => AppError::ApiError(detail),
    }
}

#[async_trait]
impl PredictionRepository for RestPredictionRepository {
    async fn insert_prediction(&self, prediction: NewPrediction) -> AppResult<PredictionRecord> {
        let table = &self.config.predictions_table;
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&[PredictionRow::from(prediction)]);

        let rows: Vec<PredictionRecord> = self.fetch("insert", table, request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::DatabaseError("Insert returned no prediction row".to_string()))
    }

    async fn insert_matches(
        &self,
        prediction_id: Uuid,
        matches: Vec<NewPredictionMatch>,
    ) -> AppResult<()> {
        let table = &self.config.matches_table;
        let rows: Vec<MatchRow> = matches
            .into_iter()
            .map(|m| MatchRow::new(prediction_id, m))
            .collect();
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(&rows);

        self.send("insert", table, request).await?;
        Ok(())
    }

    async fn list_predictions(&self, limit: Option<usize>) -> AppResult<Vec<PredictionRecord>> {
        let table = &self.config.predictions_table;
        let mut query = vec![
            ("select".to_string(), "*".to_string()),
            order_clause("prediction_date", false),
        ];
        if let Some(limit) = limit {
            query.push(("limit".to_string(), limit.to_string()));
        }

        let request = self.request(Method::GET, table).query(&query);
        self.fetch("list", table, request).await
    }

    async fn list_matches(&self, prediction_id: Uuid) -> AppResult<Vec<PredictionMatchRecord>> {
        let table = &self.config.matches_table;
        let query = vec![
            ("select".to_string(), "*".to_string()),
            eq_filter("prediction_id", prediction_id),
            order_clause("match_date", true),
        ];

        let request = self.request(Method::GET, table).query(&query);
        self.fetch("list", table, request).await
    }

    async fn find_prediction(&self, id: Uuid) -> AppResult<Option<PredictionRecord>> {
        let table = &self.config.predictions_table;
        let query = vec![("select".to_string(), "*".to_string()), eq_filter("id", id)];

        let request = self.request(Method::GET, table).query(&query);
        let rows: Vec<PredictionRecord> = self.fetch("find", table, request).await?;
        Ok(rows.into_iter().next())
    }

    async fn update_prediction(&self, id: Uuid, prediction: NewPrediction) -> AppResult<()> {
        let table = &self.config.predictions_table;
        let request = self
            .request(Method::PATCH, table)
            .query(&[eq_filter("id", id)])
            .header("Prefer", "return=representation")
            .json(&PredictionRow::from(prediction));

        let rows: Vec<PredictionRecord> = self.fetch("update", table, request).await?;
        if rows.is_empty() {
            return Err(AppError::NotFound(format!("Prediction {} does not exist", id)));
        }
        Ok(())
    }

    async fn delete_matches(&self, prediction_id: Uuid) -> AppResult<()> {
        let table = &self.config.matches_table;
        let request = self
            .request(Method::DELETE, table)
            .query(&[eq_filter("prediction_id", prediction_id)]);

        self.send("delete", table, request).await?;
        Ok(())
    }

    async fn delete_prediction(&self, id: Uuid) -> AppResult<()> {
        // Match rows go with the parent through the backend's cascading foreign key
        let table = &self.config.predictions_table;
        let request = self
            .request(Method::DELETE, table)
            .query(&[eq_filter("id", id)]);

        self.send("delete", table, request).await?;
        Ok(())
    }
}
