//! Client for the remote ML prediction service.
//!
//! The service is an opaque HTTP JSON endpoint; this module consumes its
//! contract and implements none of it. Calls are blocking request/response
//! with a single outstanding request and no automatic retry.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Employee feature record posted to `/api/predict`. Field names are the
/// service's wire contract and must not be renamed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Education_Level")]
    pub education_level: String,
    #[serde(rename = "Years_At_Company")]
    pub years_at_company: u32,
    #[serde(rename = "Monthly_Salary")]
    pub monthly_salary: f64,
    #[serde(rename = "Work_Hours_Per_Week")]
    pub work_hours_per_week: f64,
    #[serde(rename = "Projects_Handled")]
    pub projects_handled: u32,
    #[serde(rename = "Overtime_Hours")]
    pub overtime_hours: f64,
    #[serde(rename = "Sick_Days")]
    pub sick_days: u32,
    #[serde(rename = "Remote_Work_Frequency")]
    pub remote_work_frequency: String,
    #[serde(rename = "Team_Size")]
    pub team_size: u32,
    #[serde(rename = "Training_Hours")]
    pub training_hours: f64,
    #[serde(rename = "Promotions")]
    pub promotions: u32,
    #[serde(rename = "Employee_Satisfaction_Score")]
    pub employee_satisfaction_score: f64,
    #[serde(rename = "Job_Title")]
    pub job_title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Probabilities {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub performance_score: f64,
    pub confidence: f64,
    pub probabilities: Probabilities,
    pub risk_level: RiskBand,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

pub struct PredictionClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl PredictionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get("/api/health")
    }

    pub fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ApiError> {
        let url = self.endpoint("/api/predict");
        log::debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                source: e,
            })?;
        decode(url, response)
    }

    pub fn feature_importance(&self) -> Result<Vec<FeatureImportance>, ApiError> {
        self.get("/api/feature-importance")
    }

    fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        log::debug!("GET {url}");
        let response = self.http.get(&url).send().map_err(|e| ApiError::Transport {
            url: url.clone(),
            source: e,
        })?;
        decode(url, response)
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    url: String,
    response: reqwest::blocking::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    response.json().map_err(|e| ApiError::Decode { url, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> PredictRequest {
        PredictRequest {
            age: 34,
            gender: "Female".to_string(),
            department: "Engineering".to_string(),
            education_level: "Master".to_string(),
            years_at_company: 5,
            monthly_salary: 7200.0,
            work_hours_per_week: 42.0,
            projects_handled: 14,
            overtime_hours: 8.0,
            sick_days: 3,
            remote_work_frequency: "Hybrid".to_string(),
            team_size: 9,
            training_hours: 45.0,
            promotions: 1,
            employee_satisfaction_score: 4.2,
            job_title: "Senior Engineer".to_string(),
        }
    }

    #[test]
    fn test_request_uses_wire_field_names() {
        let json = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(json["Age"], 34);
        assert_eq!(json["Employee_Satisfaction_Score"], 4.2);
        assert_eq!(json["Job_Title"], "Senior Engineer");
        assert!(json.get("age").is_none());
    }

    #[test]
    fn test_response_decodes_contract() {
        let response: PredictResponse = serde_json::from_str(
            r#"{
                "performance_score": 82.4,
                "confidence": 0.91,
                "probabilities": {"low": 0.05, "medium": 0.25, "high": 0.70},
                "risk_level": "Low",
                "recommendations": ["Keep training cadence"]
            }"#,
        )
        .unwrap();
        assert_eq!(response.risk_level, RiskBand::Low);
        assert_eq!(response.probabilities.high, 0.70);
        assert_eq!(response.recommendations.len(), 1);
    }

    #[test]
    fn test_health_version_is_optional() {
        let health: HealthResponse =
            serde_json::from_str(r#"{"status": "ok", "model_loaded": true}"#).unwrap();
        assert!(health.version.is_none());

        let health: HealthResponse = serde_json::from_str(
            r#"{"status": "ok", "model_loaded": true, "version": "1.4.2"}"#,
        )
        .unwrap();
        assert_eq!(health.version.as_deref(), Some("1.4.2"));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = PredictionClient::new("http://localhost:8000/").unwrap();
        assert_eq!(
            client.endpoint("/api/health"),
            "http://localhost:8000/api/health"
        );
    }
}
