//! REST adapter for the lead backend. Implements `LeadApiPort` with reqwest.
//!
//! One request per call: no retries, no client-side timeout. Non-OK responses become
//! `DomainError::Api` carrying the body's `detail` message when the server supplies one.

use crate::domain::{
    CompanyProfile, DiscoveredLead, DomainError, LeadUpdate, Proposals, SaveLeadRequest,
    SavedCheck, SavedLead, Sector,
};
use crate::ports::LeadApiPort;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// HTTP client for the lead backend.
pub struct HttpLeadApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLeadApi {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g., "http://localhost:8000"); a trailing slash is ignored
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "backend request");
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Send and decode a JSON body, mapping non-OK statuses to `DomainError::Api`.
    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        req: RequestBuilder,
    ) -> Result<T, DomainError> {
        let response = req
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("{}: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, path, body = %text.chars().take(200).collect::<String>(), "backend returned error");
            return Err(DomainError::Api {
                status: status.as_u16(),
                message: error_message(status, &text),
            });
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::Decode(format!("{}: {}", path, e)))
    }
}

/// FastAPI-style error body. `detail` is a string for handled errors,
/// a list of objects for validation failures.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Message for a non-OK response: the body's `detail` string, else a generic one.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| match b.detail {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

#[derive(Serialize)]
struct DiscoverRequest<'a> {
    sectors: &'a [String],
    profile: &'a CompanyProfile,
}

#[derive(Serialize)]
struct ProposalRequest<'a> {
    lead: &'a DiscoveredLead,
    company_profile: &'a CompanyProfile,
}

#[derive(Deserialize)]
struct DeleteResponse {
    #[allow(dead_code)]
    #[serde(default)]
    message: Option<String>,
}

#[async_trait::async_trait]
impl LeadApiPort for HttpLeadApi {
    async fn identify_sectors(&self, profile: &CompanyProfile) -> Result<Vec<Sector>, DomainError> {
        let path = "/sectors/identify";
        self.send(path, self.request(Method::POST, path).json(profile))
            .await
    }

    async fn list_sectors(&self) -> Result<Vec<Sector>, DomainError> {
        let path = "/sectors";
        self.send(path, self.request(Method::GET, path)).await
    }

    async fn list_profiles(&self) -> Result<Vec<CompanyProfile>, DomainError> {
        let path = "/company-profiles";
        self.send(path, self.request(Method::GET, path)).await
    }

    async fn create_profile(&self, profile: &CompanyProfile) -> Result<CompanyProfile, DomainError> {
        let path = "/company-profiles";
        self.send(path, self.request(Method::POST, path).json(profile))
            .await
    }

    async fn update_profile(
        &self,
        id: i64,
        profile: &CompanyProfile,
    ) -> Result<CompanyProfile, DomainError> {
        let path = format!("/company-profiles/{}", id);
        self.send(&path, self.request(Method::PUT, &path).json(profile))
            .await
    }

    async fn discover_leads(
        &self,
        sectors: &[String],
        profile: &CompanyProfile,
    ) -> Result<Vec<DiscoveredLead>, DomainError> {
        let path = "/leads/discover";
        let body = DiscoverRequest { sectors, profile };
        self.send(path, self.request(Method::POST, path).json(&body))
            .await
    }

    async fn generate_proposals(
        &self,
        lead: &DiscoveredLead,
        profile: &CompanyProfile,
    ) -> Result<Proposals, DomainError> {
        let path = "/leads/generate-proposals";
        let body = ProposalRequest {
            lead,
            company_profile: profile,
        };
        self.send(path, self.request(Method::POST, path).json(&body))
            .await
    }

    async fn list_saved_leads(&self) -> Result<Vec<SavedLead>, DomainError> {
        let path = "/leads/saved";
        self.send(path, self.request(Method::GET, path)).await
    }

    async fn check_saved(
        &self,
        company_name: &str,
        website_url: Option<&str>,
    ) -> Result<SavedCheck, DomainError> {
        let path = "/leads/check-saved";
        let mut query = vec![("company_name", company_name)];
        if let Some(url) = website_url {
            query.push(("website_url", url));
        }
        self.send(path, self.request(Method::GET, path).query(&query))
            .await
    }

    async fn save_lead(
        &self,
        lead: &DiscoveredLead,
        discovered_sectors: &[String],
    ) -> Result<SavedLead, DomainError> {
        let path = "/leads/save";
        let body = SaveLeadRequest {
            lead,
            discovered_sectors,
        };
        self.send(path, self.request(Method::POST, path).json(&body))
            .await
    }

    async fn update_lead(&self, id: i64, update: &LeadUpdate) -> Result<SavedLead, DomainError> {
        let path = format!("/leads/{}", id);
        self.send(&path, self.request(Method::PUT, &path).json(update))
            .await
    }

    async fn delete_lead(&self, id: i64) -> Result<(), DomainError> {
        let path = format!("/leads/{}", id);
        let _: DeleteResponse = self.send(&path, self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LeadPriority, LeadStatus};
    use axum::extract::{Json, Path, Query};
    use axum::http::StatusCode as AxStatus;
    use axum::routing::{get, post, put};
    use axum::Router;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn profile_json(id: i64, name: &str) -> Value {
        json!({
            "id": id,
            "company_name": name,
            "location": "Berlin",
            "description": "Automation studio",
            "team_size": 4,
            "core_services": ["RPA"],
            "languages": ["German", "English"],
            "special_offer": "",
            "created_at": "2024-05-01 10:00:00",
            "updated_at": "2024-05-01 10:00:00"
        })
    }

    fn saved_json(id: i64, body: &Value) -> Value {
        json!({
            "id": id,
            "company_name": body["lead"]["company_name"],
            "website_url": body["lead"]["website_url"],
            "discovered_sectors": body["discovered_sectors"],
            "status": "new",
            "priority": "medium",
            "notes": null,
            "discovered_at": "2024-05-01 10:00:00",
            "created_at": "2024-05-01 10:00:00",
            "updated_at": "2024-05-01 10:00:00"
        })
    }

    async fn spawn_backend() -> HttpLeadApi {
        let app = Router::new()
            .route(
                "/company-profiles",
                post(|Json(body): Json<Value>| async move {
                    let name = body["company_name"].as_str().unwrap_or_default().to_string();
                    Json(profile_json(1, &name))
                }),
            )
            .route(
                "/company-profiles/{id}",
                put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                    let name = format!("{} (updated)", body["company_name"].as_str().unwrap_or_default());
                    Json(profile_json(id, &name))
                }),
            )
            .route(
                "/leads/save",
                post(|Json(body): Json<Value>| async move {
                    if body["lead"]["company_name"] == "Dup" {
                        return (AxStatus::CONFLICT, Json(json!({"detail": "Lead already saved"})));
                    }
                    (AxStatus::OK, Json(saved_json(42, &body)))
                }),
            )
            .route(
                "/leads/saved",
                get(|| async { (AxStatus::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route(
                "/leads/{id}",
                put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                    let mut lead = saved_json(id, &json!({"lead": {"company_name": "Acme"}, "discovered_sectors": []}));
                    lead["status"] = body["status"].clone();
                    lead["priority"] = body["priority"].clone();
                    lead["notes"] = body["notes"].clone();
                    Json(lead)
                })
                .delete(|Path(id): Path<i64>| async move {
                    if id == 404 {
                        return (AxStatus::NOT_FOUND, Json(json!({"detail": "Lead not found"})));
                    }
                    (AxStatus::OK, Json(json!({"message": "Lead deleted successfully"})))
                }),
            )
            .route(
                "/leads/check-saved",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    let saved = q.get("company_name").map(String::as_str) == Some("Acme")
                        && q.get("website_url").map(String::as_str) == Some("https://acme.de");
                    let lead_id: Option<i64> = saved.then_some(3);
                    Json(json!({"is_saved": saved, "lead_id": lead_id}))
                }),
            )
            .route(
                "/leads/generate-proposals",
                post(|Json(body): Json<Value>| async move {
                    let name = body["lead"]["company_name"].as_str().unwrap_or_default().to_string();
                    let owner = body["company_profile"]["company_name"].as_str().unwrap_or_default().to_string();
                    Json(json!({
                        "automation_email": {
                            "formal": format!("Dear {}, {} here.", name, owner),
                            "semi_formal": "Hello",
                            "informal": "Hey"
                        },
                        "linkedin_message": "Let's connect"
                    }))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        HttpLeadApi::new(format!("http://{}/", addr))
    }

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(StatusCode::CONFLICT, r#"{"detail":"Lead already saved"}"#),
            "Lead already saved"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_generic() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            "Request failed with status 500"
        );
        assert_eq!(
            error_message(StatusCode::UNPROCESSABLE_ENTITY, r#"{"detail":[{"loc":["body"]}]}"#),
            "Request failed with status 422"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpLeadApi::new("http://localhost:8000/");
        assert_eq!(api.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_create_and_update_profile() {
        let api = spawn_backend().await;
        let draft = CompanyProfile {
            company_name: "Studio".into(),
            ..Default::default()
        };
        let created = api.create_profile(&draft).await.unwrap();
        assert_eq!(created.id, Some(1));
        assert_eq!(created.company_name, "Studio");
        assert_eq!(created.languages, vec!["German", "English"]);

        let updated = api.update_profile(9, &draft).await.unwrap();
        assert_eq!(updated.id, Some(9));
        assert_eq!(updated.company_name, "Studio (updated)");
    }

    #[tokio::test]
    async fn test_save_lead_and_conflict_detail() {
        let api = spawn_backend().await;
        let lead = DiscoveredLead {
            company_name: "Acme".into(),
            website_url: Some("https://acme.de".into()),
            ..Default::default()
        };
        let sectors = vec!["Logistics".to_string()];
        let saved = api.save_lead(&lead, &sectors).await.unwrap();
        assert_eq!(saved.id, 42);
        assert_eq!(saved.discovered_sectors, sectors);

        let dup = DiscoveredLead {
            company_name: "Dup".into(),
            ..Default::default()
        };
        let err = api.save_lead(&dup, &sectors).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(err.to_string(), "Lead already saved");
    }

    #[tokio::test]
    async fn test_non_ok_without_detail_is_generic() {
        let api = spawn_backend().await;
        let err = api.list_saved_leads().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[tokio::test]
    async fn test_update_and_delete_lead() {
        let api = spawn_backend().await;
        let update = LeadUpdate {
            status: LeadStatus::Qualified,
            priority: LeadPriority::High,
            notes: "call monday".into(),
        };
        let lead = api.update_lead(5, &update).await.unwrap();
        assert_eq!(lead.id, 5);
        assert_eq!(lead.status, LeadStatus::Qualified);
        assert_eq!(lead.notes.as_deref(), Some("call monday"));

        api.delete_lead(5).await.unwrap();
        let err = api.delete_lead(404).await.unwrap_err();
        assert_eq!(err.to_string(), "Lead not found");
    }

    #[tokio::test]
    async fn test_check_saved_sends_query() {
        let api = spawn_backend().await;
        let hit = api.check_saved("Acme", Some("https://acme.de")).await.unwrap();
        assert_eq!(hit, SavedCheck { is_saved: true, lead_id: Some(3) });
        let miss = api.check_saved("Acme", None).await.unwrap();
        assert!(!miss.is_saved);
    }

    #[tokio::test]
    async fn test_generate_proposals_mixed_shapes() {
        let api = spawn_backend().await;
        let lead = DiscoveredLead {
            company_name: "Acme".into(),
            ..Default::default()
        };
        let profile = CompanyProfile {
            company_name: "Studio".into(),
            ..Default::default()
        };
        let proposals = api.generate_proposals(&lead, &profile).await.unwrap();
        assert_eq!(
            proposals.automation_email.text_for(crate::domain::ToneVariant::Formal),
            Some("Dear Acme, Studio here.")
        );
        assert_eq!(
            proposals.linkedin_message.text_for(crate::domain::ToneVariant::Informal),
            Some("Let's connect")
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let api = HttpLeadApi::new("http://127.0.0.1:1");
        let err = api.list_sectors().await.unwrap_err();
        assert!(matches!(err, DomainError::Transport(_)));
    }
}
