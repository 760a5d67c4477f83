//! HTTP transport for the Linear GraphQL API.

use async_trait::async_trait;
use mirror::{CollectionId, IssueId, IssuePage, IssueTracker, TrackerError};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::queries::{
    GraphQlRequest, GraphQlResponse, IssueUpdateData, IssueUpdateVariables, IssuesData,
    IssuesVariables, ISSUES_QUERY, ISSUE_UPDATE_MUTATION,
};

/// Linear's public GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.linear.app/graphql";

/// Connection settings for [`LinearClient`].
#[derive(Clone)]
pub struct LinearConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Personal API key, sent verbatim as the `Authorization` header.
    pub api_key: String,
}

impl std::fmt::Debug for LinearConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// [`IssueTracker`] backed by Linear.
#[derive(Debug, Clone)]
pub struct LinearClient {
    http: reqwest::Client,
    config: LinearConfig,
}

impl LinearClient {
    /// Creates a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Transport`] if the HTTP client cannot be
    /// constructed (e.g. the TLS backend fails to initialise).
    pub fn new(config: LinearConfig) -> Result<Self, TrackerError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("docs-mirror/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TrackerError::Transport {
                message: e.to_string(),
            })?;
        Ok(Self { http, config })
    }

    /// Posts one GraphQL operation and decodes its `data` as `T`.
    async fn execute<V, T>(&self, query: &str, variables: V) -> Result<T, TrackerError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header(AUTHORIZATION, self.config.api_key.as_str())
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| TrackerError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TrackerError::Transport {
            message: e.to_string(),
        })?;
        interpret_response(status, &body)
    }
}

/// Turns a raw HTTP status and body into the decoded `data` payload.
///
/// Non-success statuses and non-empty `errors` lists are failures carrying
/// the raw payload.
pub(crate) fn interpret_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<T, TrackerError> {
    if !(200..300).contains(&status) {
        return Err(TrackerError::Http {
            status,
            body: body.to_string(),
        });
    }

    let envelope: GraphQlResponse<T> =
        serde_json::from_str(body).map_err(|e| TrackerError::Decode {
            message: e.to_string(),
        })?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        return Err(TrackerError::Api {
            errors: serde_json::Value::Array(errors).to_string(),
        });
    }

    envelope.data.ok_or_else(|| TrackerError::Decode {
        message: "response carries neither data nor errors".to_string(),
    })
}

#[async_trait]
impl IssueTracker for LinearClient {
    #[instrument(skip(self, collection), fields(collection = %collection))]
    async fn fetch_issue_page(
        &self,
        collection: &CollectionId,
        after: Option<&str>,
    ) -> Result<IssuePage, TrackerError> {
        let variables = IssuesVariables {
            project_id: collection.as_str(),
            after,
        };
        let data: IssuesData = self.execute(ISSUES_QUERY, variables).await?;
        Ok(data.issues.into())
    }

    #[instrument(skip(self, issue, description), fields(issue = %issue, bytes = description.len()))]
    async fn update_issue_description(
        &self,
        issue: &IssueId,
        description: &str,
    ) -> Result<(), TrackerError> {
        let variables = IssueUpdateVariables {
            id: issue.as_str(),
            description,
        };
        let data: IssueUpdateData = self.execute(ISSUE_UPDATE_MUTATION, variables).await?;
        let payload = data.issue_update;
        if !payload.success {
            return Err(TrackerError::Api {
                errors: format!("issueUpdate for {issue} reported success: false"),
            });
        }
        debug!(updated = ?payload.issue.map(|i| i.id), "Issue description replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_issue_page() {
        let body = r#"{
            "data": {
                "issues": {
                    "nodes": [
                        {"id": "i1", "title": "A", "description": "```mirror-meta\nsource_path: docs/a.md\n```"},
                        {"id": "i2", "title": "B", "description": null}
                    ],
                    "pageInfo": {"hasNextPage": true, "endCursor": "c-1"}
                }
            }
        }"#;

        let data: IssuesData = interpret_response(200, body).unwrap();
        let page: IssuePage = data.issues.into();

        assert_eq!(page.issues.len(), 2);
        assert_eq!(page.issues[0].id.as_str(), "i1");
        assert!(page.issues[1].description.is_none());
        assert!(page.has_next_page);
        assert_eq!(page.end_cursor.as_deref(), Some("c-1"));
    }

    #[test]
    fn test_decodes_update_result() {
        let body = r#"{"data": {"issueUpdate": {"success": true, "issue": {"id": "i1"}}}}"#;

        let data: IssueUpdateData = interpret_response(200, body).unwrap();

        assert!(data.issue_update.success);
        assert_eq!(data.issue_update.issue.unwrap().id.as_str(), "i1");
    }

    #[test]
    fn test_non_success_status_carries_body() {
        let err = interpret_response::<IssuesData>(401, "unauthorized").unwrap_err();

        assert_eq!(
            err,
            TrackerError::Http {
                status: 401,
                body: "unauthorized".to_string()
            }
        );
    }

    #[test]
    fn test_error_list_is_fatal_even_with_data() {
        let body = r#"{
            "data": {"issueUpdate": {"success": true, "issue": null}},
            "errors": [{"message": "Entity not found"}]
        }"#;

        let err = interpret_response::<IssueUpdateData>(200, body).unwrap_err();

        match err {
            TrackerError::Api { errors } => assert!(errors.contains("Entity not found")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_error_list_is_ignored() {
        let body = r#"{"data": {"issueUpdate": {"success": true, "issue": null}}, "errors": []}"#;

        let data: IssueUpdateData = interpret_response(200, body).unwrap();

        assert!(data.issue_update.success);
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = interpret_response::<IssuesData>(200, "<html>").unwrap_err();
        assert!(matches!(err, TrackerError::Decode { .. }));

        let err = interpret_response::<IssuesData>(200, r#"{"data": null}"#).unwrap_err();
        assert!(matches!(err, TrackerError::Decode { .. }));
    }

    #[test]
    fn test_request_body_shape() {
        let request = GraphQlRequest {
            query: ISSUES_QUERY,
            variables: IssuesVariables {
                project_id: "p1",
                after: None,
            },
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["variables"]["projectId"], "p1");
        assert!(json["variables"]["after"].is_null());
        assert!(json["variables"].get("first").is_none());
        assert!(json["query"].as_str().unwrap().contains("pageInfo"));
    }

    #[test]
    fn test_issues_query_requests_full_pages() {
        let first = format!("first: {},", mirror::ISSUE_PAGE_SIZE);
        assert!(ISSUES_QUERY.contains(&first));
        assert!(!ISSUES_QUERY.contains("$first"));
    }

    #[test]
    fn test_empty_issue_id_is_decode_error() {
        let body = r#"{
            "data": {
                "issues": {
                    "nodes": [{"id": "", "title": "A", "description": null}],
                    "pageInfo": {"hasNextPage": false, "endCursor": null}
                }
            }
        }"#;

        let err = interpret_response::<IssuesData>(200, body).unwrap_err();

        match err {
            TrackerError::Decode { message } => assert!(message.contains("IssueId")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = LinearConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: "lin_api_secret".to_string(),
        };

        let rendered = format!("{config:?}");

        assert!(!rendered.contains("lin_api_secret"));
        assert!(rendered.contains(DEFAULT_ENDPOINT));
    }
}
