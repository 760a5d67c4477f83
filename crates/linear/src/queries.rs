//! GraphQL documents and the typed shapes of their responses.

use mirror::{Issue, IssueId, IssuePage};
use serde::{Deserialize, Serialize};

/// Page size is fixed in the document and must match `mirror::ISSUE_PAGE_SIZE`.
pub(crate) const ISSUES_QUERY: &str = r#"
query Issues($projectId: ID!, $after: String) {
  issues(filter: {project: {id: {eq: $projectId}}}, first: 100, after: $after) {
    nodes { id title description }
    pageInfo { hasNextPage endCursor }
  }
}
"#;

pub(crate) const ISSUE_UPDATE_MUTATION: &str = r#"
mutation IssueUpdate($id: String!, $description: String!) {
  issueUpdate(id: $id, input: { description: $description }) {
    success
    issue { id }
  }
}
"#;

// ---------------------------------------------------------------------------
// Request framing
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssuesVariables<'a> {
    pub project_id: &'a str,
    pub after: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct IssueUpdateVariables<'a> {
    pub id: &'a str,
    pub description: &'a str,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Top-level GraphQL envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssuesData {
    pub issues: IssueConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueConnection {
    pub nodes: Vec<IssueNode>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueNode {
    pub id: IssueId,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl From<IssueConnection> for IssuePage {
    fn from(connection: IssueConnection) -> Self {
        IssuePage {
            issues: connection
                .nodes
                .into_iter()
                .map(|node| Issue {
                    id: node.id,
                    title: node.title,
                    description: node.description,
                })
                .collect(),
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueUpdateData {
    pub issue_update: IssueUpdatePayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueUpdatePayload {
    pub success: bool,
    pub issue: Option<UpdatedIssue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdatedIssue {
    pub id: IssueId,
}
