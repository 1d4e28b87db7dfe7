// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! HTTP implementation of the member-registry collaborator.
//!
//! Queries a PostgREST-style table API:
//! `GET /rest/v1/members?github_username=eq.<name>&select=id,title`.
//! The "exactly one row" rule lives here: zero rows and multiple rows map to
//! distinct errors so the resolver can log the data-consistency gap.

use async_trait::async_trait;
use serde::Deserialize;

use crate::identity::{MemberRecord, MemberRegistry, RegistryError};

/// Member-registry client.
pub struct HttpMemberRegistry {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

/// One row of the members table, as returned by the REST API.
#[derive(Debug, Deserialize)]
struct MemberRow {
    id: i64,
    /// Titles are free text and occasionally null in old rows.
    #[serde(default)]
    title: Option<String>,
}

impl HttpMemberRegistry {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: super::http_client()?,
        })
    }
}

/// Apply the single-row rule to a query result.
fn single_record(mut rows: Vec<MemberRow>, username: &str) -> Result<MemberRecord, RegistryError> {
    match rows.len() {
        0 => Err(RegistryError::NotFound(username.to_string())),
        1 => {
            let row = rows.remove(0);
            Ok(MemberRecord {
                id: row.id,
                title: row.title.unwrap_or_default(),
            })
        }
        _ => Err(RegistryError::Ambiguous(username.to_string())),
    }
}

#[async_trait]
impl MemberRegistry for HttpMemberRegistry {
    async fn find_by_username(
        &self,
        provider_username: &str,
    ) -> Result<MemberRecord, RegistryError> {
        let response = self
            .client
            .get(format!("{}/rest/v1/members", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[
                ("github_username", format!("eq.{provider_username}")),
                ("select", "id,title".to_string()),
            ])
            .send()
            .await
            .map_err(|e| RegistryError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RegistryError::Backend(format!(
                "HTTP {} from registry",
                response.status()
            )));
        }

        let rows: Vec<MemberRow> = response
            .json()
            .await
            .map_err(|e| RegistryError::Backend(e.to_string()))?;

        single_record(rows, provider_username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_becomes_a_record() {
        let rows: Vec<MemberRow> =
            serde_json::from_str(r#"[{"id":42,"title":"Organiser"}]"#).unwrap();
        let record = single_record(rows, "octocat").unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.title, "Organiser");
    }

    #[test]
    fn zero_rows_is_not_found() {
        let result = single_record(Vec::new(), "octocat");
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[test]
    fn multiple_rows_are_ambiguous() {
        let rows: Vec<MemberRow> =
            serde_json::from_str(r#"[{"id":1,"title":"Basher"},{"id":2,"title":"Mentor"}]"#)
                .unwrap();
        let result = single_record(rows, "octocat");
        assert!(matches!(result, Err(RegistryError::Ambiguous(_))));
    }

    #[test]
    fn null_title_becomes_empty_string() {
        let rows: Vec<MemberRow> = serde_json::from_str(r#"[{"id":7,"title":null}]"#).unwrap();
        let record = single_record(rows, "octocat").unwrap();
        assert_eq!(record.title, "");
    }
}
