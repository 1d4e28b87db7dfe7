// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! Role predicates over the resolved identity.
//!
//! Registry titles are free text, so these are string checks rather than a
//! closed enum. Each predicate is a full resolution and therefore benefits
//! from (and is bounded by) the identity cache.

use serde::Serialize;
use utoipa::ToSchema;

use super::principal::{Principal, SessionToken};
use super::resolver::IdentityResolver;

/// Title spellings that carry organiser privileges.
///
/// The registry has accumulated both dialects and several casings; all are
/// honoured.
const ORGANISER_TITLES: [&str; 6] = [
    "Organiser", "organiser", "ORGANISER",
    "Organizer", "organizer", "ORGANIZER",
];

/// Result of the organiser check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrganiserStatus {
    /// Whether the acting user holds an organiser title.
    pub is_organiser: bool,
    /// The organiser's registry row ID, set only when `is_organiser`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organiser_id: Option<i64>,
}

impl OrganiserStatus {
    fn denied() -> Self {
        Self {
            is_organiser: false,
            organiser_id: None,
        }
    }
}

/// Organiser check over an already-resolved principal.
pub fn organiser_status(principal: &Principal) -> OrganiserStatus {
    if ORGANISER_TITLES.contains(&principal.title.as_str()) {
        OrganiserStatus {
            is_organiser: true,
            organiser_id: Some(principal.member_id),
        }
    } else {
        OrganiserStatus::denied()
    }
}

impl IdentityResolver {
    /// Check whether the session belongs to an organiser.
    pub async fn is_organiser(&self, token: &SessionToken) -> OrganiserStatus {
        match self.resolve(token).await {
            Some(principal) => organiser_status(&principal),
            None => OrganiserStatus::denied(),
        }
    }

    /// Check whether the session belongs to a mentor.
    ///
    /// Exact match on "Mentor". Unlike the organiser check this is
    /// case-sensitive; the asymmetry is inherited behavior, do not unify
    /// the two without confirming intent with the organisers.
    pub async fn is_mentor(&self, token: &SessionToken) -> bool {
        match self.resolve(token).await {
            Some(principal) => principal.title == "Mentor",
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::identity::cache::IdentityCache;
    use crate::identity::error::{AuthProviderError, RegistryError};
    use crate::identity::principal::SessionUser;
    use crate::identity::resolver::{AuthProvider, MemberRecord, MemberRegistry};

    /// Collaborator double resolving every session to a fixed title.
    struct FixedTitle {
        title: String,
    }

    #[async_trait]
    impl AuthProvider for FixedTitle {
        async fn get_current_user(
            &self,
            _token: &SessionToken,
        ) -> Result<Option<SessionUser>, AuthProviderError> {
            Ok(Some(SessionUser {
                id: "user_1".to_string(),
                provider_username: "octocat".to_string(),
            }))
        }

        async fn sign_out(&self, _token: &SessionToken) -> Result<(), AuthProviderError> {
            Ok(())
        }
    }

    #[async_trait]
    impl MemberRegistry for FixedTitle {
        async fn find_by_username(
            &self,
            _provider_username: &str,
        ) -> Result<MemberRecord, RegistryError> {
            Ok(MemberRecord {
                id: 42,
                title: self.title.clone(),
            })
        }
    }

    /// Collaborator double with no session at all.
    struct NoSession;

    #[async_trait]
    impl AuthProvider for NoSession {
        async fn get_current_user(
            &self,
            _token: &SessionToken,
        ) -> Result<Option<SessionUser>, AuthProviderError> {
            Ok(None)
        }

        async fn sign_out(&self, _token: &SessionToken) -> Result<(), AuthProviderError> {
            Ok(())
        }
    }

    fn resolver_for_title(title: &str) -> IdentityResolver {
        let fixed = Arc::new(FixedTitle {
            title: title.to_string(),
        });
        IdentityResolver::new(
            Arc::clone(&fixed) as Arc<dyn AuthProvider>,
            fixed,
            IdentityCache::new(16, Duration::from_secs(60)),
        )
    }

    #[tokio::test]
    async fn all_organiser_spellings_are_accepted() {
        for title in ORGANISER_TITLES {
            let resolver = resolver_for_title(title);
            let token = SessionToken::new("sess-1");
            let status = resolver.is_organiser(&token).await;
            assert!(status.is_organiser, "title {title:?} should be organiser");
            assert_eq!(status.organiser_id, Some(42));
        }
    }

    #[tokio::test]
    async fn non_organiser_titles_are_rejected() {
        for title in ["Mentor", "Basher", "Captain Bash", ""] {
            let resolver = resolver_for_title(title);
            let token = SessionToken::new("sess-1");
            let status = resolver.is_organiser(&token).await;
            assert!(!status.is_organiser, "title {title:?} should not be organiser");
            assert_eq!(status.organiser_id, None);
        }
    }

    #[tokio::test]
    async fn absent_principal_is_not_an_organiser() {
        let resolver = IdentityResolver::new(
            Arc::new(NoSession),
            Arc::new(FixedTitle {
                title: "Organiser".to_string(),
            }),
            IdentityCache::new(16, Duration::from_secs(60)),
        );
        let status = resolver.is_organiser(&SessionToken::new("sess-1")).await;
        assert!(!status.is_organiser);
        assert_eq!(status.organiser_id, None);
    }

    #[tokio::test]
    async fn mentor_check_requires_exact_casing() {
        let token = SessionToken::new("sess-1");

        assert!(resolver_for_title("Mentor").is_mentor(&token).await);

        // Lower-case "mentor" is rejected: the mentor check is exact while
        // the organiser check accepts casings. Inherited asymmetry.
        assert!(!resolver_for_title("mentor").is_mentor(&token).await);
        assert!(!resolver_for_title("MENTOR").is_mentor(&token).await);
        assert!(!resolver_for_title("Organiser").is_mentor(&token).await);
        assert!(!resolver_for_title("").is_mentor(&token).await);
    }

    #[tokio::test]
    async fn absent_principal_is_not_a_mentor() {
        let resolver = IdentityResolver::new(
            Arc::new(NoSession),
            Arc::new(FixedTitle {
                title: "Mentor".to_string(),
            }),
            IdentityCache::new(16, Duration::from_secs(60)),
        );
        assert!(!resolver.is_mentor(&SessionToken::new("sess-1")).await);
    }

    #[tokio::test]
    async fn organiser_status_omits_id_when_denied() {
        let resolver = resolver_for_title("Basher");
        let status = resolver.is_organiser(&SessionToken::new("sess-1")).await;
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["is_organiser"], false);
        assert!(json.get("organiser_id").is_none());
    }
}
