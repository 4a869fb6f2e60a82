//! Push notification service for Web Push.
//!
//! Delivery is best effort by contract: a failed push is logged and dropped,
//! and never surfaces to the business operation that triggered it.

use std::time::Duration;

use chrono::Utc;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use suggestbox_common::{AppResult, IdGenerator, VapidSigner};
use suggestbox_db::entities::push_subscription::{self, SubscriptionOwner};
use suggestbox_db::repositories::PushSubscriptionRepository;

/// Per-request delivery timeout.
const PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Seconds the push service may retain an undelivered notification.
const PUSH_TTL_SECS: &str = "86400";

/// Icon shown with every notification.
const PUSH_ICON: &str = "/assets/icon.png";

/// Input for creating a push subscription.
#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeInput {
    /// Push service endpoint URL
    #[validate(length(min = 1))]
    pub endpoint: String,

    /// Browser P-256 ECDH public key (base64url)
    #[validate(length(min = 1))]
    pub p256dh: String,

    /// Shared auth secret (base64url)
    #[validate(length(min = 1))]
    pub auth: String,
}

/// Push subscription response (endpoint masked to its origin).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscriptionResponse {
    /// Subscription ID
    pub id: String,
    /// Endpoint URL, reduced to the push service origin
    pub endpoint: String,
    /// Created timestamp
    pub created_at: String,
}

/// Push configuration exposed to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushConfigResponse {
    /// Whether push notifications are available
    pub available: bool,
    /// VAPID public key for `PushManager.subscribe`
    pub public_key: Option<String>,
}

/// Push notification payload.
#[derive(Debug, Serialize)]
struct PushPayload<'a> {
    title: &'a str,
    body: &'a str,
    icon: &'static str,
    tag: String,
}

/// Push notification service.
#[derive(Clone)]
pub struct PushNotificationService {
    repo: PushSubscriptionRepository,
    signer: Option<VapidSigner>,
    http_client: reqwest::Client,
    id_gen: IdGenerator,
}

impl PushNotificationService {
    /// Create a new push notification service.
    ///
    /// Without a signer the service still manages subscriptions, but every
    /// send is a logged no-op.
    #[must_use]
    pub fn new(repo: PushSubscriptionRepository, signer: Option<VapidSigner>) -> Self {
        Self {
            repo,
            signer,
            http_client: reqwest::Client::new(),
            id_gen: IdGenerator::new(),
        }
    }

    /// Whether outbound push is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.signer.is_some()
    }

    /// VAPID public key for client-side subscription.
    #[must_use]
    pub fn public_key(&self) -> Option<&str> {
        self.signer.as_ref().map(VapidSigner::public_key)
    }

    /// Replace the owner's subscription with a new one.
    ///
    /// Owners keep a single subscription; all prior rows are removed first.
    pub async fn subscribe(
        &self,
        owner: SubscriptionOwner,
        input: SubscribeInput,
    ) -> AppResult<PushSubscriptionResponse> {
        input.validate()?;

        let removed = self.repo.delete_by_owner(&owner).await?;
        if removed > 0 {
            tracing::debug!(removed, "Replaced existing push subscriptions");
        }

        let (student_key, admin_id) = owner.columns();
        let model = push_subscription::ActiveModel {
            id: Set(self.id_gen.generate()),
            student_key: Set(student_key),
            admin_id: Set(admin_id),
            endpoint: Set(input.endpoint),
            p256dh: Set(input.p256dh),
            auth: Set(input.auth),
            created_at: Set(Utc::now().into()),
        };
        let created = self.repo.create(model).await?;

        Ok(Self::to_response(created))
    }

    /// Remove all subscriptions of an owner. Returns the number removed.
    pub async fn unsubscribe(&self, owner: &SubscriptionOwner) -> AppResult<u64> {
        self.repo.delete_by_owner(owner).await
    }

    /// Notify every subscription of a student. Returns the success count.
    pub async fn notify_student(&self, student_key: &str, title: &str, body: &str) -> usize {
        if !self.is_enabled() {
            tracing::warn!("VAPID keys not configured, skipping push");
            return 0;
        }

        let owner = SubscriptionOwner::Student(student_key.to_string());
        let subscriptions = match self.repo.find_by_owner(&owner).await {
            Ok(subscriptions) => subscriptions,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load push subscriptions");
                return 0;
            }
        };

        self.send_all(&subscriptions, title, body).await
    }

    /// Notify every admin subscription. Returns the success count.
    pub async fn notify_admins(&self, title: &str, body: &str) -> usize {
        if !self.is_enabled() {
            tracing::warn!("VAPID keys not configured, skipping push");
            return 0;
        }

        let subscriptions = match self.repo.find_admin_subscriptions().await {
            Ok(subscriptions) => subscriptions,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load push subscriptions");
                return 0;
            }
        };

        self.send_all(&subscriptions, title, body).await
    }

    /// Sequential fan-out; one failed delivery never blocks the rest.
    async fn send_all(
        &self,
        subscriptions: &[push_subscription::Model],
        title: &str,
        body: &str,
    ) -> usize {
        let mut success_count = 0;

        for subscription in subscriptions {
            if self.send_to_subscription(subscription, title, body).await {
                success_count += 1;
            }
        }

        success_count
    }

    /// Deliver one notification. Any failure is logged and reported as
    /// `false`; nothing escapes to the caller.
    async fn send_to_subscription(
        &self,
        subscription: &push_subscription::Model,
        title: &str,
        body: &str,
    ) -> bool {
        let Some(signer) = &self.signer else {
            return false;
        };

        let token = match signer.sign(&subscription.endpoint) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    endpoint = %subscription.endpoint,
                    "Failed to sign VAPID token"
                );
                return false;
            }
        };

        let payload = PushPayload {
            title,
            body,
            icon: PUSH_ICON,
            tag: format!("suggestion-{}", subscription.id),
        };

        let response = self
            .http_client
            .post(&subscription.endpoint)
            .header("TTL", PUSH_TTL_SECS)
            .header(
                "Authorization",
                format!("vapid t={token}, k={}", signer.public_key()),
            )
            .timeout(PUSH_TIMEOUT)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(response) if matches!(response.status().as_u16(), 200 | 201 | 202) => {
                tracing::info!(endpoint = %subscription.endpoint, "Push sent");
                true
            }
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    endpoint = %subscription.endpoint,
                    "Push rejected"
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    endpoint = %subscription.endpoint,
                    "Push failed"
                );
                false
            }
        }
    }

    fn to_response(model: push_subscription::Model) -> PushSubscriptionResponse {
        // Show only the push service origin, not the capability URL
        let masked_endpoint = url::Url::parse(&model.endpoint)
            .ok()
            .and_then(|u| u.host_str().map(|h| format!("https://{h}/***/")))
            .unwrap_or_else(|| "***".to_string());

        PushSubscriptionResponse {
            id: model.id,
            endpoint: masked_endpoint,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}
