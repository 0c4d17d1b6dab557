use super::super::MandateChainService;
use super::register_with_fresh_id;
use crate::mandate::{AuditFingerprint, IdKind, IntentMandate};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

pub(crate) fn create_intent_impl(
    service: &MandateChainService,
    now: DateTime<Utc>,
    user_intent: &str,
    max_budget: Decimal,
    preferred_platform: Option<&str>,
) -> Arc<IntentMandate> {
    let mandate = register_with_fresh_id(
        IdKind::Intent,
        |id| {
            let mut mandate = IntentMandate {
                id,
                user_intent: user_intent.to_string(),
                max_budget,
                preferred_platform: preferred_platform.map(str::to_string),
                created_at: now,
                signature: String::new(),
            };
            mandate.signature = mandate.compute_fingerprint();
            mandate
        },
        |mandate| service.registry.put_intent(mandate),
    );

    info!(
        intent_mandate_id = %mandate.id,
        max_budget = %mandate.max_budget,
        preferred_platform = mandate.preferred_platform.as_deref().unwrap_or("any"),
        signature = %mandate.signature,
        "intent mandate created"
    );
    mandate
}
