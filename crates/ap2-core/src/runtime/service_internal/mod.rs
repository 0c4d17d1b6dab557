//! Implementation modules for `runtime::service`.
//!
//! `src/runtime/service.rs` is the public facade; each chain stage lives in
//! its own module here.

pub(crate) mod cart;
pub(crate) mod intent;
pub(crate) mod payment;


use crate::mandate::{generate_id, IdKind};
use crate::registry::RegistryError;
use std::sync::Arc;
use tracing::warn;

/// Build a record under a fresh ID and insert it, regenerating the ID until
/// the registry accepts it.
pub(crate) fn register_with_fresh_id<T>(
    kind: IdKind,
    mut build: impl FnMut(String) -> T,
    mut put: impl FnMut(T) -> Result<Arc<T>, RegistryError>,
) -> Arc<T> {
    loop {
        match put(build(generate_id(kind))) {
            Ok(stored) => return stored,
            Err(err) => warn!(error = %err, "id collision, regenerating"),
        }
    }
}
