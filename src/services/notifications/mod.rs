//! Push notification delivery.
//!
//! `PushProvider` is the seam to the messaging backend; `FcmProvider` is the
//! production implementation and `NotificationDispatcher` drives it.

mod credentials;
mod dispatcher;
mod fcm_provider;
mod provider;

#[cfg(test)]
pub(crate) mod testing;

pub use credentials::{SERVICE_ACCOUNT_ENV, ServiceAccountKey};
pub use dispatcher::{DispatchReceipt, NotificationDispatcher};
pub use fcm_provider::FcmProvider;
pub use provider::{ProviderError, PushProvider};
