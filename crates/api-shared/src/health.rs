use crate::dto::HealthRes;

/// Simple health service used by the REST server.
///
/// Provides a standardised liveness answer for the Folio system.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Folio is alive".into(),
        }
    }
}
