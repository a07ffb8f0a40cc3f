use crate::dto::HealthRes;

/// Simple health service shared by the server binaries.
///
/// Reports liveness only; the queue itself has no external dependencies to probe.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Health response naming the clinic this instance serves.
    pub fn check_health(clinic_name: &str) -> HealthRes {
        HealthRes {
            ok: true,
            message: format!("{clinic_name} triage queue is alive"),
        }
    }
}
