/// Decides whether simulated investing is unlocked.
///
/// Pure: no state beyond configuration, no side effects. Callers
/// re-derive the answer whenever progress or identity changes —
/// the result is never cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnlockPolicy {
    override_identity: Option<String>,
}

impl UnlockPolicy {
    pub fn new(override_identity: Option<String>) -> Self {
        Self { override_identity }
    }

    /// Unlocked at 100% savings progress, or when `identity` equals
    /// the configured override identity exactly (an operational bypass
    /// for demo/review access — never a pattern match).
    #[must_use]
    pub fn can_invest(&self, progress_percentage: f64, identity: &str) -> bool {
        if progress_percentage >= 100.0 {
            return true;
        }
        self.override_identity.as_deref() == Some(identity)
    }
}
