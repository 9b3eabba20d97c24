//! Check result types collected for the run summary.

/// Result of checking one rule-set reference.
#[derive(Debug, Clone)]
pub struct CheckEntry {
    /// The reference as declared.
    pub name: String,
    /// Outcome of the check.
    pub status: CheckStatus,
    /// Optional detail (what the reference expands to, or why it failed).
    pub message: Option<String>,
}

/// Outcome of checking a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Resolved and contributes at least one effective setting.
    Ok,
    /// Resolved, but redundant: duplicated, or fully overridden later.
    Warning,
    /// Could not be resolved.
    Failed,
}
