use thiserror::Error;

/// Outcome of a denied [`super::SessionGate::authorize`] call.
///
/// The caller decides how to respond (status code, redirect); none of these carry
/// details about the underlying verifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No token, or the token does not resolve to a live session.
    #[error("authentication required")]
    Unauthenticated,
    /// Valid session without the required role.
    #[error("insufficient role")]
    Forbidden,
    /// The verifier could not be reached or answered garbage.
    #[error("session verification unavailable")]
    VerificationFailure,
}
