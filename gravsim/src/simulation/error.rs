//! Error taxonomy for the mechanics engine
//!
//! Every failure here is a local computation failure surfaced synchronously
//! to the caller. Nothing is retried.

/// Failures raised by vector construction, particle editing and stepping
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MechanicsError {
    /// Two particles coincide, or are close enough that the inverse-square
    /// force is not finite
    #[error("degenerate configuration: particles {subject} and {actor} are too close for a finite force")]
    DegenerateConfiguration { subject: usize, actor: usize },

    /// Mass must be finite and strictly positive
    #[error("invalid mass {0}: must be finite and greater than zero")]
    InvalidMass(f64),

    /// Tick length must be finite and strictly positive
    #[error("invalid tick length {0}: must be finite and greater than zero")]
    InvalidTickLength(f64),

    #[error("non-finite direction angle (plane {plane}, z {z})")]
    NonFiniteAngle { plane: f64, z: f64 },
}
