//! Shared primitive types used across the engine.

/// A monetary amount in pesos (MXN). The engine never formats currency;
/// locale and symbol belong to the presentation layer.
pub type Money = f64;

/// Accumulated reward points. Fractional during accrual (base rate is
/// 0.1 points per peso); floored only for display.
pub type Points = f64;

/// An index into the rank table. Rank 0 is the inert onboarding tier.
pub type Rank = usize;

/// Stable identifier of a mission catalog entry.
pub type MissionId = String;

/// The canonical session identifier.
pub type SessionId = String;
