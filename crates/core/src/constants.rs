/// Decimal precision for intermediate calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Base currency assumed when the user has not configured one
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// Upper bound on generated amortization schedules
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;
