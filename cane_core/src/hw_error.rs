//! Maps `Box<dyn Error>` from trait boundaries to typed `CaneError`.
//!
//! The traits in `cane_traits` use `Box<dyn Error + Send + Sync>` for maximum
//! flexibility; this module converts those to our typed error enum, with an
//! optional feature-gated path for `cane_hardware::HwError` downcasting.

use crate::error::CaneError;

/// Map a trait-boundary error to a typed `CaneError`.
///
/// Attempts to downcast known hardware error types first, then falls back
/// to string-based heuristics.
pub fn map_hw_error(e: &(dyn std::error::Error + 'static)) -> CaneError {
    // Feature-gated: try to downcast to HwError for precise mapping
    #[cfg(feature = "hardware-errors")]
    {
        if let Some(hw) = e.downcast_ref::<cane_hardware::error::HwError>() {
            return match hw {
                cane_hardware::error::HwError::Timeout => CaneError::Timeout,
                cane_hardware::error::HwError::EchoTimeout => CaneError::Timeout,
                other => CaneError::HardwareFault(other.to_string()),
            };
        }
    }

    // Fallback: string-based detection
    let s = e.to_string();
    if s.to_lowercase().contains("timeout") {
        CaneError::Timeout
    } else {
        CaneError::Hardware(s)
    }
}
