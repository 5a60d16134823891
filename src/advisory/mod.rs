//! Advisory Mapper
//!
//! Pure, total mapping from a final risk score to a discrete advisory level
//! and its fixed guidance string. Bands are closed and non-overlapping, so
//! every integer score maps to exactly one level and a higher score never
//! yields a less severe level.
//!
//! Advisory strings are the Hinglish phrases played out on worker badges and
//! the supervisor dashboard; they are part of the product copy, not debug text.

use crate::types::AdvisoryLevel;

/// Map a final risk score to its advisory level and guidance string.
///
/// Bands: >90 CRITICAL, 81-90 HIGH, 61-80 WARNING, 41-60 CAUTION, 0-40 SAFE.
pub const fn advisory_for(score: u8) -> (AdvisoryLevel, &'static str) {
    if score > 90 {
        (AdvisoryLevel::Critical, "Turant evacuate karo, emergency!")
    } else if score > 80 {
        (AdvisoryLevel::High, "Zone chhodo, supervisor ko bolo")
    } else if score > 60 {
        (AdvisoryLevel::Warning, "Paani piyo, 5 min break lo")
    } else if score > 40 {
        (AdvisoryLevel::Caution, "Thoda alert raho, safe zone mein raho")
    } else {
        (AdvisoryLevel::Safe, "Sab theek hai, safe raho")
    }
}
