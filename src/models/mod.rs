//! Slot assignment domain models.
//!
//! | u-assign | Campus planning | Warehousing |
//! |----------|-----------------|-------------|
//! | Slot | Building | Storage bay |
//! | Use | Function | Product family |
//! | Suitability | Fit score | Pick affinity |

mod encoding;
mod suitability;

pub use encoding::{Encoding, Gene};
pub use suitability::{SuitabilityTable, BUILDING_SUITABILITIES, MAX_EXACT_SLOTS};
