//! Generated record identifiers

use chrono::Utc;
use uuid::Uuid;

/// `<prefix>_<epoch millis>_<uuid v4 simple>`
///
/// The millisecond stamp keeps ids roughly sortable; the uuid keeps two ids
/// minted in the same millisecond distinct.
pub fn generate(prefix: &str) -> String {
    format!(
        "{}_{}_{}",
        prefix,
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}
