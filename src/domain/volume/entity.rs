use serde::{Deserialize, Serialize};

/// Ownership state of one volume of a series.
/// Rows exist only for volumes the user has touched; a missing row means
/// "not owned, not read".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub series_id: i64,
    pub volume_number: u32,
    pub is_owned: bool,
    pub is_read: bool,
}

impl Volume {
    pub fn owned(series_id: i64, volume_number: u32) -> Self {
        Self {
            series_id,
            volume_number,
            is_owned: true,
            is_read: false,
        }
    }
}
