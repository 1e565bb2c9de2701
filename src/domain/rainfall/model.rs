use serde::{Deserialize, Serialize};

/// One yearly rainfall measurement. `year` is unique across all entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainfallEntry {
    pub id: i32,
    pub year: i32,
    pub amount: f64,
}
