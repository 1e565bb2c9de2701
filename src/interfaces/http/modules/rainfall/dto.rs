//! Rainfall entry DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{RainfallEntry, UpdateRainfallDto};

#[derive(Debug, Serialize, ToSchema)]
pub struct RainfallEntryDto {
    pub id: i32,
    #[schema(example = 2020)]
    pub year: i32,
    #[schema(example = 10.0)]
    pub amount: f64,
}

impl From<RainfallEntry> for RainfallEntryDto {
    fn from(e: RainfallEntry) -> Self {
        Self {
            id: e.id,
            year: e.year,
            amount: e.amount,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRainfallRequest {
    #[validate(range(min = 1, max = 9999, message = "year must be between 1 and 9999"))]
    pub year: i32,
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: f64,
}

/// Partial update; omitted fields keep their stored value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRainfallRequest {
    #[validate(range(min = 1, max = 9999, message = "year must be between 1 and 9999"))]
    pub year: Option<i32>,
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: Option<f64>,
}

impl From<UpdateRainfallRequest> for UpdateRainfallDto {
    fn from(req: UpdateRainfallRequest) -> Self {
        Self {
            year: req.year,
            amount: req.amount,
        }
    }
}
