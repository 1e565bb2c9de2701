/// Partial update: `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateRainfallDto {
    pub year: Option<i32>,
    pub amount: Option<f64>,
}

impl UpdateRainfallDto {
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.amount.is_none()
    }
}
