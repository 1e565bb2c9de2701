#[derive(Debug, Clone)]
pub struct CreateRainfallDto {
    pub year: i32,
    pub amount: f64,
}
