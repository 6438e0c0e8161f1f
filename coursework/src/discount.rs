#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiscountError {
    #[error("Price and discount must be numeric")]
    NotNumeric,
    #[error("Discount must be between 0 and 100")]
    OutOfRange,
}

/// Final price after taking `discount` percent off `price`.
pub fn calculate_discount(
    price: impl Into<f64>,
    discount: impl Into<f64>,
) -> Result<f64, DiscountError> {
    let (price, discount) = (price.into(), discount.into());
    if !price.is_finite() || !discount.is_finite() {
        return Err(DiscountError::NotNumeric);
    }
    if !(0.0..=100.0).contains(&discount) {
        return Err(DiscountError::OutOfRange);
    }
    Ok(price * (1.0 - discount / 100.0))
}
