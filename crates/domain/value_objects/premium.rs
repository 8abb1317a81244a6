use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PremiumError {
    #[error("discount must be a fraction between 0 and 1, got {0}")]
    InvalidDiscount(f64),
    #[error("base premium must not be negative, got {0}")]
    NegativeBasePremium(i64),
}

/// `base_premium × (1 − discount)` rounded to the nearest peso.
pub fn apply_discount(base_premium: i64, discount: f64) -> Result<i64, PremiumError> {
    if base_premium < 0 {
        return Err(PremiumError::NegativeBasePremium(base_premium));
    }
    if !(0.0..=1.0).contains(&discount) {
        return Err(PremiumError::InvalidDiscount(discount));
    }

    Ok((base_premium as f64 * (1.0 - discount)).round() as i64)
}

/// Premium for an option's fixed price with an optional promo discount.
pub fn compute_premium(base_premium: i64, discount: Option<f64>) -> Result<i64, PremiumError> {
    match discount {
        Some(discount) => apply_discount(base_premium, discount),
        None if base_premium < 0 => Err(PremiumError::NegativeBasePremium(base_premium)),
        None => Ok(base_premium),
    }
}
