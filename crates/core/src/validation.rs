use rust_decimal::Decimal;

use crate::domain::product::{rating_in_range, NewProduct, ProductFields};
use crate::errors::ValidationError;

/// Checks creation input in a fixed order (name, brand, price, category, rating)
/// and reports the first failure.
pub fn validate_new_product(fields: ProductFields) -> Result<NewProduct, ValidationError> {
    let name = required_text(fields.name).ok_or(ValidationError::MissingName)?;
    let brand = required_text(fields.brand).ok_or(ValidationError::MissingBrand)?;
    let price = fields
        .price
        .filter(|price| *price > Decimal::ZERO)
        .ok_or(ValidationError::InvalidPrice)?;
    let category = required_text(fields.category).ok_or(ValidationError::MissingCategory)?;

    if let Some(rating) = fields.rating {
        if !rating_in_range(rating) {
            return Err(ValidationError::RatingOutOfRange(rating));
        }
    }

    Ok(NewProduct {
        name,
        brand,
        category,
        price,
        image_url: fields.image_url,
        description: fields.description,
        rating: fields.rating,
        specs: fields.specs.unwrap_or_default(),
    })
}

fn required_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
