use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

const PRICE_DECIMALS_SCALE: f64 = 10_000.0;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be a positive number"))]
    pub page: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "limit must be a positive number"))]
    pub limit: i64,
}

impl FindAllProducts {
    /// Rows to skip, saturating at `i64::MAX`.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit.max(1))
    }
}

impl Default for FindAllProducts {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        range(min = 0.0, message = "Price cannot be negative"),
        custom(function = "validate_price_precision")
    )]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FindByIdProduct {
    #[validate(range(min = 1, message = "id must be a positive number"))]
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductRequest {
    #[validate(range(min = 1, message = "id must be a positive number"))]
    pub id: i32,

    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(
        range(min = 0.0, message = "Price cannot be negative"),
        custom(function = "validate_price_precision")
    )]
    pub price: Option<f64>,
}

impl UpdateProductRequest {
    /// True when at least one writable field is present.
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.price.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ValidateProductsRequest {
    #[validate(custom(function = "validate_ids"))]
    pub ids: Vec<i32>,
}

fn validate_price_precision(price: f64) -> Result<(), ValidationError> {
    let scaled = price * PRICE_DECIMALS_SCALE;

    if !price.is_finite() || (scaled - scaled.round()).abs() > 1e-6 {
        return Err(ValidationError::new("precision").with_message(Cow::from(
            "Price must have at most 4 decimal places",
        )));
    }

    Ok(())
}

fn validate_ids(ids: &[i32]) -> Result<(), ValidationError> {
    if ids.iter().any(|id| *id < 1) {
        return Err(ValidationError::new("ids")
            .with_message(Cow::from("every id must be a positive number")));
    }

    Ok(())
}
