//! Administrative field configuration.
//!
//! The administrative interface is driven by explicit per-entity field
//! configuration rather than schema introspection: each entity enumerates its
//! editable fields, which of them are currently read-only, and the named
//! validators that guard edits. The stock-lock rule lives here twice on
//! purpose - once as a form-layer read-only flag and once as a validator -
//! so a client that ignores the form descriptor still cannot bypass it.

use marquee_common::{AppError, AppResult};
use marquee_db::entities::movie;

/// A single editable field in an administrative form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminField {
    /// Field name as exposed to the form layer.
    pub name: &'static str,
    /// Whether the form must supply a value.
    pub required: bool,
}

/// Administrative configuration for the movie entity.
pub struct MovieAdmin;

impl MovieAdmin {
    /// Editable movie fields, in form order.
    pub const FIELDS: &'static [AdminField] = &[
        AdminField { name: "name", required: true },
        AdminField { name: "price", required: true },
        AdminField { name: "description", required: true },
        AdminField { name: "image", required: true },
        AdminField { name: "amount_left", required: false },
    ];

    /// Fields that must be rendered read-only for the given stored movie.
    ///
    /// Once the stock count has reached zero the field is frozen in the
    /// editing interface.
    #[must_use]
    pub fn read_only_fields(current: &movie::Model) -> &'static [&'static str] {
        if current.amount_left == Some(0) {
            &["amount_left"]
        } else {
            &[]
        }
    }
}

/// Stock-lock validator: a stored count of exactly zero can never be edited
/// away from zero.
pub fn validate_stock_change(stored: Option<i32>, requested: Option<i32>) -> AppResult<()> {
    if stored == Some(0) && requested != Some(0) {
        return Err(AppError::Validation(
            "Cannot change amount_left when it equals 0.".to_string(),
        ));
    }
    Ok(())
}

/// Reject negative stock counts.
pub fn validate_stock_value(requested: Option<i32>) -> AppResult<()> {
    if let Some(n) = requested
        && n < 0
    {
        return Err(AppError::Validation(
            "amount_left cannot be negative.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn movie(amount_left: Option<i32>) -> movie::Model {
        movie::Model {
            id: 1,
            name: "Dune".to_string(),
            price: 10,
            description: "Desert epic".to_string(),
            image: "movie_images/dune.jpg".to_string(),
            amount_left,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_stock_lock_rejects_escape_from_zero() {
        assert!(validate_stock_change(Some(0), Some(5)).is_err());
        assert!(validate_stock_change(Some(0), None).is_err());
    }

    #[test]
    fn test_stock_lock_allows_zero_noop() {
        assert!(validate_stock_change(Some(0), Some(0)).is_ok());
    }

    #[test]
    fn test_stock_lock_ignores_nonzero_stored() {
        assert!(validate_stock_change(Some(3), Some(0)).is_ok());
        assert!(validate_stock_change(None, Some(7)).is_ok());
        assert!(validate_stock_change(Some(2), None).is_ok());
    }

    #[test]
    fn test_stock_value_rejects_negative() {
        assert!(validate_stock_value(Some(-1)).is_err());
        assert!(validate_stock_value(Some(0)).is_ok());
        assert!(validate_stock_value(None).is_ok());
    }

    #[test]
    fn test_read_only_fields_lock_at_zero() {
        assert_eq!(MovieAdmin::read_only_fields(&movie(Some(0))), &["amount_left"]);
        assert!(MovieAdmin::read_only_fields(&movie(Some(4))).is_empty());
        assert!(MovieAdmin::read_only_fields(&movie(None)).is_empty());
    }

    #[test]
    fn test_fields_enumerate_amount_left() {
        assert!(MovieAdmin::FIELDS.iter().any(|f| f.name == "amount_left" && !f.required));
    }
}
