//! Movie entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    /// Price in whole currency units.
    pub price: i32,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Opaque reference to the uploaded cover image.
    pub image: String,

    /// Remaining stock. NULL means unlimited availability.
    #[sea_orm(nullable)]
    pub amount_left: Option<i32>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// Whether this movie may appear in the catalog listing.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.amount_left.is_none_or(|n| n > 0)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
