//! Expense primitives.
//!
//! An [`Expense`] is one recorded payment. It is created in memory by the
//! [parser](crate::parse), persisted by the [`Engine`](crate::Engine) and,
//! once soft-deleted, kept in storage but hidden from every live read.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{Category, EngineError, PaymentType, util};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Category,
    pub payment_type: PaymentType,
    pub description: String,
    pub amount: Decimal,
    /// Owner, attached by the caller after parsing.
    pub user_id: i64,
    /// Soft-delete marker: `None` while the record is live.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Builds a fresh, unsaved expense with a new id and
    /// `created_at == updated_at == now`.
    pub fn new(
        category: Category,
        payment_type: PaymentType,
        description: String,
        amount: Decimal,
    ) -> Self {
        let now = util::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            category,
            payment_type,
            description,
            amount,
            user_id: 0,
            deleted_at: None,
        }
    }

    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// The amount with exactly two fractional digits, rounded half away
    /// from zero. Used wherever an amount is shown to people.
    pub fn amount_fixed(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub category_id: i32,
    pub payment_type_id: i32,
    pub description: String,
    /// Decimal literal, stored as text to keep the exact precision.
    pub amount: String,
    pub user_id: i64,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            created_at: ActiveValue::Set(expense.created_at),
            updated_at: ActiveValue::Set(expense.updated_at),
            category_id: ActiveValue::Set(i32::from(expense.category.id())),
            payment_type_id: ActiveValue::Set(i32::from(expense.payment_type.id())),
            description: ActiveValue::Set(expense.description.clone()),
            amount: ActiveValue::Set(expense.amount.to_string()),
            user_id: ActiveValue::Set(expense.user_id),
            deleted_at: ActiveValue::Set(expense.deleted_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "expense")?,
            created_at: model.created_at,
            updated_at: model.updated_at,
            category: Category::try_from(model.category_id)?,
            payment_type: PaymentType::try_from(model.payment_type_id)?,
            description: model.description,
            amount: Decimal::from_str(&model.amount)
                .map_err(|_| EngineError::InvalidAmount(format!("stored amount {}", model.amount)))?,
            user_id: model.user_id,
            deleted_at: model.deleted_at,
        })
    }
}
