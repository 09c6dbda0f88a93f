use chrono::{DateTime, Utc};
use sea_orm::{
    QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait, prelude::*, sea_query::Expr,
};
use uuid::Uuid;

use crate::{Category, EngineError, Expense, ResultEngine, expenses, util};

use super::{Engine, with_tx};

impl Engine {
    /// Persists a new live expense.
    ///
    /// No business validation happens here: the expense is expected to come
    /// from [`parse`](crate::parse) or an equally trusted source.
    #[tracing::instrument(skip(self, expense), fields(id = %expense.id), err)]
    pub async fn insert_expense(&self, expense: &Expense) -> ResultEngine<()> {
        match expenses::ActiveModel::from(expense)
            .insert(&self.database)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(EngineError::ExistingKey(expense.id.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Lists live expenses, newest first.
    ///
    /// `limit <= 0` means no limit. Ties on `created_at` are broken by id so
    /// the order is total.
    #[tracing::instrument(skip(self), err)]
    pub async fn list_expenses(&self, limit: i64) -> ResultEngine<Vec<Expense>> {
        let mut query = expenses::Entity::find()
            .filter(expenses::Column::DeletedAt.is_null())
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id);
        if limit > 0 {
            query = query.limit(limit.unsigned_abs());
        }

        let rows = query.all(&self.database).await?;
        tracing::debug!(count = rows.len(), "listed expenses");
        rows.into_iter().map(Expense::try_from).collect()
    }

    /// Soft-deletes a live expense.
    ///
    /// Returns `false` when no live expense has this id (unknown or already
    /// deleted); that case is not an error.
    #[tracing::instrument(skip(self), err)]
    pub async fn delete_expense(&self, id: Uuid) -> ResultEngine<bool> {
        let result = expenses::Entity::update_many()
            .col_expr(expenses::Column::DeletedAt, Expr::value(util::now()))
            .filter(expenses::Column::Id.eq(id.to_string()))
            .filter(expenses::Column::DeletedAt.is_null())
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Changes the category of a live expense and advances its `updated_at`.
    ///
    /// The new `updated_at` is strictly greater than the previous one.
    /// Returns `false` when no live expense has this id.
    #[tracing::instrument(skip(self), err)]
    pub async fn update_expense_category(
        &self,
        id: Uuid,
        category: Category,
    ) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let Some(model) = expenses::Entity::find_by_id(id.to_string())
                .filter(expenses::Column::DeletedAt.is_null())
                .one(&db_tx)
                .await?
            else {
                return Ok(false);
            };

            let result = expenses::Entity::update_many()
                .col_expr(
                    expenses::Column::CategoryId,
                    Expr::value(i32::from(category.id())),
                )
                .col_expr(
                    expenses::Column::UpdatedAt,
                    Expr::value(util::next_updated_at(model.updated_at)),
                )
                .filter(expenses::Column::Id.eq(model.id))
                .filter(expenses::Column::DeletedAt.is_null())
                .exec(&db_tx)
                .await?;

            Ok(result.rows_affected > 0)
        })
    }

    /// The freshness watermark: the greatest `updated_at` among live
    /// expenses, or the Unix epoch when there are none.
    ///
    /// Every live expense has `updated_at <= watermark`, and one of them (if
    /// any) is equal to it. Callers use it to answer "changed since T?"
    /// without loading the records.
    #[tracing::instrument(skip(self), err)]
    pub async fn latest_updated_at(&self) -> ResultEngine<DateTime<Utc>> {
        let latest = expenses::Entity::find()
            .filter(expenses::Column::DeletedAt.is_null())
            .order_by_desc(expenses::Column::UpdatedAt)
            .one(&self.database)
            .await?;

        Ok(latest.map_or(DateTime::<Utc>::UNIX_EPOCH, |model| model.updated_at))
    }
}
