use crate::database::DbPool;
use crate::entities::subscription_entity as subscriptions;
use crate::error::{AppError, AppResult};
use crate::utils::MonthWindow;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

/// 订阅记录存储，以 `(user_id, service_name)` 为主键。
///
/// 每个方法只执行一条语句，原子性与隔离级别由数据库单语句保证。
#[derive(Clone)]
pub struct SubscriptionStore {
    pool: DbPool,
}

fn key_filter(user_id: Uuid, service_name: &str) -> Condition {
    Condition::all()
        .add(subscriptions::Column::UserId.eq(user_id))
        .add(subscriptions::Column::ServiceName.eq(service_name))
}

fn not_found(user_id: Uuid, service_name: &str) -> AppError {
    AppError::NotFound(format!(
        "subscription {service_name:?} not found for user {user_id}"
    ))
}

impl SubscriptionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, sub: subscriptions::Model) -> AppResult<subscriptions::Model> {
        let (user_id, service_name) = (sub.user_id, sub.service_name.clone());
        subscriptions::ActiveModel {
            user_id: Set(sub.user_id),
            service_name: Set(sub.service_name),
            price: Set(sub.price),
            start_date: Set(sub.start_date),
            end_date: Set(sub.end_date),
        }
        .insert(&self.pool)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::ValidationError(format!(
                "subscription {service_name:?} already exists for user {user_id}"
            )),
            _ => AppError::DatabaseError(e),
        })
    }

    pub async fn read(&self, user_id: Uuid, service_name: &str) -> AppResult<subscriptions::Model> {
        subscriptions::Entity::find()
            .filter(key_filter(user_id, service_name))
            .one(&self.pool)
            .await?
            .ok_or_else(|| not_found(user_id, service_name))
    }

    /// 整体替换 price / start_date / end_date；无匹配行时返回 NotFound
    pub async fn update(&self, sub: subscriptions::Model) -> AppResult<subscriptions::Model> {
        let result = subscriptions::Entity::update_many()
            .col_expr(subscriptions::Column::Price, Expr::value(sub.price))
            .col_expr(subscriptions::Column::StartDate, Expr::value(sub.start_date))
            .col_expr(subscriptions::Column::EndDate, Expr::value(sub.end_date))
            .filter(key_filter(sub.user_id, &sub.service_name))
            .exec(&self.pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(not_found(sub.user_id, &sub.service_name));
        }
        Ok(sub)
    }

    pub async fn delete(&self, user_id: Uuid, service_name: &str) -> AppResult<()> {
        let result = subscriptions::Entity::delete_many()
            .filter(key_filter(user_id, service_name))
            .exec(&self.pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(not_found(user_id, service_name));
        }
        Ok(())
    }

    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<subscriptions::Model>> {
        let rows = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .order_by_asc(subscriptions::Column::ServiceName)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// 统计与查询窗口重叠的订阅价格之和。
    ///
    /// 重叠条件：`start_date <= window.end`，且 `end_date` 为空或
    /// `end_date >= window.start`（订阅起止月份均为闭区间）。无匹配时返回 0。
    pub async fn sum_overlapping_price(
        &self,
        user_id: Uuid,
        service_name: Option<&str>,
        window: MonthWindow,
    ) -> AppResult<i64> {
        #[derive(Debug, sea_orm::FromQueryResult)]
        struct SumRow {
            total_price: Option<i64>,
        }

        let mut query = subscriptions::Entity::find()
            .select_only()
            .column_as(Expr::col(subscriptions::Column::Price).sum(), "total_price")
            .filter(subscriptions::Column::UserId.eq(user_id))
            .filter(subscriptions::Column::StartDate.lte(window.end))
            .filter(
                Condition::any()
                    .add(subscriptions::Column::EndDate.is_null())
                    .add(subscriptions::Column::EndDate.gte(window.start)),
            );
        if let Some(name) = service_name {
            query = query.filter(subscriptions::Column::ServiceName.eq(name));
        }

        let total = query
            .into_model::<SumRow>()
            .one(&self.pool)
            .await?
            .and_then(|r| r.total_price)
            .unwrap_or(0);
        Ok(total)
    }

    pub async fn close(self) -> Result<(), DbErr> {
        self.pool.close().await
    }
}
