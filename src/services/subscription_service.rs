use crate::database::SubscriptionStore;
use crate::entities::subscription_entity as subscriptions;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{MonthWindow, parse_month};
use uuid::Uuid;

#[derive(Clone)]
pub struct SubscriptionService {
    store: SubscriptionStore,
}

/// 创建与更新共用的校验规则，通过后得到待持久化的记录
pub fn validate_payload(payload: &SubscriptionPayload) -> AppResult<subscriptions::Model> {
    if payload.user_id.is_nil() {
        return Err(AppError::ValidationError("user_id is required".to_string()));
    }
    if payload.service_name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "service_name is required".to_string(),
        ));
    }
    if payload.price <= 0 {
        return Err(AppError::ValidationError(
            "price must be positive".to_string(),
        ));
    }
    if payload.start_date.is_empty() {
        return Err(AppError::ValidationError(
            "start_date is required".to_string(),
        ));
    }

    let start_date = parse_month("start_date", &payload.start_date)?;
    let end_date = payload
        .end_date
        .as_deref()
        .map(|s| parse_month("end_date", s))
        .transpose()?;

    if let Some(end) = end_date
        && end < start_date
    {
        return Err(AppError::ValidationError(
            "end_date must not be earlier than start_date".to_string(),
        ));
    }

    Ok(subscriptions::Model {
        user_id: payload.user_id,
        service_name: payload.service_name.clone(),
        price: payload.price,
        start_date,
        end_date,
    })
}

impl SubscriptionService {
    pub fn new(store: SubscriptionStore) -> Self {
        Self { store }
    }

    pub async fn create_subscription(
        &self,
        payload: SubscriptionPayload,
    ) -> AppResult<SubscriptionResponse> {
        let sub = validate_payload(&payload)?;
        let created = self.store.create(sub).await?;
        Ok(SubscriptionResponse::from(created))
    }

    pub async fn get_subscription(
        &self,
        user_id: Uuid,
        service_name: &str,
    ) -> AppResult<SubscriptionResponse> {
        let sub = self.store.read(user_id, service_name).await?;
        Ok(SubscriptionResponse::from(sub))
    }

    /// 整体替换，路径中的 key 必须与请求体一致
    pub async fn update_subscription(
        &self,
        user_id: Uuid,
        service_name: &str,
        payload: SubscriptionPayload,
    ) -> AppResult<SubscriptionResponse> {
        if payload.user_id != user_id || payload.service_name != service_name {
            return Err(AppError::ValidationError(
                "user_id or service_name mismatch".to_string(),
            ));
        }
        let sub = validate_payload(&payload)?;
        let updated = self.store.update(sub).await?;
        Ok(SubscriptionResponse::from(updated))
    }

    pub async fn delete_subscription(&self, user_id: Uuid, service_name: &str) -> AppResult<()> {
        self.store.delete(user_id, service_name).await
    }

    pub async fn list_subscriptions(&self, user_id: Uuid) -> AppResult<Vec<SubscriptionResponse>> {
        let rows = self.store.list(user_id).await?;
        Ok(rows.into_iter().map(SubscriptionResponse::from).collect())
    }

    /// 统计 [start_date, end_date] 月份区间内的订阅总价
    pub async fn sum_subscriptions_price(
        &self,
        user_id: Uuid,
        service_name: Option<&str>,
        start_date: &str,
        end_date: &str,
    ) -> AppResult<i64> {
        let window = MonthWindow::parse(start_date, end_date)?;
        self.store
            .sum_overlapping_price(user_id, service_name, window)
            .await
    }

    pub async fn shutdown(self) -> AppResult<()> {
        self.store.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn payload(price: i32, start: &str, end: Option<&str>) -> SubscriptionPayload {
        SubscriptionPayload {
            user_id: Uuid::new_v4(),
            service_name: "netflix".to_string(),
            price,
            start_date: start.to_string(),
            end_date: end.map(str::to_string),
        }
    }

    #[test]
    fn test_price_must_be_positive() {
        let err = validate_payload(&payload(0, "01-2024", None)).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        let err = validate_payload(&payload(-5, "01-2024", None)).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(validate_payload(&payload(1, "01-2024", None)).is_ok());
    }

    #[test]
    fn test_service_name_required() {
        let mut p = payload(15, "01-2024", None);
        p.service_name = String::new();
        assert!(matches!(
            validate_payload(&p),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_nil_user_rejected() {
        let mut p = payload(15, "01-2024", None);
        p.user_id = Uuid::nil();
        assert!(matches!(
            validate_payload(&p),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_dates() {
        assert!(matches!(
            validate_payload(&payload(15, "", None)),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            validate_payload(&payload(15, "2024-01", None)),
            Err(AppError::InvalidDateFormat(_))
        ));
        assert!(matches!(
            validate_payload(&payload(15, "01-2024", Some("13-2024"))),
            Err(AppError::InvalidDateFormat(_))
        ));
        assert!(matches!(
            validate_payload(&payload(15, "05-2024", Some("04-2024"))),
            Err(AppError::ValidationError(_))
        ));

        // 同月起止合法
        let sub = validate_payload(&payload(15, "05-2024", Some("05-2024"))).unwrap();
        assert_eq!(sub.start_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(sub.end_date, Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
    }
}
