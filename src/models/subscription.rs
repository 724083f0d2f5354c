use crate::entities::subscription_entity as subscriptions;
use crate::utils::format_month;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// 创建 / 更新订阅请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionPayload {
    #[serde(default)]
    #[schema(example = "60601fee-2bf1-4721-ae6f-7636e79a0cba")]
    pub user_id: Uuid,
    #[serde(default)]
    #[schema(example = "Yandex Plus")]
    pub service_name: String,
    #[serde(default)]
    #[schema(example = 400)]
    pub price: i32,
    #[serde(default)]
    #[schema(example = "07-2025")]
    pub start_date: String, // MM-YYYY
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "12-2025")]
    pub end_date: Option<String>, // MM-YYYY
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionResponse {
    pub user_id: Uuid,
    pub service_name: String,
    pub price: i32,
    #[schema(example = "07-2025")]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "12-2025")]
    pub end_date: Option<String>,
}

impl From<subscriptions::Model> for SubscriptionResponse {
    fn from(m: subscriptions::Model) -> Self {
        Self {
            user_id: m.user_id,
            service_name: m.service_name,
            price: m.price,
            start_date: format_month(m.start_date),
            end_date: m.end_date.map(format_month),
        }
    }
}

/// 统计区间内订阅总价请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TotalPriceRequest {
    #[serde(default)]
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default)]
    #[schema(example = "01-2025")]
    pub start_date: String,
    #[serde(default)]
    #[schema(example = "12-2025")]
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TotalPriceResponse {
    pub total_price: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_response_omits_missing_end_date() {
        let model = subscriptions::Model {
            user_id: Uuid::nil(),
            service_name: "netflix".to_string(),
            price: 15,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
        };
        let json = serde_json::to_value(SubscriptionResponse::from(model)).unwrap();
        assert_eq!(json["start_date"], "01-2024");
        assert!(json.get("end_date").is_none());
    }

    #[test]
    fn test_payload_missing_fields_default() {
        let payload: SubscriptionPayload =
            serde_json::from_str(r#"{"service_name": "spotify"}"#).unwrap();
        assert!(payload.user_id.is_nil());
        assert_eq!(payload.price, 0);
        assert!(payload.start_date.is_empty());
        assert!(payload.end_date.is_none());
    }
}
