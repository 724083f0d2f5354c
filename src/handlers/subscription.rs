use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::SubscriptionService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::ValidationError("invalid user_id".to_string()))
}

#[utoipa::path(
    get,
    path = "/subscriptions/{user_id}",
    tag = "subscription",
    params(("user_id" = String, Path, description = "用户 UUID")),
    responses(
        (status = 200, description = "获取用户订阅列表成功", body = [SubscriptionResponse]),
        (status = 400, description = "user_id 非法", body = ApiErrorResponse),
        (status = 500, description = "服务器内部错误", body = ApiErrorResponse)
    )
)]
pub async fn list_subscriptions(
    subscription_service: web::Data<SubscriptionService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let raw_user_id = path.into_inner();
    let user_id = match parse_user_id(&raw_user_id) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };

    match subscription_service.list_subscriptions(user_id).await {
        Ok(subs) => Ok(HttpResponse::Ok().json(subs)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscriptions/{user_id}/{service_name}",
    tag = "subscription",
    params(
        ("user_id" = String, Path, description = "用户 UUID"),
        ("service_name" = String, Path, description = "服务名称")
    ),
    responses(
        (status = 200, description = "获取订阅成功", body = SubscriptionResponse),
        (status = 400, description = "user_id 非法", body = ApiErrorResponse),
        (status = 404, description = "订阅不存在", body = ApiErrorResponse)
    )
)]
pub async fn get_subscription(
    subscription_service: web::Data<SubscriptionService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (raw_user_id, service_name) = path.into_inner();
    let user_id = match parse_user_id(&raw_user_id) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };

    match subscription_service
        .get_subscription(user_id, &service_name)
        .await
    {
        Ok(sub) => Ok(HttpResponse::Ok().json(sub)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/subscriptions",
    tag = "subscription",
    request_body = SubscriptionPayload,
    responses(
        (status = 201, description = "创建订阅成功", body = SubscriptionResponse),
        (status = 400, description = "请求参数错误", body = ApiErrorResponse)
    )
)]
pub async fn create_subscription(
    subscription_service: web::Data<SubscriptionService>,
    request: web::Json<SubscriptionPayload>,
) -> Result<HttpResponse> {
    match subscription_service
        .create_subscription(request.into_inner())
        .await
    {
        Ok(sub) => Ok(HttpResponse::Created().json(sub)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/subscriptions/{user_id}/{service_name}",
    tag = "subscription",
    request_body = SubscriptionPayload,
    params(
        ("user_id" = String, Path, description = "用户 UUID"),
        ("service_name" = String, Path, description = "服务名称")
    ),
    responses(
        (status = 200, description = "更新订阅成功", body = SubscriptionResponse),
        (status = 400, description = "请求参数错误或 key 不一致", body = ApiErrorResponse),
        (status = 404, description = "订阅不存在", body = ApiErrorResponse)
    )
)]
pub async fn update_subscription(
    subscription_service: web::Data<SubscriptionService>,
    path: web::Path<(String, String)>,
    request: web::Json<SubscriptionPayload>,
) -> Result<HttpResponse> {
    let (raw_user_id, service_name) = path.into_inner();
    let user_id = match parse_user_id(&raw_user_id) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };

    match subscription_service
        .update_subscription(user_id, &service_name, request.into_inner())
        .await
    {
        Ok(sub) => Ok(HttpResponse::Ok().json(sub)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/subscriptions/{user_id}/{service_name}",
    tag = "subscription",
    params(
        ("user_id" = String, Path, description = "用户 UUID"),
        ("service_name" = String, Path, description = "服务名称")
    ),
    responses(
        (status = 204, description = "删除订阅成功"),
        (status = 400, description = "user_id 非法", body = ApiErrorResponse),
        (status = 404, description = "订阅不存在", body = ApiErrorResponse)
    )
)]
pub async fn delete_subscription(
    subscription_service: web::Data<SubscriptionService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (raw_user_id, service_name) = path.into_inner();
    let user_id = match parse_user_id(&raw_user_id) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };

    match subscription_service
        .delete_subscription(user_id, &service_name)
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/subscriptions/total-price",
    tag = "subscription",
    request_body = TotalPriceRequest,
    responses(
        (status = 200, description = "统计总价成功", body = TotalPriceResponse),
        (status = 400, description = "请求参数错误", body = ApiErrorResponse)
    )
)]
pub async fn sum_subscriptions_price(
    subscription_service: web::Data<SubscriptionService>,
    request: web::Json<TotalPriceRequest>,
) -> Result<HttpResponse> {
    let req = request.into_inner();

    if req.user_id.is_nil() {
        return Ok(AppError::ValidationError("user_id is required".to_string()).error_response());
    }
    if req.start_date.is_empty() || req.end_date.is_empty() {
        return Ok(AppError::ValidationError(
            "start_date and end_date are required".to_string(),
        )
        .error_response());
    }

    match subscription_service
        .sum_subscriptions_price(
            req.user_id,
            req.service_name.as_deref(),
            &req.start_date,
            &req.end_date,
        )
        .await
    {
        Ok(total_price) => Ok(HttpResponse::Ok().json(TotalPriceResponse { total_price })),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn subscription_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subscriptions")
            .route("/total-price", web::post().to(sum_subscriptions_price))
            .route("", web::post().to(create_subscription))
            .route("/{user_id}", web::get().to(list_subscriptions))
            .route("/{user_id}/{service_name}", web::get().to(get_subscription))
            .route("/{user_id}/{service_name}", web::put().to(update_subscription))
            .route("/{user_id}/{service_name}", web::delete().to(delete_subscription)),
    );
}
