use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::subscription::list_subscriptions,
        handlers::subscription::get_subscription,
        handlers::subscription::create_subscription,
        handlers::subscription::update_subscription,
        handlers::subscription::delete_subscription,
        handlers::subscription::sum_subscriptions_price,
    ),
    components(
        schemas(
            SubscriptionPayload,
            SubscriptionResponse,
            TotalPriceRequest,
            TotalPriceResponse,
            ApiErrorResponse,
            ApiError,
        )
    ),
    tags(
        (name = "subscription", description = "Subscription management API"),
    ),
    info(
        title = "Subscriptions API",
        version = "1.0.0",
        description = "REST API for per-user subscription records and price aggregation",
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/subscriptions",
            "/subscriptions/total-price",
            "/subscriptions/{user_id}",
            "/subscriptions/{user_id}/{service_name}",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "{expected}");
        }
    }
}
