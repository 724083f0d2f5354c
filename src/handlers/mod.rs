pub mod subscription;

pub use subscription::subscription_config;

use crate::error::AppError;
use actix_web::web;

/// 请求体解析失败时按统一的错误格式返回 400
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("invalid request body: {err}")).into()
    })
}

pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    subscription_config(cfg);
}
