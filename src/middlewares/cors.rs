use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        // 前端与 API 分开部署，生产环境应收紧来源
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
