use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use wikikisan_backend::{
    config::Config,
    external::build_sms_sender,
    handlers,
    middlewares::create_cors,
    services::{OtpPolicy, OtpService},
    store::InMemoryPasscodeStore,
    swagger::swagger_config,
    tasks,
    utils::SystemClock,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        std::io::Error::other(e.to_string())
    })?;

    let sms_sender = build_sms_sender(&config.sms, &config.twilio);
    log::info!("SMS provider: {:?}", config.sms.provider);

    let otp_service = OtpService::new(
        Arc::new(InMemoryPasscodeStore::new()),
        sms_sender,
        Arc::new(SystemClock),
        OtpPolicy::from(&config.otp),
    );

    tasks::spawn_all(
        otp_service.clone(),
        std::time::Duration::from_secs(config.otp.sweep_interval_secs),
    );

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(otp_service.clone()))
            .app_data(handlers::json_config())
            .configure(swagger_config)
            .configure(handlers::health_config)
            .configure(handlers::otp_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
