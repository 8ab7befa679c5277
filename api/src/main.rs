use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use mz_api::{create_app, telemetry, ApiSettings, AppState};
use mz_core::{
    AccountService, AccountServiceConfig, EmailChangeConfig, EmailChangeService,
    NotificationService, NotificationServiceConfig, PurchaseService, VerificationService,
    VerificationServiceConfig,
};
use mz_infra::{
    create_mail_transport, DatabasePool, LocalAvatarStorage, MySqlPurchaseRepository,
    MySqlUserRepository, MySqlVerificationCodeRepository,
};
use mz_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging);

    if let Err(reason) = config.validate() {
        tracing::error!(error = %reason, event = "config_rejected", "Refusing to start");
        anyhow::bail!("invalid configuration: {}", reason);
    }

    tracing::info!(
        environment = %config.environment,
        mail_provider = ?config.mail.provider,
        event = "startup",
        "Starting Muza Life API server"
    );

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("failed to run database migrations")?;
    }
    if !database
        .health_check()
        .await
        .context("database health check failed")?
    {
        anyhow::bail!("database health check returned an unexpected value");
    }
    tracing::info!(stats = %database.get_statistics(), event = "db_ready", "Database ready");

    let pool = database.get_pool().clone();
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let code_repository = Arc::new(MySqlVerificationCodeRepository::new(pool.clone()));
    let purchase_repository = Arc::new(MySqlPurchaseRepository::new(pool));

    let mail_transport =
        Arc::new(create_mail_transport(&config.mail).context("failed to configure mail transport")?);
    let avatar_storage = Arc::new(
        LocalAvatarStorage::from_config(&config.storage)
            .await
            .context("failed to prepare the upload directory")?,
    );
    tracing::info!(
        upload_dir = %avatar_storage.upload_dir().display(),
        public_prefix = avatar_storage.public_prefix(),
        event = "avatar_storage_ready",
        "Avatar uploads stored locally"
    );

    let verification_service = Arc::new(VerificationService::new(
        code_repository,
        VerificationServiceConfig::from(&config.verification),
    ));
    let notification_service = Arc::new(NotificationService::new(
        mail_transport,
        NotificationServiceConfig::from_settings(&config.mail, &config.verification),
    ));

    let app_state = web::Data::new(AppState {
        account_service: Arc::new(AccountService::new(
            user_repository.clone(),
            avatar_storage,
            AccountServiceConfig::from_settings(&config.auth, &config.storage),
        )),
        email_change_service: Arc::new(EmailChangeService::new(
            user_repository,
            verification_service,
            notification_service,
            EmailChangeConfig::from(&config.mail),
        )),
        purchase_service: Arc::new(PurchaseService::new(purchase_repository)),
        settings: ApiSettings::from_config(&config),
    });

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, event = "http_bind", "Server listening");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    database.close().await;
    tracing::info!(event = "shutdown", "Server stopped");
    Ok(())
}
