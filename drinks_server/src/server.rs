use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use drinks_engine::{DrinkApi, SqliteDatabase};
use log::info;

use crate::{
    auth::JwksVerifier,
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        not_found,
        CreateDrinkRoute,
        DeleteDrinkRoute,
        DrinksDetailRoute,
        DrinksRoute,
        UpdateDrinkRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🗃️ Database ready at {}", db.url());
    let verifier = JwksVerifier::discover(&config.auth).await?;
    let srv = create_server_instance(config, db, verifier)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    verifier: JwksVerifier,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let drinks_api = DrinkApi::new(db.clone());
        let verifier = verifier.clone();
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("drinks::access_log"))
            .app_data(web::Data::new(drinks_api))
            .app_data(web::Data::new(verifier))
            .app_data(json_config())
            .app_data(path_config())
            .service(health)
            .service(DrinksRoute::<SqliteDatabase>::new())
            .service(DrinksDetailRoute::<SqliteDatabase, JwksVerifier>::new())
            .service(CreateDrinkRoute::<SqliteDatabase, JwksVerifier>::new())
            .service(UpdateDrinkRoute::<SqliteDatabase, JwksVerifier>::new())
            .service(DeleteDrinkRoute::<SqliteDatabase, JwksVerifier>::new())
            .default_service(web::route().to(not_found))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}

/// Reroutes body deserialization failures through the uniform error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into())
}

/// Reroutes path parameter failures (e.g. a non-integer drink id) through the envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| ServerError::InvalidRequestPath(err.to_string()).into())
}
