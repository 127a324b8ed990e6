//! HTTP server setup for the health endpoint.

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};

use crate::api::health::{self, HealthState};

/// Creates and binds the health HTTP server.
///
/// Signal handling is left to the caller so the monitor and the server shut
/// down together.
pub fn health_server(state: HealthState, address: &str) -> Result<Server, std::io::Error> {
    let state = web::Data::new(state);

    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .service(health::health)
    })
    .workers(1)
    .disable_signals()
    .bind(address)?
    .run())
}
