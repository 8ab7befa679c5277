//! CORS middleware configuration for cross-origin requests.
//!
//! Development is permissive. Other environments accept only the origins
//! listed in `ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use mz_shared::Environment;

/// Preflight cache lifetime in seconds
const MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(environment: Environment, allowed_origins: &[String]) -> Cors {
    if environment.is_development() {
        create_development_cors()
    } else {
        create_restricted_cors(allowed_origins)
    }
}

fn allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ]
}

fn create_development_cors() -> Cors {
    tracing::info!(event = "cors_configured", mode = "development", "Allowing any origin");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(MAX_AGE)
        .supports_credentials()
}

fn create_restricted_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
        ])
        .max_age(MAX_AGE)
        .supports_credentials();

    for origin in allowed_origins {
        tracing::info!(event = "cors_origin_allowed", origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    if allowed_origins.is_empty() {
        tracing::warn!(
            event = "cors_no_origins",
            "ALLOWED_ORIGINS is empty, cross-origin requests will be rejected"
        );
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_restricted_cors_rejects_unknown_origin() {
        let origins = vec!["https://muzalife.com".to_string()];
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Production, &origins))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let allowed = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://muzalife.com"))
            .to_request();
        let resp = test::call_service(&app, allowed).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://muzalife.com"
        );

        let foreign = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example"))
            .to_request();
        let resp = test::try_call_service(&app, foreign).await;
        assert!(resp.map(|r| r.status() != StatusCode::OK).unwrap_or(true));
    }

    #[actix_web::test]
    async fn test_development_cors_echoes_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Development, &[]))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
