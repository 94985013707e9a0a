// Route exports
pub mod search;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use crate::models::ErrorResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(search::configure),
    );
}

/// JSON extractor config that reports malformed bodies as `ErrorResponse`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        tracing::info!("Rejected JSON body on {}: {}", req.path(), err);
        bad_request(err, "invalid_json", req)
    })
}

/// Query extractor config that reports malformed query strings as `ErrorResponse`
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| bad_request(err, "invalid_query", req))
}

fn bad_request<E>(err: E, kind: &str, _req: &HttpRequest) -> error::Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    let body = ErrorResponse {
        error: kind.to_string(),
        message: err.to_string(),
        status_code: StatusCode::BAD_REQUEST.as_u16(),
    };
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use crate::models::{SuggestionQuery, SuggestionsResponse};

    async fn echo(query: web::Query<SuggestionQuery>) -> HttpResponse {
        HttpResponse::Ok().json(SuggestionsResponse {
            query: query.into_inner().q,
            suggestions: vec![],
        })
    }

    #[actix_web::test]
    async fn test_malformed_query_is_json_error() {
        let app = test::init_service(
            App::new()
                .app_data(query_config())
                .route("/echo", web::get().to(echo)),
        )
        .await;

        let req = test::TestRequest::get().uri("/echo?q=ko&limit=many").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "invalid_query");
        assert_eq!(body.status_code, 400);
    }
}
