use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{annotate_nearby_colleges, Gazetteer, Page, SearchPipeline};
use crate::models::{
    CollegesResponse, ErrorResponse, HealthResponse, Listing, RecentSearchesQuery,
    RecentSearchesResponse, SearchRequest, SearchResponse, SelectSuggestionRequest,
    SuggestionQuery, SuggestionsResponse,
};
use crate::services::{BackendClient, BackendError, CacheKey, ListingQuery, PostgresClient, PostgresError, SnapshotCache};
use std::borrow::Cow;
use std::sync::Arc;

/// Upper bound on suggestions per request
const MAX_SUGGESTION_LIMIT: usize = 50;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub cache: Arc<SnapshotCache>,
    pub postgres: Arc<PostgresClient>,
    pub gazetteer: Arc<Gazetteer>,
    pub pipeline: SearchPipeline,
    pub college_radius_km: f64,
}

/// Defaults for the suggestion endpoint, registered as separate app data
#[derive(Debug, Clone, Copy)]
pub struct SuggestionDefaults {
    pub limit: usize,
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search", web::post().to(search))
        .route("/suggestions", web::get().to(suggestions))
        .route("/suggestions/recent", web::get().to(recent_searches))
        .route("/suggestions/select", web::post().to(select_suggestion))
        .route("/colleges", web::get().to(colleges));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search listings
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "city": "Bangalore",
///   "filters": { "priceRange": { "min": 8000, "max": 15000 }, "amenities": ["wifi"], "sortBy": "price" },
///   "origin": { "lat": 12.9716, "lng": 77.5946 },
///   "limit": 20,
///   "page": 0
/// }
/// ```
async fn search(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let req = req.into_inner();
    let search_id = uuid::Uuid::new_v4().to_string();
    let query = ListingQuery::from_spec(req.city.as_deref(), &req.filters);

    tracing::info!(
        "Search {}: city={:?}, sort={:?}, limit={}, page={}",
        search_id,
        query.city,
        req.filters.sort_by,
        req.limit,
        req.page
    );

    let snapshot = match fetch_snapshot(&state, &query).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Search {}: failed to fetch listings: {}", search_id, e);
            return error_response(
                actix_web::http::StatusCode::BAD_GATEWAY,
                "Failed to fetch listings",
                e.to_string(),
            );
        }
    };

    // College filters need distances the backend may not have supplied
    let listings: Cow<[Listing]> = if req.filters.nearby_colleges.is_empty() {
        Cow::Borrowed(snapshot.as_slice())
    } else {
        Cow::Owned(
            snapshot
                .iter()
                .cloned()
                .map(|mut listing| {
                    if listing.location.nearby_colleges.is_empty() {
                        listing.location.nearby_colleges = annotate_nearby_colleges(
                            &listing,
                            state.gazetteer.colleges(),
                            state.college_radius_km,
                        );
                    }
                    listing
                })
                .collect(),
        )
    };

    let result = state.pipeline.run(
        &listings,
        &req.filters,
        req.origin.as_ref(),
        Page::new(req.limit as usize, req.page as usize),
    );

    tracing::info!(
        "Search {}: returning {} of {} matches (from {} candidates)",
        search_id,
        result.hits.len(),
        result.total_matches,
        result.total_candidates
    );

    HttpResponse::Ok().json(SearchResponse {
        search_id,
        listings: result.hits,
        total_matches: result.total_matches,
        total_candidates: result.total_candidates,
        page: req.page,
    })
}

async fn fetch_snapshot(
    state: &AppState,
    query: &ListingQuery,
) -> Result<Arc<Vec<Listing>>, BackendError> {
    let key = CacheKey::snapshot(query);

    if let Some(snapshot) = state.cache.get(&key).await {
        return Ok(snapshot);
    }

    let snapshot = Arc::new(state.backend.fetch_listings(query).await?);
    tracing::debug!("Fetched {} listings for {}", snapshot.len(), key);

    state.cache.insert(key, Arc::clone(&snapshot)).await;
    Ok(snapshot)
}

/// Location autocomplete
///
/// GET /api/v1/suggestions?q={query}&limit={n}&mode=colleges
async fn suggestions(
    gazetteer: web::Data<Gazetteer>,
    defaults: web::Data<SuggestionDefaults>,
    query: web::Query<SuggestionQuery>,
) -> impl Responder {
    let limit = query
        .limit
        .unwrap_or(defaults.limit)
        .min(MAX_SUGGESTION_LIMIT);

    let suggestions = if query.include_colleges() {
        gazetteer.suggest_with_colleges(&query.q, limit)
    } else {
        gazetteer.suggest(&query.q, limit)
    };

    tracing::debug!("{} suggestions for {:?}", suggestions.len(), query.q);

    HttpResponse::Ok().json(SuggestionsResponse {
        query: query.into_inner().q,
        suggestions,
    })
}

/// Get a user's recent searches
///
/// GET /api/v1/suggestions/recent?userId={userId}
async fn recent_searches(
    state: web::Data<AppState>,
    query: web::Query<RecentSearchesQuery>,
) -> impl Responder {
    let user_id = &query.user_id;

    match state.postgres.load_recent_searches(user_id).await {
        Ok(recent) => HttpResponse::Ok().json(RecentSearchesResponse {
            user_id: user_id.clone(),
            recent: recent.to_vec(),
        }),
        Err(e) => {
            tracing::error!("Failed to load recent searches for {}: {}", user_id, e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load recent searches",
                e.to_string(),
            )
        }
    }
}

/// Record an accepted suggestion
///
/// POST /api/v1/suggestions/select
///
/// Request body:
/// ```json
/// { "userId": "string", "name": "Koramangala" }
/// ```
async fn select_suggestion(
    state: web::Data<AppState>,
    req: web::Json<SelectSuggestionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    match state.postgres.record_recent_search(&req.user_id, &req.name).await {
        Ok(recent) => {
            tracing::debug!("Recorded recent search {:?} for {}", req.name, req.user_id);
            HttpResponse::Ok().json(RecentSearchesResponse {
                user_id: req.user_id.clone(),
                recent: recent.to_vec(),
            })
        }
        Err(PostgresError::InvalidInput(message)) => error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Invalid suggestion",
            message,
        ),
        Err(e) => {
            tracing::error!("Failed to record recent search for {}: {}", req.user_id, e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to record recent search",
                e.to_string(),
            )
        }
    }
}

/// College reference table
///
/// GET /api/v1/colleges
async fn colleges(gazetteer: web::Data<Gazetteer>) -> impl Responder {
    HttpResponse::Ok().json(CollegesResponse {
        colleges: gazetteer.colleges().to_vec(),
    })
}
