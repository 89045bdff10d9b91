use crate::error::ApiError;
use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use bytes::BytesMut;
use futures_util::StreamExt;
use gemmatch_core::{BudgetInput, CatalogQuery};
use gemmatch_matching::{Recommendation, RecommendationRequest, Recommender, RequestDefaults};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Largest accepted image upload
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const MAX_FIELD_BYTES: usize = 1024;

/// Largest accepted JSON preference body
pub const MAX_JSON_BYTES: usize = 16 * 1024;

pub type SharedRecommender = Arc<Recommender<Arc<dyn CatalogQuery>>>;

#[derive(Serialize)]
struct RecommendationResponse {
    message: &'static str,
    #[serde(flatten)]
    result: Recommendation,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(recommender: SharedRecommender, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(recommender.clone()))
                .configure(routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(MAX_JSON_BYTES))
        .route("/health", web::get().to(health))
        .route("/recommendations/analyze", web::post().to(analyze))
        .route("/recommendations/suggest", web::post().to(suggest));
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "title": "gemmatch",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Photo upload plus form preferences
async fn analyze(
    recommender: web::Data<SharedRecommender>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (request, image) = read_upload(payload).await?;
    let image = image.ok_or_else(|| ApiError::BadRequest("No image uploaded".to_string()))?;

    let result = run(recommender, request, RequestDefaults::analyze(), Some(image)).await?;
    Ok(HttpResponse::Ok().json(RecommendationResponse {
        message: "Image analyzed successfully",
        result,
    }))
}

/// Preferences only, no color signal
async fn suggest(
    recommender: web::Data<SharedRecommender>,
    req: web::Json<RecommendationRequest>,
) -> Result<HttpResponse, ApiError> {
    let result = run(recommender, req.into_inner(), RequestDefaults::suggest(), None).await?;
    Ok(HttpResponse::Ok().json(RecommendationResponse {
        message: "Recommendations generated",
        result,
    }))
}

/// Run the pipeline on the blocking pool; decoding and scoring are CPU work
async fn run(
    recommender: web::Data<SharedRecommender>,
    request: RecommendationRequest,
    defaults: RequestDefaults,
    image: Option<Vec<u8>>,
) -> Result<Recommendation, ApiError> {
    let recommender = recommender.get_ref().clone();
    let request_id = Uuid::new_v4();

    let result = web::block(move || {
        let span = tracing::info_span!("recommend", %request_id);
        let _guard = span.enter();
        recommender.handle(&request, &defaults, image.as_deref())
    })
    .await?;

    result.map_err(|e| {
        tracing::error!(%request_id, error = %e, "recommendation failed");
        ApiError::from(e)
    })
}

async fn read_upload(mut payload: Multipart) -> Result<(RecommendationRequest, Option<Vec<u8>>), ApiError> {
    let mut request = RecommendationRequest::default();
    let mut image = None;

    while let Some(field) = payload.next().await {
        let mut field = field?;
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let is_image = field
                .content_type()
                .map(|m| m.essence_str().starts_with("image/"))
                .unwrap_or(false);
            if !is_image {
                return Err(ApiError::BadRequest("Only image files are allowed".to_string()));
            }
            image = Some(read_field(&mut field, MAX_UPLOAD_BYTES, "Image exceeds the 5 MiB limit").await?);
            continue;
        }

        let raw = read_field(&mut field, MAX_FIELD_BYTES, "Form field too large").await?;
        let value = String::from_utf8_lossy(&raw).trim().to_string();
        match name.as_str() {
            "occasion" => request.occasion = Some(value),
            "style" => request.style = Some(value),
            "budget" => request.budget = Some(BudgetInput::Label(value)),
            "material" => request.material = Some(value),
            "category" => request.category = Some(value),
            "gender" => request.gender = Some(value),
            _ => {}
        }
    }

    Ok((request, image))
}

async fn read_field(
    field: &mut actix_multipart::Field,
    limit: usize,
    too_large: &str,
) -> Result<Vec<u8>, ApiError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if buf.len() + chunk.len() > limit {
            return Err(ApiError::BadRequest(too_large.to_string()));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.to_vec())
}
