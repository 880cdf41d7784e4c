use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::produto::{
    repository::{mock::MockProdutoRepository, ProdutoRepository},
    service::ProdutoService,
};

use crate::openapi::ApiDoc;

pub mod produtos;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub produtos: Arc<ProdutoService>,
}

impl ServerState {
    pub fn new(produtos: Arc<ProdutoService>) -> Self {
        Self { produtos }
    }

    pub fn with_repository(repo: Arc<dyn ProdutoRepository>) -> Self {
        Self::new(Arc::new(ProdutoService::new(repo)))
    }

    /// State backed by a fresh in-memory repository.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(MockProdutoRepository::new()))
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let produtos = Router::new()
        .route("/selecionar", get(produtos::listar_produtos))
        .route("/selecionarPorNome/:nome", get(produtos::buscar_por_nome))
        .route("/inserir", axum::routing::post(produtos::inserir_produto))
        .route("/excluir/:id", axum::routing::delete(produtos::excluir_produto))
        .route("/atualizar/:id", axum::routing::put(produtos::atualizar_produto))
        .route("/atualizarParcial/:id", axum::routing::patch(produtos::atualizar_parcial));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/produtos", produtos)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
