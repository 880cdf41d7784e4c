use axum::{extract::{rejection::JsonRejection, Path, State}, Json};
use serde_json::{Map, Value};
use tracing::{debug, info};

use models::produto::{Produto, ProdutoInput, CAMPOS_PARCIAIS};

use crate::{errors::ApiError, routes::ServerState};

fn mensagem(msg: &str) -> Json<Value> {
    Json(serde_json::json!({"message": msg}))
}

#[utoipa::path(
    get, path = "/api/produtos/selecionar", tag = "produtos",
    responses(
        (status = 200, description = "All produtos", body = [crate::openapi::ProdutoDoc]),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn listar_produtos(State(state): State<ServerState>) -> Result<Json<Vec<Produto>>, ApiError> {
    let list = state.produtos.buscar_todos_produtos().await?;
    info!(count = list.len(), "list produtos");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/produtos/selecionarPorNome/{nome}", tag = "produtos",
    params(("nome" = String, Path, description = "Fragment of the name, case-insensitive")),
    responses(
        (status = 200, description = "Matching produtos, possibly none", body = [crate::openapi::ProdutoDoc]),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn buscar_por_nome(State(state): State<ServerState>, Path(nome): Path<String>) -> Result<Json<Vec<Produto>>, ApiError> {
    let list = state.produtos.buscar_por_nome(&nome).await?;
    info!(%nome, count = list.len(), "search produtos by nome");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/api/produtos/inserir", tag = "produtos",
    request_body = crate::openapi::ProdutoInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::MessageDoc),
        (status = 400, description = "Field errors keyed by field name")
    )
)]
pub async fn inserir_produto(
    State(state): State<ServerState>,
    payload: Result<Json<ProdutoInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = payload?;
    let produto = input.validar()?;
    let saved = state.produtos.salvar_produto(produto).await?;
    info!(id = saved.id, "created produto");
    Ok(mensagem("Produto inserido com sucesso"))
}

#[utoipa::path(
    delete, path = "/api/produtos/excluir/{id}", tag = "produtos",
    params(("id" = i64, Path, description = "Produto ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn excluir_produto(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<Value>, ApiError> {
    if state.produtos.buscar_por_id(id).await?.is_none() {
        return Err(ApiError::produto_nao_encontrado());
    }
    state.produtos.excluir_produto(id).await?;
    info!(id, "deleted produto");
    Ok(mensagem("Produto excluído com sucesso"))
}

#[utoipa::path(
    put, path = "/api/produtos/atualizar/{id}", tag = "produtos",
    params(("id" = i64, Path, description = "Produto ID")),
    request_body = crate::openapi::ProdutoInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 400, description = "Field errors keyed by field name"),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn atualizar_produto(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Result<Json<ProdutoInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = payload?;
    let produto = input.validar()?;
    let existente = state
        .produtos
        .buscar_por_id(id)
        .await?
        .ok_or_else(ApiError::produto_nao_encontrado)?;
    let saved = state.produtos.salvar_produto(produto.com_id(existente.id)).await?;
    info!(id = saved.id, "updated produto");
    Ok(mensagem("Produto atualizado com sucesso"))
}

#[utoipa::path(
    patch, path = "/api/produtos/atualizarParcial/{id}", tag = "produtos",
    params(("id" = i64, Path, description = "Produto ID")),
    request_body = crate::openapi::ProdutoPatchDoc,
    responses(
        (status = 200, description = "Saved produto", body = crate::openapi::ProdutoDoc),
        (status = 400, description = "Field errors keyed by field name"),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn atualizar_parcial(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Produto>, ApiError> {
    let Json(mudancas) = payload?;
    let ignored: Vec<&str> = mudancas
        .keys()
        .map(String::as_str)
        .filter(|k| !CAMPOS_PARCIAIS.contains(k))
        .collect();
    if !ignored.is_empty() {
        debug!(id, ?ignored, "ignoring unknown patch keys");
    }

    let existente = state
        .produtos
        .buscar_por_id(id)
        .await?
        .ok_or_else(ApiError::produto_nao_encontrado)?;
    let mut input = ProdutoInput::from(&existente);
    input.aplicar_mudancas(&mudancas)?;
    let produto = input.validar()?;
    let saved = state.produtos.salvar_produto(produto.com_id(existente.id)).await?;
    info!(produto = %saved, "patched produto");
    Ok(Json(saved))
}
