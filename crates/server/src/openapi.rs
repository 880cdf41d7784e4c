use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(Serialize, ToSchema)]
pub struct ProdutoDoc {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: f64,
    #[serde(rename = "quantidadeEstoque")]
    pub quantidade_estoque: i32,
}

#[derive(Serialize, ToSchema)]
pub struct ProdutoInputDoc {
    /// At least 2 characters.
    pub nome: String,
    pub descricao: Option<String>,
    /// Must be >= 0.
    pub preco: f64,
    /// Must be >= 0.
    #[serde(rename = "quantidadeEstoque")]
    pub quantidade_estoque: i32,
}

/// Any subset of the fields; strings are accepted for numeric values.
#[derive(Serialize, ToSchema)]
pub struct ProdutoPatchDoc {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<f64>,
    #[serde(rename = "quantidadeestoque")]
    pub quantidade_estoque: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::produtos::listar_produtos,
        crate::routes::produtos::buscar_por_nome,
        crate::routes::produtos::inserir_produto,
        crate::routes::produtos::excluir_produto,
        crate::routes::produtos::atualizar_produto,
        crate::routes::produtos::atualizar_parcial,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ProdutoDoc,
            ProdutoInputDoc,
            ProdutoPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "produtos")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/produtos/selecionar",
            "/api/produtos/selecionarPorNome/{nome}",
            "/api/produtos/inserir",
            "/api/produtos/excluir/{id}",
            "/api/produtos/atualizar/{id}",
            "/api/produtos/atualizarParcial/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
