use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::produto::{Produto, ProdutoValidado};

use crate::errors::ServiceError;
use crate::produto::repository::ProdutoRepository;

/// Application service for the catalog. Forwards to the repository it was
/// built with; it adds no rules of its own.
pub struct ProdutoService {
    repo: Arc<dyn ProdutoRepository>,
}

impl ProdutoService {
    pub fn new(repo: Arc<dyn ProdutoRepository>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn buscar_todos_produtos(&self) -> Result<Vec<Produto>, ServiceError> {
        let list = self.repo.find_all().await?;
        debug!(count = list.len(), "listed produtos");
        Ok(list)
    }

    #[instrument(skip(self))]
    pub async fn buscar_por_nome(&self, nome: &str) -> Result<Vec<Produto>, ServiceError> {
        self.repo.find_by_nome(nome).await
    }

    #[instrument(skip(self))]
    pub async fn buscar_por_id(&self, id: i64) -> Result<Option<Produto>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    #[instrument(skip(self, produto), fields(id = ?produto.id()))]
    pub async fn salvar_produto(&self, produto: ProdutoValidado) -> Result<Produto, ServiceError> {
        let saved = self.repo.save(produto).await?;
        info!(produto = %saved, "saved produto");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn excluir_produto(&self, id: i64) -> Result<bool, ServiceError> {
        self.repo.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::produto::repository::mock::MockProdutoRepository;
    use models::produto::ProdutoInput;

    fn service() -> ProdutoService {
        ProdutoService::new(Arc::new(MockProdutoRepository::new()))
    }

    fn validado(nome: &str, preco: f64) -> ProdutoValidado {
        ProdutoInput { nome: Some(nome.into()), descricao: Some("x".into()), preco: Some(preco), quantidade_estoque: Some(2) }
            .validar()
            .unwrap()
    }

    #[tokio::test]
    async fn save_then_fetch_round_trips_fields() {
        let svc = service();
        let saved = svc.salvar_produto(validado("Widget", 3.5)).await.unwrap();
        let found = svc.buscar_por_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert_eq!(found.nome, "Widget");
        assert_eq!(found.preco, 3.5);
        assert_eq!(found.descricao.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn save_with_id_updates_in_place() {
        let svc = service();
        let saved = svc.salvar_produto(validado("Widget", 3.5)).await.unwrap();
        let updated = svc.salvar_produto(validado("Gizmo", 4.0).com_id(saved.id)).await.unwrap();
        assert_eq!(updated.id, saved.id);
        let all = svc.buscar_todos_produtos().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].nome, "Gizmo");
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let svc = service();
        let saved = svc.salvar_produto(validado("Widget", 1.0)).await.unwrap();
        assert!(svc.excluir_produto(saved.id).await.unwrap());
        assert!(!svc.excluir_produto(saved.id).await.unwrap());
        assert!(svc.buscar_por_id(saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_by_name_passes_through() {
        let svc = service();
        svc.salvar_produto(validado("Widget", 1.0)).await.unwrap();
        assert_eq!(svc.buscar_por_nome("wid").await.unwrap().len(), 1);
        assert!(svc.buscar_por_nome("nada").await.unwrap().is_empty());
    }
}
