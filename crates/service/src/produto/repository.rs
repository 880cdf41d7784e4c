use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::produto::{Produto, ProdutoValidado};

use crate::errors::ServiceError;

/// Persistence capability for produto rows.
#[async_trait]
pub trait ProdutoRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Produto>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Produto>, ServiceError>;
    /// Case-insensitive substring match on `nome`.
    async fn find_by_nome(&self, fragment: &str) -> Result<Vec<Produto>, ServiceError>;
    /// Insert when `produto.id()` is `None`, otherwise update that row.
    async fn save(&self, produto: ProdutoValidado) -> Result<Produto, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProdutoRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProdutoRepository for SeaOrmProdutoRepository {
    async fn find_all(&self) -> Result<Vec<Produto>, ServiceError> {
        crate::db::produto_service::list_produtos(&self.db).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Produto>, ServiceError> {
        crate::db::produto_service::get_produto(&self.db, id).await
    }

    async fn find_by_nome(&self, fragment: &str) -> Result<Vec<Produto>, ServiceError> {
        crate::db::produto_service::search_produtos_by_nome(&self.db, fragment).await
    }

    async fn save(&self, produto: ProdutoValidado) -> Result<Produto, ServiceError> {
        crate::db::produto_service::save_produto(&self.db, produto).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        crate::db::produto_service::delete_produto(&self.db, id).await
    }
}

/// In-memory repository for tests and database-less runs
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockProdutoRepository {
        rows: Mutex<BTreeMap<i64, Produto>>, // key: id
        last_id: Mutex<i64>,
    }

    impl MockProdutoRepository {
        pub fn new() -> Self {
            Self::default()
        }

        fn rows(&self) -> Result<MutexGuard<'_, BTreeMap<i64, Produto>>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("produto store lock poisoned".into()))
        }

        fn next_id(&self) -> Result<i64, ServiceError> {
            let mut last = self.last_id.lock().map_err(|_| ServiceError::Db("id sequence lock poisoned".into()))?;
            *last += 1;
            Ok(*last)
        }
    }

    #[async_trait]
    impl ProdutoRepository for MockProdutoRepository {
        async fn find_all(&self) -> Result<Vec<Produto>, ServiceError> {
            Ok(self.rows()?.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Produto>, ServiceError> {
            Ok(self.rows()?.get(&id).cloned())
        }

        async fn find_by_nome(&self, fragment: &str) -> Result<Vec<Produto>, ServiceError> {
            let needle = fragment.to_lowercase();
            Ok(self
                .rows()?
                .values()
                .filter(|p| p.nome.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }

        async fn save(&self, produto: ProdutoValidado) -> Result<Produto, ServiceError> {
            match produto.id() {
                None => {
                    let id = self.next_id()?;
                    let saved = produto.into_model(id);
                    self.rows()?.insert(id, saved.clone());
                    Ok(saved)
                }
                Some(id) => {
                    let mut rows = self.rows()?;
                    let Some(slot) = rows.get_mut(&id) else { return Err(ServiceError::not_found("produto")); };
                    *slot = produto.into_model(id);
                    Ok(slot.clone())
                }
            }
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.rows()?.remove(&id).is_some())
        }
    }

}
