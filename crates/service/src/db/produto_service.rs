use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use models::produto::{self, Entity as ProdutoEntity, ProdutoValidado};
use crate::errors::ServiceError;

/// List every produto ordered by id.
pub async fn list_produtos(db: &DatabaseConnection) -> Result<Vec<produto::Model>, ServiceError> {
    let rows = ProdutoEntity::find()
        .order_by_asc(produto::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Case-insensitive substring match on `nome`. `%` and `_` in the fragment
/// match literally.
pub async fn search_produtos_by_nome(db: &DatabaseConnection, fragment: &str) -> Result<Vec<produto::Model>, ServiceError> {
    let pattern = format!("%{}%", escape_like(&fragment.to_lowercase()));
    let rows = ProdutoEntity::find()
        .filter(Expr::expr(Func::lower(Expr::col(produto::Column::Nome))).like(LikeExpr::new(pattern).escape('\\')))
        .order_by_asc(produto::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Get a produto by id.
pub async fn get_produto(db: &DatabaseConnection, id: i64) -> Result<Option<produto::Model>, ServiceError> {
    let found = ProdutoEntity::find_by_id(id).one(db).await?;
    Ok(found)
}

/// Insert when the record has no id, otherwise overwrite the existing row.
pub async fn save_produto(db: &DatabaseConnection, p: ProdutoValidado) -> Result<produto::Model, ServiceError> {
    match p.id() {
        None => {
            let am = produto::ActiveModel {
                id: NotSet,
                nome: Set(p.nome().to_string()),
                descricao: Set(p.descricao().map(str::to_string)),
                preco: Set(p.preco()),
                quantidade_estoque: Set(p.quantidade_estoque()),
            };
            Ok(am.insert(db).await?)
        }
        Some(id) => {
            let current = ProdutoEntity::find_by_id(id).one(db).await?;
            let Some(existing) = current else { return Err(ServiceError::not_found("produto")); };
            let mut am: produto::ActiveModel = existing.into();
            am.nome = Set(p.nome().to_string());
            am.descricao = Set(p.descricao().map(str::to_string));
            am.preco = Set(p.preco());
            am.quantidade_estoque = Set(p.quantidade_estoque());
            Ok(am.update(db).await?)
        }
    }
}

/// Delete a produto; returns true if a row was removed.
pub async fn delete_produto(db: &DatabaseConnection, id: i64) -> Result<bool, ServiceError> {
    let res = ProdutoEntity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
