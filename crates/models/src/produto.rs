//! `produto` entity plus the request-side shapes that feed it.
//!
//! Every write path (insert, full update, partial update) goes through
//! [`ProdutoInput::validar`], which is the only way to obtain a
//! [`ProdutoValidado`] the repositories accept.
use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::errors::{FieldErrors, ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "produto")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nome: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub descricao: Option<String>,
    pub preco: f64,
    #[sea_orm(column_name = "quantidadeestoque")]
    #[serde(rename = "quantidadeEstoque")]
    pub quantidade_estoque: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub type Produto = Model;

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Produto{{id={}, nome='{}', descricao='{}', preco={}, quantidadeestoque={}}}",
            self.id,
            self.nome,
            self.descricao.as_deref().unwrap_or("null"),
            self.preco,
            self.quantidade_estoque
        )
    }
}

/// Keys accepted by a partial update body.
pub const CAMPOS_PARCIAIS: [&str; 4] = ["nome", "descricao", "preco", "quantidadeestoque"];

/// Candidate produto as received from a client. Fields are optional so that
/// a missing value becomes a field error rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoInput {
    #[validate(
        required(message = "O nome não pode ser nulo"),
        length(min = 2, message = "O nome deve ter pelo menos 2 caracteres")
    )]
    pub nome: Option<String>,
    pub descricao: Option<String>,
    #[validate(
        required(message = "O preço não pode ser nulo"),
        range(min = 0.0, message = "O preço deve ser pelo menos 0")
    )]
    pub preco: Option<f64>,
    #[serde(alias = "quantidadeestoque")]
    #[validate(
        required(message = "O estoque não pode ser nulo"),
        range(min = 0, message = "A quantidade deve ser pelo menos 0")
    )]
    pub quantidade_estoque: Option<i32>,
}

impl From<&Model> for ProdutoInput {
    fn from(p: &Model) -> Self {
        Self {
            nome: Some(p.nome.clone()),
            descricao: p.descricao.clone(),
            preco: Some(p.preco),
            quantidade_estoque: Some(p.quantidade_estoque),
        }
    }
}

impl ProdutoInput {
    /// Check every field constraint and return the complete record.
    pub fn validar(&self) -> Result<ProdutoValidado, ModelError> {
        self.validate().map_err(|e| ModelError::Validation(field_errors(&e)))?;
        let (Some(nome), Some(preco), Some(quantidade_estoque)) =
            (self.nome.as_ref(), self.preco, self.quantidade_estoque)
        else {
            return Err(ModelError::Validation(self.missing_fields()));
        };
        Ok(ProdutoValidado {
            id: None,
            nome: nome.clone(),
            descricao: self.descricao.clone(),
            preco,
            quantidade_estoque,
        })
    }

    /// Overwrite the fields named in `mudancas`, coercing each JSON value to
    /// the field's type. Unknown keys are ignored. Nothing is changed when
    /// any recognised value fails to coerce.
    pub fn aplicar_mudancas(&mut self, mudancas: &Map<String, Value>) -> Result<(), ModelError> {
        let mut erros = FieldErrors::new();
        let mut merged = self.clone();

        if let Some(v) = mudancas.get("nome") {
            match coerce_text(v) {
                Ok(t) => merged.nome = t,
                Err(()) => invalid(&mut erros, "nome"),
            }
        }
        if let Some(v) = mudancas.get("descricao") {
            match coerce_text(v) {
                Ok(t) => merged.descricao = t,
                Err(()) => invalid(&mut erros, "descricao"),
            }
        }
        if let Some(v) = mudancas.get("preco") {
            match coerce_decimal(v) {
                Ok(d) => merged.preco = d,
                Err(()) => invalid(&mut erros, "preco"),
            }
        }
        if let Some(v) = mudancas.get("quantidadeestoque") {
            match coerce_integer(v) {
                Ok(i) => merged.quantidade_estoque = i,
                Err(()) => invalid(&mut erros, "quantidadeestoque"),
            }
        }

        if !erros.is_empty() {
            return Err(ModelError::Coercion(erros));
        }
        *self = merged;
        Ok(())
    }

    fn missing_fields(&self) -> FieldErrors {
        let mut erros = FieldErrors::new();
        if self.nome.is_none() {
            erros.insert("nome".into(), "O nome não pode ser nulo".into());
        }
        if self.preco.is_none() {
            erros.insert("preco".into(), "O preço não pode ser nulo".into());
        }
        if self.quantidade_estoque.is_none() {
            erros.insert("quantidadeEstoque".into(), "O estoque não pode ser nulo".into());
        }
        erros
    }
}

/// A produto that passed validation. `id` is `None` until it is persisted
/// or bound to an existing row with [`ProdutoValidado::com_id`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProdutoValidado {
    id: Option<i64>,
    nome: String,
    descricao: Option<String>,
    preco: f64,
    quantidade_estoque: i32,
}

impl ProdutoValidado {
    pub fn com_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i64> { self.id }
    pub fn nome(&self) -> &str { &self.nome }
    pub fn descricao(&self) -> Option<&str> { self.descricao.as_deref() }
    pub fn preco(&self) -> f64 { self.preco }
    pub fn quantidade_estoque(&self) -> i32 { self.quantidade_estoque }

    pub fn into_model(self, id: i64) -> Model {
        Model {
            id,
            nome: self.nome,
            descricao: self.descricao,
            preco: self.preco,
            quantidade_estoque: self.quantidade_estoque,
        }
    }
}

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        if let Some(first) = errs.first() {
            let msg = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            out.insert(json_key(&field.to_string()), msg);
        }
    }
    out
}

/// Report fields under the same names clients send them.
fn json_key(field: &str) -> String {
    match field {
        "quantidade_estoque" => "quantidadeEstoque".to_string(),
        other => other.to_string(),
    }
}

fn invalid(erros: &mut FieldErrors, campo: &str) {
    erros.insert(campo.to_string(), format!("valor inválido para {campo}"));
}

fn coerce_text(v: &Value) -> Result<Option<String>, ()> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(()),
    }
}

fn coerce_decimal(v: &Value) -> Result<Option<f64>, ()> {
    let d = match v {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64().ok_or(())?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| ())?,
        _ => return Err(()),
    };
    if d.is_finite() { Ok(Some(d)) } else { Err(()) }
}

fn coerce_integer(v: &Value) -> Result<Option<i32>, ()> {
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let i = n.as_i64().ok_or(())?;
            i32::try_from(i).map(Some).map_err(|_| ())
        }
        Value::String(s) => s.trim().parse::<i32>().map(Some).map_err(|_| ()),
        _ => Err(()),
    }
}
