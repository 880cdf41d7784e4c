//! Service layer for the produto catalog.
//! - `ProdutoRepository` is the storage seam, with a SeaORM and an in-memory implementation.
//! - `ProdutoService` forwards to whichever repository it is given.
//! - Validation lives in the `models` crate; this layer only persists validated records.

pub mod errors;
pub mod db;
pub mod produto;
#[cfg(test)]
pub mod test_support;
