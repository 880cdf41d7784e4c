use std::net::SocketAddr;

use axum::Router;
use configs::DatabaseConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes::ServerState;
use server::startup::{build_app, build_state};

struct TestApp {
    base_url: String,
}

async fn serve(app: Router) -> anyhow::Result<TestApp> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn start_in_memory() -> anyhow::Result<TestApp> {
    serve(build_app(ServerState::in_memory())).await
}

/// Postgres-backed app; `None` when no database is configured.
async fn start_postgres() -> Option<TestApp> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip postgres e2e tests.");
        return None;
    }
    let mut cfg = DatabaseConfig::from_env();
    cfg.min_connections = 1;
    let state = match build_state(&cfg).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("skip: cannot prepare database: {}", e);
            return None;
        }
    };
    serve(build_app(state)).await.ok()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_in_memory().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

async fn catalog_flow(app: &TestApp, nome: &str) -> anyhow::Result<()> {
    let c = reqwest::Client::new();
    let base = format!("{}/api/produtos", app.base_url);

    let res = c.post(format!("{}/inserir", base))
        .json(&json!({"nome": nome, "descricao": "e2e", "preco": 12.5, "quantidadeEstoque": 3}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // Search with a lower-cased fragment of the name
    let fragment = nome[..nome.len().min(10)].to_lowercase();
    let res = c.get(format!("{}/selecionarPorNome/{}", base, fragment)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let hits = res.json::<Vec<Value>>().await?;
    let created = hits.iter().find(|p| p["nome"] == nome).cloned().expect("created produto is searchable");
    let id = created["id"].as_i64().expect("numeric id");

    let res = c.patch(format!("{}/atualizarParcial/{}", base, id))
        .json(&json!({"preco": 9.99}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let saved = res.json::<Value>().await?;
    assert_eq!(saved["preco"], 9.99);
    assert_eq!(saved["quantidadeEstoque"], 3);

    let res = c.patch(format!("{}/atualizarParcial/{}", base, id))
        .json(&json!({"quantidadeestoque": -5}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.put(format!("{}/atualizar/{}", base, id))
        .json(&json!({"nome": format!("{} v2", nome), "descricao": null, "preco": 1.0, "quantidadeEstoque": 8}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let all = c.get(format!("{}/selecionar", base)).send().await?.json::<Vec<Value>>().await?;
    let row = all.iter().find(|p| p["id"] == id).expect("updated row is listed");
    assert_eq!(row["nome"], format!("{} v2", nome));
    assert_eq!(row["descricao"], Value::Null);
    assert_eq!(row["quantidadeEstoque"], 8);

    let res = c.delete(format!("{}/excluir/{}", base, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.delete(format!("{}/excluir/{}", base, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_catalog_flow_in_memory() -> anyhow::Result<()> {
    let app = start_in_memory().await?;
    catalog_flow(&app, "Widget").await
}

#[tokio::test]
async fn e2e_catalog_flow_postgres() -> anyhow::Result<()> {
    let Some(app) = start_postgres().await else { return Ok(()); };
    let nome = format!("Widget{}", Uuid::new_v4().simple());
    catalog_flow(&app, &nome).await
}
