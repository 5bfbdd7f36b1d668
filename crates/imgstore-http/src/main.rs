// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP front end. Serves the four `/imgStore/*` routes plus static files
//! for everything else, mirroring the original server's fallback to
//! `mg_http_serve_dir`.
//!
//! The store is wrapped in a `Mutex` purely to satisfy axum's `Send + Sync`
//! handler bound; there is still exactly one logical writer, matching the
//! specification's single-threaded, sequential request model.

mod config;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Mutex;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Bytes, Router};
use imgstore::{OpenMode, Resolution, Store};

use config::ServerConfig;

const INDEX_REDIRECT: &str = "/index.html";

struct AppState {
    store: Mutex<Store>,
    upload_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let store_path = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: imgstore-server <file> [config.toml]"))?;
    let config = match args.next() {
        Some(path) => ServerConfig::load(std::path::Path::new(&path))?,
        None => ServerConfig::default(),
    };

    let store = Store::open(&store_path, OpenMode::ReadWrite)?;
    let state = std::sync::Arc::new(AppState {
        store: Mutex::new(store),
        upload_dir: config.upload_dir.clone(),
    });

    let app = Router::new()
        .route("/imgStore/list", get(list))
        .route("/imgStore/read", get(read))
        .route("/imgStore/delete", get(delete))
        .route("/imgStore/insert", post(upload).get(commit))
        .fallback_service(tower_http::services::ServeDir::new(config.web_dir.clone()))
        .with_state(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    tracing::info!(%addr, "starting imgStore server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn error_response(err: imgstore::Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Error: {err} \n"),
    )
        .into_response()
}

/// The original server replies to a successful delete/insert with a bare
/// `302 Found` pointing at `index.html`, not the `303 See Other` axum's
/// `Redirect::to` produces.
fn redirect_to_index() -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, INDEX_REDIRECT)],
        (),
    )
        .into_response()
}

async fn list(State(state): State<std::sync::Arc<AppState>>) -> Response {
    let store = state.store.lock().unwrap();
    match imgstore::list_json(&store) {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn read(
    State(state): State<std::sync::Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(img_id) = params.get("img_id") else {
        return error_response(imgstore::Error::InvalidArgument("missing img_id".into()));
    };
    let Some(res_tag) = params.get("res") else {
        return error_response(imgstore::Error::InvalidArgument("missing res".into()));
    };

    let resolution = match Resolution::from_tag(res_tag) {
        Ok(r) => r,
        Err(err) => return error_response(err),
    };

    let mut store = state.store.lock().unwrap();
    match store.read(img_id, resolution) {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response(),
        Err(err) => error_response(err),
    }
}

async fn delete(
    State(state): State<std::sync::Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(img_id) = params.get("img_id") else {
        return error_response(imgstore::Error::InvalidArgument("missing img_id".into()));
    };

    let mut store = state.store.lock().unwrap();
    match store.delete(img_id) {
        Ok(()) => redirect_to_index(),
        Err(err) => error_response(err),
    }
}

/// Stages a raw upload body under `upload_dir/<name>`, per the query's
/// `name` parameter. The commit step (`GET` with `name` + `offset`) reads
/// this staged file back and performs the actual insert.
async fn upload(
    State(state): State<std::sync::Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let Some(name) = params.get("name") else {
        return error_response(imgstore::Error::InvalidImgId("missing name".into()));
    };

    let path = state.upload_dir.join(name);
    match std::fs::write(&path, &body) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => error_response(imgstore::Error::Io(err)),
    }
}

/// Commits a staged upload: `name` identifies both the staged file and the
/// image id it is inserted under; `offset` carries the expected byte
/// length, a quirk carried over from the original server (see
/// specification's Open Questions).
async fn commit(
    State(state): State<std::sync::Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(name) = params.get("name") else {
        return error_response(imgstore::Error::InvalidImgId("missing name".into()));
    };
    let Some(offset) = params.get("offset") else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Not found\n").into_response();
    };
    let expected_len: usize = match offset.parse() {
        Ok(n) => n,
        Err(_) => return error_response(imgstore::Error::InvalidArgument(offset.clone())),
    };

    let path = state.upload_dir.join(name);
    let buf = match std::fs::read(&path) {
        Ok(b) => b,
        Err(_) => return error_response(imgstore::Error::FileNotFound(name.clone())),
    };
    let buf = if buf.len() >= expected_len {
        buf[..expected_len].to_vec()
    } else {
        buf
    };

    let mut store = state.store.lock().unwrap();
    match store.insert(&buf, name) {
        Ok(()) => redirect_to_index(),
        Err(err) => error_response(err),
    }
}
