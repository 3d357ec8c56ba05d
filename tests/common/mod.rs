use alloy::primitives::{hex, I256, U256};
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::Output;
use std::sync::{Arc, Mutex};
use tokio::process::Command;

pub const FEED: &str = "0x5f4eC3Df9cbd43714FE2740f5E3616155c5b8419";

pub type Requests = Arc<Mutex<Vec<Value>>>;

/// Serve a JSON-RPC endpoint on a random local port. `responder` builds the
/// full response object for each request body.
pub async fn spawn_mock_node(responder: fn(&Value) -> Value) -> (String, Requests) {
    let requests: Requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();
    let app = Router::new().route(
        "/",
        post(move |Json(body): Json<Value>| {
            let recorded = recorded.clone();
            async move {
                let result = responder(&body);
                recorded.lock().unwrap().push(body);
                Json(result)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), requests)
}

pub fn reply(body: &Value, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": body["id"], "result": result })
}

pub fn rpc_error(body: &Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": body["id"],
        "error": { "code": code, "message": message }
    })
}

/// ABI words for roundId = 2^64 + 1, answer = 123456789000,
/// startedAt = 1700000000, updatedAt = 1700000050, answeredInRound = roundId.
pub fn sample_round_payload() -> String {
    let round_id = U256::from(18446744073709551617u128);
    let answer = I256::try_from(123456789000i64).unwrap();

    let mut out = Vec::with_capacity(5 * 32);
    out.extend_from_slice(&round_id.to_be_bytes::<32>());
    out.extend_from_slice(&answer.into_raw().to_be_bytes::<32>());
    out.extend_from_slice(&U256::from(1700000000u64).to_be_bytes::<32>());
    out.extend_from_slice(&U256::from(1700000050u64).to_be_bytes::<32>());
    out.extend_from_slice(&round_id.to_be_bytes::<32>());
    hex::encode_prefixed(out)
}

pub const SAMPLE_ROUND_OUTPUT: &str = "RoundId: 18446744073709551617\n\
                                       Latest Price: 123456789000\n\
                                       Started at: 1700000000\n\
                                       Updated at: 1700000050\n\
                                       Answered In Round: 18446744073709551617\n";

/// Fresh empty directory so no stray `.env` is picked up.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "chainlink-price-reader-{}-{}",
        std::process::id(),
        name
    ));
    match std::fs::remove_dir_all(&dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => panic!("failed to clear {}: {}", dir.display(), e),
    }
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Run the reader binary with only the given environment.
pub async fn run_reader(dir: &PathBuf, envs: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chainlink-price-reader"))
        .env_clear()
        .env("RUST_LOG", "info")
        .envs(envs.iter().copied())
        .current_dir(dir)
        .output()
        .await
        .unwrap()
}

pub async fn closed_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}
