use delivery_client::{
    api::ApiClient,
    flows,
    mock_backend::{self, MockState, seed::DEMO_PASSWORD},
    session::MemorySessionStore,
};
use tokio::net::TcpListener;

pub struct TestBackend {
    pub client: ApiClient,
    pub store: MemorySessionStore,
    pub state: MockState,
}

/// Starts a seeded mock backend on an ephemeral port.
pub async fn spawn_backend() -> TestBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = MockState::seeded();

    tokio::spawn(mock_backend::serve(listener, state.clone()));

    TestBackend {
        client: ApiClient::new(format!("http://{addr}")).unwrap(),
        store: MemorySessionStore::new(),
        state,
    }
}

/// Like [`spawn_backend`], with `email` already logged in.
pub async fn logged_in(email: &str) -> TestBackend {
    let backend = spawn_backend().await;
    flows::login::login(&backend.client, &backend.store, email, DEMO_PASSWORD)
        .await
        .unwrap();
    backend
}
