//! 测试辅助：进程内桩服务器与记录型回调

use axum::Router;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::{HttpClient, LoginRedirect, Navigator, Notifier};
use crate::model::{Role, User};
use crate::storage::MemoryStorage;

/// 在随机端口启动桩服务器，返回基础地址
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct CountingNavigator {
    count: AtomicUsize,
}

impl CountingNavigator {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn redirect_to_login(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub http: HttpClient,
    pub storage: Arc<MemoryStorage>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<CountingNavigator>,
}

pub fn harness(base_url: &str) -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(CountingNavigator::default());
    let http = HttpClient::new(
        base_url,
        storage.clone(),
        notifier.clone(),
        LoginRedirect::new(navigator.clone()),
    )
    .unwrap();

    Harness {
        http,
        storage,
        notifier,
        navigator,
    }
}

pub fn sample_user() -> User {
    User {
        id: "u1".into(),
        nome: "Ana Souza".into(),
        email: "ana@uni.br".into(),
        role: Role::Coordenador,
        especializacao: None,
        carga_horaria_max: Some(40),
        preferencia: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn sample_user_json() -> Value {
    json!({
        "id": "u1",
        "nome": "Ana Souza",
        "email": "ana@uni.br",
        "role": "COORDENADOR",
        "cargaHorariaMax": 40
    })
}
