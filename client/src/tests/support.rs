//! Shared fixtures: a mock backend bound to an ephemeral port, a recording
//! notifier, and canned sessions/payloads.

use std::net::SocketAddr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use lostfound_shared::account::Role;

use crate::notify::{Level, Notice, Notifier};
use crate::session::MemoryStore;
use crate::{Config, Context, Session};

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
});

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: axum::Router) -> String {
    let server = axum::Server::bind(&"127.0.0.1:0".parse::<SocketAddr>().unwrap())
        .serve(router.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    format!("http://{addr}")
}

/// Captures every notice for assertion instead of rendering it.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .map(|notice| notice.message.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.notices
            .lock()
            .iter()
            .any(|notice| notice.message.contains(needle))
    }

    pub fn contains_level(&self, level: Level, needle: &str) -> bool {
        self.notices
            .lock()
            .iter()
            .any(|notice| notice.level == level && notice.message.contains(needle))
    }

    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

pub struct Harness {
    pub cx: Context,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness(base_url: &str, session: Option<Session>) -> Harness {
    Lazy::force(&TRACING);
    let store = Arc::new(match session {
        Some(session) => MemoryStore::with_session(session),
        None => MemoryStore::new(),
    });
    let notifier = Arc::new(RecordingNotifier::default());
    let config = Config {
        base_url: base_url.to_owned(),
        ..Config::default()
    };
    let cx = Context::new(config, store.clone(), notifier.clone());
    Harness {
        cx,
        store,
        notifier,
    }
}

pub fn admin_session() -> Session {
    Session {
        token: "admin-token".to_owned(),
        name: "Admin".to_owned(),
        email: "admin@campus.edu".to_owned(),
        role: Role::Admin,
    }
}

pub fn user_session() -> Session {
    Session {
        token: "user-token".to_owned(),
        name: "Chidi".to_owned(),
        email: "chidi@campus.edu".to_owned(),
        role: Role::User,
    }
}

/// A claim row in the backend's wire shape.
pub fn claim_json(id: u64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "status": status,
        "foundItem": {
            "id": id * 10,
            "itemName": format!("Item {id}"),
            "category": "ELECTRONICS",
            "user": {"email": "owner@campus.edu"}
        },
        "user": {"name": "Claimant", "email": "claimant@campus.edu"},
        "contactInformation": "0788000000",
        "proofDescription": "distinctive scratch on the lid",
        "createdAt": "2024-01-15T10:30:00"
    })
}

/// A found item row in the backend's wire shape.
pub fn found_item_json(id: u64, name: &str, owner_email: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "itemName": name,
        "category": "ACCESSORIES",
        "description": format!("{name} left in the library"),
        "foundDate": "2024-02-01",
        "locationFound": "Library",
        "status": "FOUND",
        "user": {"email": owner_email}
    })
}

/// A lost item row in the backend's wire shape.
pub fn lost_item_json(id: u64, name: &str, owner_email: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "itemName": name,
        "category": "DOCUMENTS",
        "lostDate": "2024-01-20T00:00:00",
        "locationLost": "Cafeteria",
        "status": "LOST",
        "user": {"email": owner_email}
    })
}

/// A user row in the backend's wire shape.
pub fn user_json(id: u64, name: &str, email: &str, role: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "email": email,
        "phoneNumber": "0788000000",
        "role": role
    })
}
