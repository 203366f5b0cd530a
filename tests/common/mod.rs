// Shared helpers for integration tests:
// - an in-process catalog stub served by axum on an ephemeral port
// - an in-memory CatalogApi double that counts calls
// - graceful shutdown so stub servers don't linger between tests
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::response::Response;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use verne_app::books::client::CatalogApi;
use verne_app::books::models::{Book, NewBook};
use verne_authz::Availability;

/// Path the stub catalog serves its collection on.
pub const CATALOG_PATH: &str = "/api/livres/";

pub struct StubServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    pub async fn spawn(router: axum::Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });
        Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}{}", self.addr, CATALOG_PATH)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

/// An endpoint on a port nothing listens on.
pub async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{}{}", addr, CATALOG_PATH)
}

pub fn book(id: i64, title: &str, status: Availability) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: "Jules Verne".to_string(),
        summary: None,
        year: Some(1870),
        isbn: None,
        publisher: None,
        category_id: None,
        status,
    }
}

/// In-memory catalog counting how often each operation runs.
#[derive(Default)]
pub struct FakeCatalog {
    pub books: Mutex<Vec<Book>>,
    pub created: Mutex<Vec<NewBook>>,
    pub list_calls: AtomicUsize,
    pub reject_creates: bool,
}

impl FakeCatalog {
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            ..Self::default()
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject_creates: true,
            ..Self::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list(&self) -> Vec<Book> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.books.lock().unwrap().clone()
    }

    async fn create(&self, new_book: &NewBook) -> Option<Book> {
        self.created.lock().unwrap().push(new_book.clone());
        if self.reject_creates {
            return None;
        }
        let mut books = self.books.lock().unwrap();
        let stored = Book {
            id: books.len() as i64 + 1,
            title: new_book.title.clone(),
            author: new_book.author.clone(),
            summary: new_book.summary.clone(),
            year: new_book.year,
            isbn: new_book.isbn.clone(),
            publisher: new_book.publisher.clone(),
            category_id: new_book.category_id,
            status: new_book.status,
        };
        books.push(stored.clone());
        Some(stored)
    }
}

pub async fn read_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn count_cards(html: &str) -> usize {
    html.matches("<article class=\"book-card\"").count()
}
