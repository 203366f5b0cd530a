use super::client::CatalogApi;
use super::models::Book;

/// Render-only copy of the catalog for one page view.
#[derive(Debug, Default)]
pub struct ListingView {
    books: Vec<Book>,
    mounted: bool,
}

impl ListingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the catalog the first time the view is shown. Later calls do
    /// nothing; use [`ListingView::refresh`] to re-fetch.
    pub async fn mount(&mut self, api: &dyn CatalogApi) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.books = api.list().await;
    }

    /// Replaces the displayed records with a fresh fetch.
    pub async fn refresh(&mut self, api: &dyn CatalogApi) {
        self.mounted = true;
        self.books = api.list().await;
    }

    /// Displayed records in catalog order.
    pub fn rows(&self) -> &[Book] {
        &self.books
    }

    /// Displayed records whose title or author contains `query`.
    pub fn filtered<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Book> + 'a {
        self.books.iter().filter(move |book| book.matches(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use verne_authz::Availability;

    use crate::modules::books::models::NewBook;

    /// Catalog double that serves a new snapshot on every list call.
    struct ChangingCatalog {
        snapshots: Mutex<Vec<Vec<Book>>>,
        list_calls: AtomicUsize,
    }

    impl ChangingCatalog {
        fn new(snapshots: Vec<Vec<Book>>) -> Self {
            Self {
                snapshots: Mutex::new(snapshots),
                list_calls: AtomicUsize::new(0),
            }
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogApi for ChangingCatalog {
        async fn list(&self) -> Vec<Book> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let mut snapshots = self.snapshots.lock().unwrap();
            if snapshots.is_empty() {
                Vec::new()
            } else {
                snapshots.remove(0)
            }
        }

        async fn create(&self, _book: &NewBook) -> Option<Book> {
            None
        }
    }

    fn book(id: i64, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Jules Verne".to_string(),
            summary: None,
            year: None,
            isbn: None,
            publisher: None,
            category_id: None,
            status: Availability::Available,
        }
    }

    #[tokio::test]
    async fn second_mount_does_not_fetch_again() {
        let catalog = ChangingCatalog::new(vec![
            vec![book(1, "Le Château des Carpathes")],
            vec![book(2, "Mathias Sandorf")],
        ]);
        let mut listing = ListingView::new();

        listing.mount(&catalog).await;
        listing.mount(&catalog).await;

        assert_eq!(catalog.list_calls(), 1);
        assert_eq!(listing.rows().len(), 1);
        assert_eq!(listing.rows()[0].id, 1);
    }

    #[tokio::test]
    async fn refresh_replaces_displayed_rows() {
        let catalog = ChangingCatalog::new(vec![
            vec![book(1, "Le Château des Carpathes")],
            vec![book(2, "Mathias Sandorf"), book(3, "Hector Servadac")],
        ]);
        let mut listing = ListingView::new();
        listing.mount(&catalog).await;

        listing.refresh(&catalog).await;

        assert_eq!(catalog.list_calls(), 2);
        let ids: Vec<i64> = listing.rows().iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![2, 3]);

        listing.mount(&catalog).await;
        assert_eq!(catalog.list_calls(), 2);
    }

    #[tokio::test]
    async fn filtered_keeps_catalog_order() {
        let catalog = ChangingCatalog::new(vec![vec![
            book(4, "Hector Servadac"),
            book(5, "Mathias Sandorf"),
            book(6, "Le Pilote du Danube"),
        ]]);
        let mut listing = ListingView::new();
        listing.mount(&catalog).await;

        let ids: Vec<i64> = listing.filtered("DA").map(|book| book.id).collect();
        assert_eq!(ids, vec![4, 6]);
    }
}
