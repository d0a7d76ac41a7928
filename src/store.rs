use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// 1. THE CONTRACT (row trait and errors)
// =============================================================================

/// Errors surfaced by a collection actor and its client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("row rejected: {0}")]
    Rejected(String),
    #[error("store disconnected")]
    Disconnected,
}

pub type StoreResponse<T> = oneshot::Sender<Result<T, StoreError>>;

/// A row type managed by a [`CollectionActor`].
///
/// The store owns id assignment and the creation timestamp; the row is
/// built from both plus the caller's insert payload. Rows are immutable
/// once stored — collections here are insert/select only.
pub trait Record: Clone + Send + Sync + 'static {
    type Id: Ord + Clone + Send + Sync + Display + Debug;
    type Insert: Send + Sync + Debug;

    fn from_insert(
        id: Self::Id,
        created_at: DateTime<Utc>,
        payload: Self::Insert,
    ) -> Result<Self, StoreError>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    /// Insert one row; replies with the stored row including the
    /// assigned id and timestamp.
    Insert {
        payload: T::Insert,
        respond_to: StoreResponse<T>,
    },
    Get {
        id: T::Id,
        respond_to: StoreResponse<Option<T>>,
    },
    /// All rows, ordered by id ascending.
    List {
        respond_to: StoreResponse<Vec<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC COLLECTION ACTOR
// =============================================================================

/// In-process stand-in for one durable collection. It sits behind the
/// same client seam a remote store would occupy: single-row insert
/// atomicity comes from the actor processing one request at a time.
pub struct CollectionActor<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    rows: BTreeMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Record> CollectionActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: BTreeMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = CollectionClient { sender };
        (actor, client)
    }

    /// Runs until every client handle has been dropped.
    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { payload, respond_to } => {
                    let id = (self.next_id_fn)();
                    match T::from_insert(id.clone(), Utc::now(), payload) {
                        Ok(row) => {
                            self.rows.insert(id, row.clone());
                            let _ = respond_to.send(Ok(row));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let row = self.rows.get(&id).cloned();
                    let _ = respond_to.send(Ok(row));
                }
                StoreRequest::List { respond_to } => {
                    let rows = self.rows.values().cloned().collect();
                    let _ = respond_to.send(Ok(rows));
                }
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct CollectionClient<T: Record> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Record> CollectionClient<T> {
    /// Wraps an existing sender; used by the mock framework in tests.
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn insert(&self, payload: T::Insert) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Insert { payload, respond_to })
            .await
            .map_err(|_| StoreError::Disconnected)?;
        response.await.map_err(|_| StoreError::Disconnected)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { id, respond_to })
            .await
            .map_err(|_| StoreError::Disconnected)?;
        response.await.map_err(|_| StoreError::Disconnected)?
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::List { respond_to })
            .await
            .map_err(|_| StoreError::Disconnected)?;
        response.await.map_err(|_| StoreError::Disconnected)?
    }
}

// =============================================================================
// 5. FRAMEWORK TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        body: String,
        created_at: DateTime<Utc>,
    }

    #[derive(Debug)]
    struct NoteInsert {
        body: String,
    }

    impl Record for Note {
        type Id = String;
        type Insert = NoteInsert;

        fn from_insert(
            id: String,
            created_at: DateTime<Utc>,
            payload: NoteInsert,
        ) -> Result<Self, StoreError> {
            if payload.body.is_empty() {
                return Err(StoreError::Rejected("empty body".to_string()));
            }
            Ok(Self {
                id,
                body: payload.body,
                created_at,
            })
        }
    }

    fn spawn_notes() -> CollectionClient<Note> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            format!("note_{id}")
        };
        let (actor, client) = CollectionActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn insert_returns_stored_row_with_id() {
        let client = spawn_notes();

        let note = client
            .insert(NoteInsert {
                body: "first".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(note.id, "note_1");
        assert_eq!(note.body, "first");
        assert_eq!(client.get("note_1".to_string()).await.unwrap(), Some(note));
    }

    #[tokio::test]
    async fn rejected_payload_stores_nothing() {
        let client = spawn_notes();

        let err = client
            .insert(NoteInsert {
                body: String::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, StoreError::Rejected("empty body".to_string()));
        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let client = spawn_notes();
        for body in ["a", "b", "c"] {
            client
                .insert(NoteInsert {
                    body: body.to_string(),
                })
                .await
                .unwrap();
        }

        let ids: Vec<String> = client
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["note_1", "note_2", "note_3"]);
    }
}
