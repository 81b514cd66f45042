//! Single-writer actor serializing every database write.
//!
//! SQLite allows one writer at a time. Funnelling writes through one task that
//! owns one connection, and running each job in an `IMMEDIATE` transaction,
//! makes read-modify-write jobs (such as appending to a goal's edit history)
//! atomic with respect to each other.

use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use ecclesia_core::errors::{DatabaseError, Error, Result};
use log::error;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

const WRITE_QUEUE_CAPACITY: usize = 1024;

type AnyBox = Box<dyn Any + Send + 'static>;
type Job = Box<dyn FnOnce(&mut SqliteConnection) -> Result<AnyBox> + Send + 'static>;
type Reply = oneshot::Sender<Result<AnyBox>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job, Reply)>,
}

fn writer_gone() -> Error {
    Error::Database(DatabaseError::Internal(
        "Database writer is not running".to_string(),
    ))
}

impl WriteHandle {
    /// Runs `job` inside a write transaction on the writer's connection.
    ///
    /// The transaction commits when the job returns `Ok` and rolls back when it
    /// returns `Err`.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |conn| job(conn).map(|value| Box::new(value) as AnyBox)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone())?;

        let boxed = ret_rx.await.map_err(|_| writer_gone())??;
        boxed.downcast::<T>().map(|value| *value).map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "Unexpected result type from database writer".to_string(),
            ))
        })
    }
}

/// Spawns the Tokio task that owns the write connection and processes jobs in order.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(Job, Reply)>(WRITE_QUEUE_CAPACITY);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Database writer could not acquire a connection: {}", e);
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<AnyBox> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The requester may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
