use std::{
    path::PathBuf,
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use log::{error, info};
use rusqlite::Connection;
use tokio::sync::oneshot;

use super::migrations::run_migrations;

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

struct Worker {
    sender: mpsc::Sender<DbCommand>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Worker {
    fn drop(&mut self) {
        let mut guard = match self.thread.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                error!("Failed to send shutdown to member store thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join member store thread: {join_err:?}");
            }
        }
    }
}

/// Handle to the SQLite member store. Every statement runs on one worker
/// thread that owns the connection; clones share that thread.
#[derive(Clone)]
pub struct Database {
    worker: Arc<Worker>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let path_for_thread = db_path.clone();
        let worker = spawn_worker(move || {
            let conn = Connection::open(&path_for_thread)?;
            if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                error!("Failed to enable WAL mode: {err}");
            }
            Ok(conn)
        })?;

        info!("Member store opened at {}", db_path.display());

        Ok(Self {
            worker: Arc::new(worker),
        })
    }

    /// Private database that disappears with the last handle.
    pub fn in_memory() -> Result<Self> {
        let worker = spawn_worker(Connection::open_in_memory)?;
        Ok(Self {
            worker: Arc::new(worker),
        })
    }

    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            if reply_tx.send(task(conn)).is_err() {
                error!("Member store caller dropped before receiving result");
            }
        }));

        self.worker
            .sender
            .send(command)
            .map_err(|err| anyhow!("failed to send command to member store thread: {err}"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("member store thread terminated unexpectedly"))?
    }
}

/// Open and migrate a connection on a fresh thread, then serve commands
/// until shutdown. Returns once the schema is ready or setup failed.
fn spawn_worker<O>(open: O) -> Result<Worker>
where
    O: FnOnce() -> rusqlite::Result<Connection> + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
    let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();

    let thread = thread::Builder::new()
        .name("lovegrounds-db".into())
        .spawn(move || {
            let mut conn = match open() {
                Ok(conn) => conn,
                Err(err) => {
                    let _ = ready_tx
                        .send(Err(anyhow::Error::new(err).context("failed to open SQLite database")));
                    return;
                }
            };

            let init_result =
                run_migrations(&mut conn).context("failed to run database migrations");
            let initialized = init_result.is_ok();
            if ready_tx.send(init_result).is_err() || !initialized {
                return;
            }

            while let Ok(command) = command_rx.recv() {
                match command {
                    DbCommand::Execute(task) => task(&mut conn),
                    DbCommand::Shutdown => break,
                }
            }

            info!("Member store thread shutting down");
        })
        .context("failed to spawn member store thread")?;

    ready_rx
        .recv()
        .context("member store thread exited before signaling readiness")??;

    Ok(Worker {
        sender: command_tx,
        thread: Mutex::new(Some(thread)),
    })
}
