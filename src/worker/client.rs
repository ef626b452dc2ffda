//! Async client for the database bridge worker process.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{oneshot, Mutex};

use super::error::{WorkerError, WorkerResult};
use super::protocol::{self, methods, ConnectionParams, RequestEnvelope, ResponseEnvelope};

/// Default timeout for requests (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Async client for the bridge worker.
///
/// The client spawns the worker as a child process and communicates
/// via NDJSON (newline-delimited JSON) over stdin/stdout. Each request
/// has a unique ID for correlation with responses, enabling concurrent
/// requests over the same pipe.
///
/// # Example
///
/// ```ignore
/// use sqlferry::worker::WorkerClient;
///
/// let client = WorkerClient::spawn("./sqlferry-worker").await?;
/// let tables = client.schema_tables(&connection, &sql).await?;
/// ```
pub struct WorkerClient {
    /// Writer for sending requests to worker stdin.
    stdin: Arc<Mutex<BufWriter<ChildStdin>>>,

    /// Map of pending request IDs to response channels.
    pending: Arc<Mutex<HashMap<String, oneshot::Sender<ResponseEnvelope>>>>,

    /// Handle to the worker child process.
    _child: Child,

    /// Handle to the background reader task.
    _reader_task: tokio::task::JoinHandle<()>,

    /// Request timeout duration.
    timeout: Duration,
}

impl WorkerClient {
    /// Spawn a new worker process.
    pub async fn spawn<P: AsRef<Path>>(worker_path: P) -> WorkerResult<Self> {
        Self::spawn_with_timeout(worker_path, Duration::from_secs(DEFAULT_TIMEOUT_SECS)).await
    }

    /// Spawn a new worker process with a custom request timeout.
    pub async fn spawn_with_timeout<P: AsRef<Path>>(
        worker_path: P,
        timeout: Duration,
    ) -> WorkerResult<Self> {
        let mut child = Command::new(worker_path.as_ref())
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(WorkerError::SpawnFailed)?;

        let stdin = child.stdin.take().expect("stdin not captured");
        let stdout = child.stdout.take().expect("stdout not captured");

        let stdin = Arc::new(Mutex::new(BufWriter::new(stdin)));
        let pending: Arc<Mutex<HashMap<String, oneshot::Sender<ResponseEnvelope>>>> =
            Arc::new(Mutex::new(HashMap::new()));

        let reader_task = Self::spawn_reader_task(stdout, pending.clone());

        log::debug!("worker spawned: {}", worker_path.as_ref().display());

        Ok(Self {
            stdin,
            pending,
            _child: child,
            _reader_task: reader_task,
            timeout,
        })
    }

    /// Spawn the background task that reads responses from the worker.
    fn spawn_reader_task(
        stdout: ChildStdout,
        pending: Arc<Mutex<HashMap<String, oneshot::Sender<ResponseEnvelope>>>>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut reader = BufReader::new(stdout);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        // EOF - worker exited
                        break;
                    }
                    Ok(_) => match serde_json::from_str::<ResponseEnvelope>(&line) {
                        Ok(resp) => {
                            let mut pending = pending.lock().await;
                            if let Some(tx) = pending.remove(&resp.id) {
                                let _ = tx.send(resp);
                            }
                        }
                        Err(e) => {
                            log::warn!("worker: failed to parse response: {}", e);
                        }
                    },
                    Err(e) => {
                        log::warn!("worker: read error: {}", e);
                        break;
                    }
                }
            }

            // Worker exited - fail all pending requests.
            let mut pending = pending.lock().await;
            for (id, tx) in pending.drain() {
                let error_response = ResponseEnvelope {
                    id,
                    success: false,
                    result: None,
                    error: Some(protocol::ErrorInfo {
                        code: "WORKER_EXITED".to_string(),
                        message: "Worker process exited unexpectedly".to_string(),
                    }),
                };
                let _ = tx.send(error_response);
            }
        })
    }

    /// Send a request to the worker and wait for its response.
    pub async fn request<P, R>(&self, method: &str, params: P) -> WorkerResult<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = uuid::Uuid::new_v4().to_string();

        let request = RequestEnvelope {
            id: id.clone(),
            method: method.to_string(),
            params: serde_json::to_value(params).map_err(WorkerError::SerializeFailed)?,
        };

        // Register response channel
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().await;
            pending.insert(id.clone(), tx);
        }

        // Send request
        {
            let mut stdin = self.stdin.lock().await;
            let line =
                serde_json::to_string(&request).map_err(WorkerError::SerializeFailed)? + "\n";
            stdin
                .write_all(line.as_bytes())
                .await
                .map_err(WorkerError::WriteFailed)?;
            stdin.flush().await.map_err(WorkerError::WriteFailed)?;
        }

        // Wait for response with timeout
        let response = match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(_)) => {
                return Err(WorkerError::ChannelClosed);
            }
            Err(_) => {
                // Timeout - clean up the pending slot to avoid a leak.
                let mut pending = self.pending.lock().await;
                pending.remove(&id);
                return Err(WorkerError::Timeout(self.timeout.as_secs()));
            }
        };

        if response.success {
            let result = response.result.unwrap_or(serde_json::Value::Null);
            serde_json::from_value(result).map_err(WorkerError::DeserializeFailed)
        } else {
            let error = response.error.unwrap_or_else(|| protocol::ErrorInfo {
                code: "UNKNOWN".to_string(),
                message: "Unknown error".to_string(),
            });
            Err(Self::classify_error(&error.code, &error.message))
        }
    }

    /// Classify a worker error into a more specific error type.
    fn classify_error(code: &str, message: &str) -> WorkerError {
        match code {
            "DRIVER_NOT_FOUND" => WorkerError::DriverNotFound(message.to_string()),
            "CONNECTION_FAILED" => WorkerError::ConnectionFailed(message.to_string()),
            "INVALID_REQUEST" => WorkerError::InvalidRequest(message.to_string()),
            "METHOD_NOT_FOUND" => WorkerError::MethodNotFound(message.to_string()),
            _ => WorkerError::remote(code, message),
        }
    }

    /// Check if the worker is still running.
    pub fn is_alive(&self) -> bool {
        !self._reader_task.is_finished()
    }

    /// Get the current request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

// Convenience methods for the bridge protocol.
impl WorkerClient {
    /// Run a table-listing catalog query.
    pub async fn schema_tables(
        &self,
        connection: &ConnectionParams,
        sql: &str,
    ) -> WorkerResult<protocol::SchemaTablesResponse> {
        self.request(
            methods::SCHEMA_TABLES,
            protocol::SchemaTablesParams {
                connection: connection.clone(),
                sql: sql.to_string(),
            },
        )
        .await
    }

    /// Run a column-listing catalog query.
    pub async fn schema_columns(
        &self,
        connection: &ConnectionParams,
        sql: &str,
    ) -> WorkerResult<protocol::SchemaColumnsResponse> {
        self.request(
            methods::SCHEMA_COLUMNS,
            protocol::SchemaColumnsParams {
                connection: connection.clone(),
                sql: sql.to_string(),
            },
        )
        .await
    }

    /// Execute a statement, optionally with positional arguments.
    pub async fn execute(
        &self,
        connection: &ConnectionParams,
        sql: &str,
        args: Option<Vec<serde_json::Value>>,
    ) -> WorkerResult<protocol::SqlExecuteResponse> {
        self.request(
            methods::SQL_EXECUTE,
            protocol::SqlExecuteParams {
                connection: connection.clone(),
                sql: sql.to_string(),
                args,
            },
        )
        .await
    }

    /// Open a server-side cursor over a query's result set.
    pub async fn cursor_open(
        &self,
        connection: &ConnectionParams,
        sql: &str,
    ) -> WorkerResult<protocol::CursorOpenResponse> {
        self.request(
            methods::CURSOR_OPEN,
            protocol::CursorOpenParams {
                connection: connection.clone(),
                sql: sql.to_string(),
            },
        )
        .await
    }

    /// Fetch the next batch of rows from an open cursor.
    pub async fn cursor_fetch(
        &self,
        cursor_id: &str,
        max_rows: u32,
    ) -> WorkerResult<protocol::CursorFetchResponse> {
        self.request(
            methods::CURSOR_FETCH,
            protocol::CursorFetchParams {
                cursor_id: cursor_id.to_string(),
                max_rows,
            },
        )
        .await
    }

    /// Close a cursor. Idempotent on the worker side.
    pub async fn cursor_close(&self, cursor_id: &str) -> WorkerResult<()> {
        let _: protocol::CursorCloseResponse = self
            .request(
                methods::CURSOR_CLOSE,
                protocol::CursorCloseParams {
                    cursor_id: cursor_id.to_string(),
                },
            )
            .await?;
        Ok(())
    }
}
