//! Durable history store backed by a JSON-lines journal
//!
//! Every insert appends one serialized `CalculationRecord` per line. On open
//! the journal is replayed into a `HistoryIndex` that serves reads.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use shared::{CalculationId, CalculationRecord, NewCalculation};

use crate::error::{StoreError, StoreResult};
use crate::services::history_store::HistoryIndex;
use crate::traits::HistoryStore;

/// File-backed history store
///
/// Inserts are serialized on the journal writer; a record becomes visible to
/// readers only after its line has been written and synced.
#[derive(Debug)]
pub struct FileHistoryStore {
    path: PathBuf,
    inner: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    writer: Mutex<JournalWriter>,
    index: RwLock<HistoryIndex>,
}

/// Append handle plus the length of the journal's last complete record
#[derive(Debug)]
struct JournalWriter {
    file: File,
    committed_len: u64,
}

impl JournalWriter {
    /// Append one line, leaving the journal at `committed_len` on failure
    async fn append_line(&mut self, line: &[u8]) -> StoreResult<()> {
        // Drop bytes left behind by an earlier failed append
        let on_disk = self.file.metadata().await?.len();
        if on_disk != self.committed_len {
            warn!(
                on_disk,
                committed = self.committed_len,
                "Truncating uncommitted journal bytes"
            );
            self.file.set_len(self.committed_len).await?;
        }

        match self.write_synced(line).await {
            Ok(()) => {
                self.committed_len += line.len() as u64;
                Ok(())
            }
            Err(err) => {
                if let Err(truncate_err) = self.file.set_len(self.committed_len).await {
                    warn!(error = %truncate_err, "Failed to roll back partial journal write");
                }
                Err(err.into())
            }
        }
    }

    async fn write_synced(&mut self, line: &[u8]) -> std::io::Result<()> {
        self.file.write_all(line).await?;
        self.file.flush().await?;
        self.file.sync_data().await
    }
}

impl Shared {
    async fn insert(&self, calculation: NewCalculation) -> StoreResult<CalculationRecord> {
        let mut writer = self.writer.lock().await;

        let record = self.index.read().await.prepare(calculation);
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        writer.append_line(line.as_bytes()).await?;
        self.index.write().await.commit(record.clone())?;
        Ok(record)
    }
}

impl FileHistoryStore {
    /// Open (or create) the journal at `path` and replay it
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let replayed = match fs::read_to_string(&path).await {
            Ok(contents) => replay(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Replay::default(),
            Err(err) => return Err(err.into()),
        };

        let mut file = OpenOptions::new().create(true).append(true).open(&path).await?;
        // Later appends must start on a fresh line
        match replayed.tail {
            Tail::Clean => {}
            Tail::Unterminated => {
                file.write_all(b"\n").await?;
                file.flush().await?;
            }
            Tail::Torn { valid_len } => file.set_len(valid_len).await?,
        }
        let committed_len = file.metadata().await?.len();
        let index = replayed.index;

        info!(
            path = %path.display(),
            records = index.len(),
            "📂 Opened calculation history journal"
        );

        Ok(Self {
            path,
            inner: Arc::new(Shared {
                writer: Mutex::new(JournalWriter {
                    file,
                    committed_len,
                }),
                index: RwLock::new(index),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored calculations
    pub async fn len(&self) -> usize {
        self.inner.index.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.index.read().await.is_empty()
    }
}

/// How the journal ended
#[derive(Debug, Default, PartialEq, Eq)]
enum Tail {
    #[default]
    Clean,
    /// Last record is intact but its newline is missing
    Unterminated,
    /// Last line is a partial record; everything from `valid_len` on is dropped
    Torn { valid_len: u64 },
}

#[derive(Debug, Default)]
struct Replay {
    index: HistoryIndex,
    tail: Tail,
}

/// Rebuild the index from journal contents
///
/// A final line without its newline that does not parse is a torn write from
/// an interrupted insert and is skipped; any other unreadable line is
/// corruption.
fn replay(contents: &str) -> StoreResult<Replay> {
    let mut replayed = Replay::default();
    let terminated = contents.is_empty() || contents.ends_with('\n');
    let lines: Vec<&str> = contents.lines().collect();

    for (position, line) in lines.iter().enumerate() {
        let line_number = position + 1;
        let is_tail = !terminated && line_number == lines.len();
        if line.trim().is_empty() {
            continue;
        }

        let record: CalculationRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(err) if is_tail => {
                warn!(line = line_number, error = %err, "Ignoring torn journal entry");
                let valid_len = contents.rfind('\n').map_or(0, |newline| newline as u64 + 1);
                replayed.tail = Tail::Torn { valid_len };
                continue;
            }
            Err(err) => {
                return Err(StoreError::Corrupt {
                    line: line_number,
                    message: err.to_string(),
                });
            }
        };

        replayed.index.commit(record).map_err(|err| StoreError::Corrupt {
            line: line_number,
            message: err.to_string(),
        })?;
        if is_tail {
            replayed.tail = Tail::Unterminated;
        }
    }

    Ok(replayed)
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn insert(&self, calculation: NewCalculation) -> StoreResult<CalculationId> {
        // Write and commit run detached so a cancelled request cannot leave a
        // line on disk that the index never saw
        let inner = Arc::clone(&self.inner);
        let record = tokio::spawn(async move { inner.insert(calculation).await })
            .await
            .map_err(|err| StoreError::Unavailable(format!("journal append task failed: {err}")))??;

        info!(calculation_id = %record.id, path = %self.path.display(), "📝 Stored calculation");
        Ok(record.id)
    }

    async fn list(&self, limit: usize) -> StoreResult<Vec<CalculationRecord>> {
        let records = self.inner.index.read().await.latest(limit);
        debug!(limit, returned = records.len(), "Listed calculation history");
        Ok(records)
    }

    async fn get_by_id(&self, id: &CalculationId) -> StoreResult<CalculationRecord> {
        self.inner
            .index
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}
