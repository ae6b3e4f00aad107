use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::error::ExchangeLogError;

const HEADER: [&str; 3] = ["Question", "Context", "Answer"];

/// Append-only CSV record of answered exchanges.
///
/// The file is opened and closed on every write. The header row is written
/// when the file is new or empty.
#[derive(Clone)]
pub struct ExchangeLog {
    path: Option<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl ExchangeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn disabled() -> Self {
        Self {
            path: None,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn append(
        &self,
        question: &str,
        context: &str,
        answer: &str,
    ) -> Result<(), ExchangeLogError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        let lock = self.write_lock.clone();
        let row = [question.to_string(), context.to_string(), answer.to_string()];

        tokio::task::spawn_blocking(move || {
            let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            write_row(&path, &row)
        })
        .await?
    }

    /// Like [`append`](Self::append), but failures are only logged.
    pub async fn record(&self, question: &str, context: &str, answer: &str) {
        if let Err(e) = self.append(question, context, answer).await {
            warn!("Failed to append exchange log: {}", e);
        }
    }
}

fn write_row(path: &Path, row: &[String; 3]) -> Result<(), ExchangeLogError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let needs_header = file.metadata()?.len() == 0;

    let mut writer = csv::Writer::from_writer(file);
    if needs_header {
        writer.write_record(HEADER)?;
    }
    writer.write_record(row)?;
    writer.flush()?;
    Ok(())
}
