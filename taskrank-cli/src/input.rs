//! Reading and decoding task batches.
//!
//! Accepts either a bare JSON array of tasks or an envelope
//! `{"tasks": [...], "strategy": "..."}`.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use taskrank_core::Task;
use thiserror::Error;
use tokio::io::AsyncReadExt;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("tasks must be a list")]
    NotAList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub tasks: Vec<Task>,
    pub strategy: Option<String>,
}

pub fn parse_batch(json: &str) -> Result<Batch, InputError> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(_) => Ok(Batch {
            tasks: serde_json::from_value(value)?,
            strategy: None,
        }),
        Value::Object(mut map) => {
            let strategy = map
                .remove("strategy")
                .map(serde_json::from_value::<Option<String>>)
                .transpose()?
                .flatten();
            let tasks = match map.remove("tasks") {
                None | Some(Value::Null) => Vec::new(),
                Some(tasks @ Value::Array(_)) => serde_json::from_value(tasks)?,
                Some(_) => return Err(InputError::NotAList),
            };
            Ok(Batch { tasks, strategy })
        }
        _ => Err(InputError::NotAList),
    }
}

/// Read the raw payload; `-` means stdin.
pub async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("read stdin")?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read {}", path.display()))
}
