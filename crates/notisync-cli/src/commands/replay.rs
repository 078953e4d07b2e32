//! Scripted replay of snapshot deliveries through a live engine.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use notisync_core::{
    EngineConfig, Identity, Lifecycle, MemorySource, NotificationRecord, Snapshot, SyncEngine,
};
use serde::{Deserialize, Serialize};

use crate::commands::common::{format_record_line, read_json_file};
use crate::error::CliError;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    pub identity: Identity,
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayStep {
    Deliver { snapshot: Snapshot },
    Stop,
    Start { identity: Identity },
}

/// What the engine published (or refused) while running a script.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    Started { step: usize, identity: String },
    List { step: usize, titles: Vec<String> },
    Banner { step: usize, record: NotificationRecord },
    Dropped { step: usize },
    Stopped { step: usize },
}

pub async fn run_replay(
    script_path: &Path,
    config: &EngineConfig,
    wait: Duration,
    as_json: bool,
) -> Result<(), CliError> {
    let script: ReplayScript = read_json_file(script_path)?;
    let events = execute_script(script, config, wait).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    let now_ms = Utc::now().timestamp_millis();
    for event in &events {
        println!("{}", format_event_line(event, now_ms));
    }
    Ok(())
}

/// Run `script` against a fresh engine over an in-memory source.
///
/// Step 0 is the initial start for `script.identity`; script steps are
/// numbered from 1.
pub async fn execute_script(
    script: ReplayScript,
    config: &EngineConfig,
    wait: Duration,
) -> Result<Vec<ReplayEvent>, CliError> {
    config.validate()?;
    let source = Arc::new(MemorySource::new());
    let engine = Arc::new(SyncEngine::new(source.clone(), config));
    let lifecycle = Lifecycle::new(Arc::clone(&engine));
    let mut list = engine.list_feed();
    let mut banners = engine.new_item_feed();
    let mut events = Vec::new();

    lifecycle.attach(script.identity.clone())?;
    events.push(ReplayEvent::Started {
        step: 0,
        identity: script.identity.to_string(),
    });

    for (index, step) in script.steps.into_iter().enumerate() {
        let step_number = index + 1;
        match step {
            ReplayStep::Deliver { snapshot } => {
                let Some(identity) = engine.identity() else {
                    events.push(ReplayEvent::Dropped { step: step_number });
                    continue;
                };
                if source.push(&identity, &snapshot) == 0 {
                    events.push(ReplayEvent::Dropped { step: step_number });
                    continue;
                }

                let published = tokio::time::timeout(wait, list.recv())
                    .await
                    .map_err(|_| CliError::Timeout {
                        step: step_number,
                        wait_ms: u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                    })??;
                events.push(ReplayEvent::List {
                    step: step_number,
                    titles: published.iter().map(|record| record.title.clone()).collect(),
                });
                // Banners are published ahead of the list they belong to.
                if let Some(record) = banners.try_recv().transpose()? {
                    events.push(ReplayEvent::Banner {
                        step: step_number,
                        record,
                    });
                }
            }
            ReplayStep::Stop => {
                lifecycle.detach();
                events.push(ReplayEvent::Stopped { step: step_number });
            }
            ReplayStep::Start { identity } => {
                lifecycle.attach(identity.clone())?;
                events.push(ReplayEvent::Started {
                    step: step_number,
                    identity: identity.to_string(),
                });
            }
        }
    }

    lifecycle.teardown();
    Ok(events)
}

pub fn format_event_line(event: &ReplayEvent, now_ms: i64) -> String {
    match event {
        ReplayEvent::Started { step, identity } => format!("[{step}] started for {identity}"),
        ReplayEvent::List { step, titles } => {
            format!("[{step}] list ({}): {}", titles.len(), titles.join(", "))
        }
        ReplayEvent::Banner { step, record } => {
            format!("[{step}] NEW {}", format_record_line(record, now_ms))
        }
        ReplayEvent::Dropped { step } => {
            format!("[{step}] dropped: no open subscription")
        }
        ReplayEvent::Stopped { step } => format!("[{step}] stopped"),
    }
}
