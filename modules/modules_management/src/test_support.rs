use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{ModuleUpdater, UpdatedModules};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdaterCall {
    pub jahia_only: bool,
    pub fixed_flag: bool,
    pub filters: Option<Vec<String>>,
}

#[derive(Default)]
struct Inventory {
    updated: UpdatedModules,
    installed: Vec<String>,
    updates: Vec<String>,
    last_update: Option<String>,
}

/// Updater double that records every update call and replays canned answers.
///
/// A failing double fails every operation with the same kind and message.
pub struct RecordingUpdater {
    calls: Mutex<Vec<UpdaterCall>>,
    outcome: Result<Inventory, (io::ErrorKind, String)>,
}

fn strings<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl RecordingUpdater {
    fn with(outcome: Result<Inventory, (io::ErrorKind, String)>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            outcome,
        })
    }

    pub fn returning<I>(names: I) -> Arc<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::with(Ok(Inventory {
            updated: strings(names),
            ..Inventory::default()
        }))
    }

    pub fn with_inventory<I, U>(installed: I, updates: U, last_update: Option<&str>) -> Arc<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        Self::with(Ok(Inventory {
            installed: strings(installed),
            updates: strings(updates),
            last_update: last_update.map(str::to_string),
            ..Inventory::default()
        }))
    }

    pub fn failing(kind: io::ErrorKind, message: &str) -> Arc<Self> {
        Self::with(Err((kind, message.to_string())))
    }

    pub fn calls(&self) -> Vec<UpdaterCall> {
        self.calls.lock().unwrap().clone()
    }

    fn answer<T>(&self, pick: impl FnOnce(&Inventory) -> T) -> io::Result<T> {
        match &self.outcome {
            Ok(inventory) => Ok(pick(inventory)),
            Err((kind, message)) => Err(io::Error::new(*kind, message.clone())),
        }
    }
}

#[async_trait]
impl ModuleUpdater for RecordingUpdater {
    async fn update_modules(
        &self,
        jahia_only: bool,
        fixed_flag: bool,
        filters: Option<Vec<String>>,
    ) -> io::Result<UpdatedModules> {
        self.calls.lock().unwrap().push(UpdaterCall {
            jahia_only,
            fixed_flag,
            filters,
        });
        self.answer(|inv| inv.updated.clone())
    }

    async fn installed_modules(&self) -> io::Result<Vec<String>> {
        self.answer(|inv| inv.installed.clone())
    }

    async fn available_updates(&self) -> io::Result<Vec<String>> {
        self.answer(|inv| inv.updates.clone())
    }

    async fn last_update_time(&self) -> io::Result<Option<String>> {
        self.answer(|inv| inv.last_update.clone())
    }
}
