// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared entity, input and store for CRUD unit tests.

use std::{
    collections::BTreeMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering}
    }
};

use crate::{
    mapper::{CopyOutcome, FieldCopy, FieldMap, assign},
    repository::{Entity, Repository}
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Task {
    pub id:         Option<u32>,
    pub title:      String,
    pub done:       bool,
    pub created_by: Option<String>,
    pub active:     bool
}

impl Entity for Task {
    type Id = u32;
    const NAME: &'static str = "Task";

    fn id(&self) -> Option<&u32> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: u32) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskInput {
    pub id:         Option<u32>,
    pub title:      Option<String>,
    pub done:       Option<bool>,
    pub created_by: Option<String>
}

macro_rules! optional_copy {
    ($field:ident) => {
        FieldCopy::new(stringify!($field), |s: &TaskInput, d: &mut Task| {
            match &s.$field {
                Some(v) => {
                    assign(&mut d.$field, v.clone());
                    CopyOutcome::Copied
                }
                None => CopyOutcome::Absent
            }
        })
    };
}

impl FieldMap<Task> for TaskInput {
    fn field_copies() -> Vec<FieldCopy<Self, Task>> {
        vec![
            optional_copy!(id),
            optional_copy!(title),
            optional_copy!(done),
            optional_copy!(created_by),
        ]
    }
}

#[derive(Debug, thiserror::Error)]
#[error("store offline")]
pub struct Offline;

/// Store counting every call.
#[derive(Debug, Default)]
pub struct TaskStore {
    rows:        Mutex<BTreeMap<u32, Task>>,
    next:        AtomicUsize,
    pub finds:   AtomicUsize,
    pub saves:   AtomicUsize,
    pub deletes: AtomicUsize,
    pub offline: bool
}

impl TaskStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn offline() -> Arc<Self> {
        Arc::new(Self {
            offline: true,
            ..Self::default()
        })
    }

    pub fn insert(&self, task: Task) -> u32 {
        let id = task.id.unwrap_or(0);
        if let Ok(mut rows) = self.rows.lock() {
            rows.insert(id, task);
        }
        id
    }

    pub fn get(&self, id: u32) -> Option<Task> {
        self.rows.lock().ok().and_then(|rows| rows.get(&id).cloned())
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        Self::count(&self.finds) + Self::count(&self.saves) + Self::count(&self.deletes)
    }
}

impl Repository<Task> for TaskStore {
    type Error = Offline;

    fn find_by_id(&self, id: &u32) -> Result<Option<Task>, Offline> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(Offline);
        }
        Ok(self.get(*id))
    }

    fn save(&self, mut task: Task) -> Result<Task, Offline> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(Offline);
        }
        if task.id.is_none() {
            let next = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            task.id = u32::try_from(next).ok();
        }
        self.insert(task.clone());
        Ok(task)
    }

    fn delete_by_id(&self, id: &u32) -> Result<(), Offline> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(Offline);
        }
        if let Ok(mut rows) = self.rows.lock() {
            rows.remove(id);
        }
        Ok(())
    }
}

pub fn stored(store: &TaskStore, title: &str) -> u32 {
    let id = u32::try_from(store.next.fetch_add(1, Ordering::SeqCst) + 1).unwrap_or(u32::MAX);
    store.insert(Task {
        id: Some(id),
        title: title.to_owned(),
        created_by: Some("owner".to_owned()),
        active: true,
        ..Task::default()
    })
}
