// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared fixtures: the tools domain with projects and users.

#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering}
};

use chrono::{DateTime, Utc};
use command_derive::{Entity, FieldMap, prelude::*};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

pub const PROJECT_STATUSES: [&str; 4] = ["ACTIVE", "INACTIVE", "COMPLETED", "ARCHIVED"];

/// Route test logs through the test writer; enable with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Default, PartialEq, Entity)]
pub struct Project {
    #[id]
    pub id:          Option<Uuid>,
    pub name:        Option<String>,
    pub description: Option<String>,
    pub status:      Option<String>,
    pub created_at:  Option<DateTime<Utc>>,
    pub updated_at:  Option<DateTime<Utc>>,
    pub created_by:  Option<String>,
    pub updated_by:  Option<String>,
    pub active:      Option<bool>
}

impl Project {
    pub fn urn(&self) -> String {
        match &self.id {
            Some(id) => format!("tools:project:{id}"),
            None => "tools:project:unsaved".to_owned()
        }
    }
}

#[derive(Debug, Clone, Default, FieldMap)]
#[field_map(into = "Project")]
pub struct ProjectCreateInput {
    pub name:        Option<String>,
    pub description: Option<String>,
    pub status:      Option<String>,
    pub active:      Option<bool>,
    pub created_by:  Option<String>
}

#[derive(Debug, Clone, Default, FieldMap)]
#[field_map(into = "Project")]
pub struct ProjectUpdateInput {
    pub id:          Option<Uuid>,
    pub name:        Option<String>,
    pub description: Option<String>,
    pub status:      Option<String>,
    pub active:      Option<bool>
}

#[derive(Debug, Clone, Default, PartialEq, Entity)]
#[entity(name = "User")]
pub struct Account {
    #[id]
    pub id:         Option<Uuid>,
    pub username:   Option<String>,
    pub email:      Option<String>,
    pub full_name:  Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub active:     Option<bool>
}

#[derive(Debug, Clone, Default, FieldMap)]
#[field_map(into = "Account")]
pub struct UserCreateInput {
    pub username:  Option<String>,
    pub email:     Option<String>,
    pub full_name: Option<String>
}

#[derive(Debug, Clone, Default, FieldMap)]
#[field_map(into = "Account")]
pub struct UserUpdateInput {
    pub id:        Option<Uuid>,
    pub email:     Option<String>,
    pub full_name: Option<String>
}

pub type ProjectRepository = InMemoryRepository<Project>;
pub type UserRepository = InMemoryRepository<Account>;

pub fn project_repository() -> Arc<ProjectRepository> {
    Arc::new(InMemoryRepository::new(Uuid::now_v7))
}

pub fn user_repository() -> Arc<UserRepository> {
    Arc::new(InMemoryRepository::new(Uuid::now_v7))
}

pub fn project_input(name: &str) -> ProjectCreateInput {
    ProjectCreateInput {
        name: Some(name.to_owned()),
        description: Some(format!("{name} description")),
        ..ProjectCreateInput::default()
    }
}

pub fn user_input(username: &str) -> UserCreateInput {
    UserCreateInput {
        username:  Some(username.to_owned()),
        email:     Some(format!("{username}@tools.dev")),
        full_name: Some(username.to_uppercase())
    }
}

fn project_name_taken(repo: &ProjectRepository, name: Option<&str>, own: Option<Uuid>) -> bool {
    let Some(name) = name else {
        return false;
    };
    repo.exists_where(|project| project.name.as_deref() == Some(name) && project.id != own)
        .unwrap_or(false)
}

pub fn project_create_rules(repo: Arc<ProjectRepository>) -> RuleSet<ProjectCreateInput> {
    RuleSet::new()
        .constraint(
            "name",
            |input: &ProjectCreateInput| input.name.as_deref(),
            |check| {
                check
                    .not_blank()
                    .message("Project name is required")
                    .max_chars(255)
            }
        )
        .constraint(
            "description",
            |input: &ProjectCreateInput| input.description.as_deref(),
            |check| check.max_chars(1000)
        )
        .constraint(
            "status",
            |input: &ProjectCreateInput| input.status.as_deref(),
            |check| check.one_of(&PROJECT_STATUSES)
        )
        .constraint_on_target(
            move |input: &ProjectCreateInput| {
                !project_name_taken(&repo, input.name.as_deref(), None)
            },
            "name",
            "error.project.name.exists",
            "Project name already exists"
        )
}

pub fn project_update_rules(repo: Arc<ProjectRepository>) -> RuleSet<ProjectUpdateInput> {
    RuleSet::new()
        .constraint_on_target(
            |input: &ProjectUpdateInput| input.id.is_some(),
            "id",
            "id.required",
            "ID is required"
        )
        .constraint(
            "name",
            |input: &ProjectUpdateInput| input.name.as_deref(),
            |check| check.max_chars(255)
        )
        .constraint(
            "status",
            |input: &ProjectUpdateInput| input.status.as_deref(),
            |check| check.one_of(&PROJECT_STATUSES)
        )
        .constraint_on_target(
            move |input: &ProjectUpdateInput| {
                !project_name_taken(&repo, input.name.as_deref(), input.id)
            },
            "name",
            "error.project.name.exists",
            "Project name already exists"
        )
}

pub fn create_project(
    repo: &Arc<ProjectRepository>
) -> CreateCommand<Project, ProjectCreateInput, ProjectRepository> {
    CreateCommand::auto_mapped("createProject", Arc::clone(repo))
        .rules(project_create_rules(Arc::clone(repo)))
        .before_save(|mut project: Project, _: &ProjectCreateInput, ctx: &mut Context| {
            if project.active.is_none() {
                project.active = Some(true);
            }
            if project.status.is_none() {
                project.status = Some("ACTIVE".to_owned());
            }
            project.created_at = Some(Utc::now());
            project.created_by = ctx.user_id().map(str::to_owned);
            Ok(project)
        })
        .after_save(|project: &Project, _: &ProjectCreateInput, _: &mut Context| {
            info!(urn = %project.urn(), "project created");
            Ok(())
        })
}

pub fn update_project(
    repo: &Arc<ProjectRepository>
) -> UpdateCommand<Project, ProjectUpdateInput, ProjectRepository> {
    UpdateCommand::auto_mapped("updateProject", Arc::clone(repo), |input: &ProjectUpdateInput| {
        input.id
    })
    .rules(project_update_rules(Arc::clone(repo)))
    .before_save(|mut project: Project, _: &ProjectUpdateInput, ctx: &mut Context| {
        project.updated_at = Some(Utc::now());
        project.updated_by = ctx.user_id().map(str::to_owned);
        Ok(project)
    })
}

pub fn delete_project(repo: &Arc<ProjectRepository>) -> DeleteCommand<Project, ProjectRepository> {
    DeleteCommand::new("deleteProject", Arc::clone(repo))
}

pub fn user_create_rules(repo: Arc<UserRepository>) -> RuleSet<UserCreateInput> {
    RuleSet::new()
        .constraint(
            "username",
            |input: &UserCreateInput| input.username.as_deref(),
            |check| check.not_blank().max_chars(50).identifier()
        )
        .constraint(
            "email",
            |input: &UserCreateInput| input.email.as_deref(),
            |check| check.not_blank().email()
        )
        .constraint_on_target(
            move |input: &UserCreateInput| {
                let Some(username) = input.username.as_deref() else {
                    return true;
                };
                !repo
                    .exists_where(|user| user.username.as_deref() == Some(username))
                    .unwrap_or(false)
            },
            "username",
            "error.user.username.exists",
            "Username already exists"
        )
}

pub fn create_user(
    repo: &Arc<UserRepository>
) -> CreateCommand<Account, UserCreateInput, UserRepository> {
    CreateCommand::auto_mapped("createUser", Arc::clone(repo))
        .rules(user_create_rules(Arc::clone(repo)))
        .before_save(|mut user: Account, _: &UserCreateInput, ctx: &mut Context| {
            user.active = Some(true);
            user.created_at = Some(Utc::now());
            user.created_by = ctx.user_id().map(str::to_owned);
            Ok(user)
        })
}

pub fn update_user(
    repo: &Arc<UserRepository>
) -> UpdateCommand<Account, UserUpdateInput, UserRepository> {
    UpdateCommand::auto_mapped("updateUser", Arc::clone(repo), |input: &UserUpdateInput| {
        input.id
    })
    .rules(RuleSet::new().constraint(
        "email",
        |input: &UserUpdateInput| input.email.as_deref(),
        |check| check.email()
    ))
}

pub fn deactivate_user(repo: &Arc<UserRepository>) -> DeleteCommand<Account, UserRepository> {
    DeleteCommand::new("deactivateUser", Arc::clone(repo)).soft_delete(|user: &mut Account| {
        user.active = Some(false);
    })
}

/// Repository wrapper counting every call.
#[derive(Debug, Default)]
pub struct Counting<R> {
    pub inner:   R,
    pub finds:   AtomicUsize,
    pub saves:   AtomicUsize,
    pub deletes: AtomicUsize
}

impl<R> Counting<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            finds: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0)
        }
    }

    pub fn calls(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
            + self.saves.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }
}

impl<E, R> Repository<E> for Counting<R>
where
    E: Entity,
    R: Repository<E>
{
    type Error = R::Error;

    fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, Self::Error> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id)
    }

    fn save(&self, entity: E) -> Result<E, Self::Error> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(entity)
    }

    fn delete_by_id(&self, id: &E::Id) -> Result<(), Self::Error> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_by_id(id)
    }
}
