// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use command_derive::Entity;
use uuid::Uuid;

/// Entity whose identifier is assigned on first save.
#[derive(Entity, Debug, Clone)]
#[entity(name = "Workspace")]
pub struct Space {
    #[id]
    pub id: Option<Uuid>,

    pub title: String,
}

fn main() {
    let mut space = Space {
        id: None,
        title: "tools".to_string(),
    };
    assert!(space.id().is_none());

    let id = Uuid::now_v7();
    space.set_id(id);
    assert_eq!(space.id(), Some(&id));
    assert_eq!(<Space as Entity>::NAME, "Workspace");
}
