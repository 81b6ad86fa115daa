// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use command_derive::{Entity, InMemoryRepository, Repository};

/// Entity keyed by a natural identifier.
#[derive(Entity, Debug, Clone, PartialEq)]
pub struct Tag {
    #[id]
    pub slug: String,

    pub label: String,
}

fn main() {
    let repo = InMemoryRepository::<Tag>::new(|| "generated".to_string());
    let tag = Tag {
        slug: "rust".to_string(),
        label: "Rust".to_string(),
    };

    let saved = repo.save(tag.clone()).unwrap();
    assert_eq!(saved, tag);
    assert_eq!(Tag::NAME, "Tag");
    assert_eq!(repo.find_by_id(&"rust".to_string()).unwrap(), Some(tag));
}
