// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use command_derive::Entity;

#[derive(Entity)]
pub struct Item {
    pub name: String,
}

fn main() {
    let item = Item {
        name: String::from("anvil"),
    };
    println!("{}", item.name);
}
