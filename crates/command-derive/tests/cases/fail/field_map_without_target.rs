// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use command_derive::FieldMap;

#[derive(FieldMap)]
pub struct ProjectInput {
    pub name: Option<String>,
}

fn main() {
    let input = ProjectInput { name: None };
    println!("{:?}", input.name);
}
