// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use tablemap::{Extractor, Schema};

#[derive(Schema)]
pub struct Timestamps {
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Schema)]
pub struct Post {
    #[tablemap(tag = "pk")]
    pub id: i64,
    pub title: String,
    #[tablemap(embed)]
    pub timestamps: Timestamps,
}

fn main() {
    let table = Extractor::default().extract::<Post>().unwrap();
    assert_eq!(table.column_names().list(), "id, title, created_at, updated_at");
}
