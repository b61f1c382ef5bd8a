// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use tablemap::{Extractor, Schema};

#[allow(dead_code)]
#[derive(Schema)]
pub struct Document {
    #[tablemap(tag = "pk")]
    pub id: u64,
    pub body: Vec<u8>,
    #[tablemap(skip)]
    pub checksum: String,
    pub meta: HashMap<String, String>,
    pub parent: Option<u64>,
    revision: u32,
    pub r#type: String,
}

fn main() {
    let table = Extractor::default().extract::<Document>().unwrap();
    assert_eq!(table.column_names().list(), "id, body, type");
}
