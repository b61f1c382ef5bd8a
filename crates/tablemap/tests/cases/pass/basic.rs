// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use tablemap::Schema;

#[derive(Schema)]
pub struct User {
    #[tablemap(tag = "pk autoincr")]
    pub id: i64,
    #[tablemap(tag = "unique notnull")]
    pub email: String,
    pub active: bool,
    pub avatar: Box<[u8]>,
    pub bio: Box<str>,
}

fn main() {
    let descriptor = <User as tablemap::Schema>::descriptor();
    assert_eq!(descriptor.name, "User");
    assert_eq!(descriptor.fields.len(), 5);
}
