// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Name mapping from Rust identifiers to SQL identifiers.
//!
//! The [`Extractor`](crate::Extractor) passes every struct and field name
//! through a [`NameMapper`] before using it as a table or column name.
//!
//! | Mapper | `UserID` | `HTTPServer` | `user_name` |
//! |--------|----------|--------------|-------------|
//! | [`snake_case`] (default) | `user_id` | `httpserver` | `user_name` |
//! | [`word_snake_case`] | `user_id` | `http_server` | `user_name` |
//! | [`verbatim`] | `UserID` | `HTTPServer` | `user_name` |

use convert_case::{Case, Casing};

/// Function turning a Rust identifier into a SQL identifier.
pub type NameMapper = fn(&str) -> String;

/// Insert `_` at lower-to-upper transitions and lowercase everything.
///
/// A run of uppercase characters is treated as a single word, so only the
/// first character of the run gets an underscore. Input without uppercase
/// characters is returned unchanged.
///
/// ```
/// use tablemap_core::naming::snake_case;
///
/// assert_eq!(snake_case("UserProfile"), "user_profile");
/// assert_eq!(snake_case("abcdEEfF"), "abcd_eef_f");
/// ```
pub fn snake_case(s: &str) -> String {
    if !s.chars().any(char::is_uppercase) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_upper = false;
    for (i, c) in s.chars().enumerate() {
        let upper = c.is_uppercase();
        if upper && i != 0 && !prev_upper {
            out.push('_');
        }
        if upper {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_upper = upper;
    }
    out
}

/// Word-boundary aware snake case (`HTTPServer` becomes `http_server`).
pub fn word_snake_case(s: &str) -> String {
    s.to_case(Case::Snake)
}

/// Keep the identifier as written.
pub fn verbatim(s: &str) -> String {
    s.to_string()
}
