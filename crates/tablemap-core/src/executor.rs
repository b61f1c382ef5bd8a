// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Executor seam.
//!
//! The crate never opens connections. Statements that have to run, such as
//! the DDL issued by [`StatementBuilder::create_tables`], go through an
//! [`Executor`] supplied by the caller.
//!
//! # Implementations
//!
//! | Type | Feature |
//! |------|---------|
//! | `sqlx::PgPool` | `postgres` |
//!
//! Anything else (a connection, a transaction, a test double) can implement
//! the trait in a few lines:
//!
//! ```rust,ignore
//! use tablemap::{Executor, async_trait};
//!
//! struct Dry;
//!
//! #[async_trait]
//! impl Executor for Dry {
//!     type Error = std::io::Error;
//!
//!     async fn execute(&self, sql: &str) -> Result<u64, Self::Error> {
//!         println!("{sql}");
//!         Ok(0)
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    builder::StatementBuilder,
    descriptor::Schema,
    error::{Error, Result},
    table::Table
};

/// Runs SQL text on behalf of the crate.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Error reported by the underlying driver.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute one statement and return the number of affected rows.
    async fn execute(&self, sql: &str) -> Result<u64, Self::Error>;
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for &E {
    type Error = E::Error;

    async fn execute(&self, sql: &str) -> Result<u64, Self::Error> {
        (**self).execute(sql).await
    }
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for Arc<E> {
    type Error = E::Error;

    async fn execute(&self, sql: &str) -> Result<u64, Self::Error> {
        (**self).execute(sql).await
    }
}

impl StatementBuilder {
    /// Create every table in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// [`Error::Execution`] naming the failing table. Its source is either
    /// the executor's error or the generation error returned by
    /// [`create_table_sql`](Self::create_table_sql).
    pub async fn create_tables<E: Executor + ?Sized>(
        &self,
        executor: &E,
        tables: &[Arc<Table>]
    ) -> Result<()> {
        for table in tables {
            let sql = self.create_table_sql(table).map_err(|err| {
                tracing::warn!("generating table `{}` failed: {}", table.name, err);
                Error::execution(&table.name, err)
            })?;
            tracing::debug!("creating table `{}`", table.name);
            if let Err(err) = executor.execute(&sql).await {
                tracing::warn!("creating table `{}` failed: {}", table.name, err);
                return Err(Error::execution(&table.name, err));
            }
        }
        Ok(())
    }

    /// Create the table of `T`.
    ///
    /// # Errors
    ///
    /// Extraction errors, plus everything
    /// [`create_tables`](Self::create_tables) returns.
    pub async fn create_table_in<T: Schema + ?Sized, E: Executor + ?Sized>(
        &self,
        executor: &E
    ) -> Result<()> {
        let table = self.table::<T>()?;
        self.create_tables(executor, &[table]).await
    }
}

#[cfg(feature = "postgres")]
mod postgres_impl {
    use sqlx::PgPool;

    use super::*;

    #[async_trait]
    impl Executor for PgPool {
        type Error = sqlx::Error;

        async fn execute(&self, sql: &str) -> Result<u64, Self::Error> {
            let done = sqlx::query(sql).execute(self).await?;
            Ok(done.rows_affected())
        }
    }
}
