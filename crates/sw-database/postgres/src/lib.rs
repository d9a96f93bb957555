/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! # sw-database-postgres
//!
//! TimescaleDB/PostgreSQL integration for storewatch status observations.
//!
//! This crate provides async database operations using Diesel ORM with BB8
//! connection pooling. The `store_status` table is a hypertable; everything
//! else is small lookup/state data.
//!
//! ## Features
//!
//! - **Async Support**: Uses `diesel-async` with BB8 connection pool
//! - **TimescaleDB**: `store_status` observations live in a hypertable
//! - **Runtime bootstrap**: `init::init_db` creates the schema on startup
//!
//! ## Example
//!
//! ```ignore
//! use sw_database_postgres::{establish_pool, models::StoreStatus};
//!
//! let pool = establish_pool(&database_url).await?;
//! let mut conn = pool.get().await?;
//! let stores = StoreStatus::all_store_ids(&mut conn).await?;
//! ```

pub mod connection;
pub mod error;
pub mod init;
pub mod models;
pub mod schema;

// Re-export commonly used items
pub use connection::{establish_pool, DbPool};
pub use diesel::prelude::*;
pub use error::{RepositoryError, RepositoryResult};
pub use models::{
  Admission, MenuHours, NewMenuHours, NewStoreStatus, NewStoreTimeZone, ReportCache, Setting,
  StoreStatus, StoreTimeZone,
};
