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

//! # sw-loaders
//!
//! Data loading for storewatch source CSVs:
//!
//! - download the three source files (`store_status`, `menu_hours`,
//!   `time_zone_info`) over HTTP
//! - normalize them into `*_clean.csv` siblings
//! - bulk-load the clean files into the database, gated by the
//!   `csv_data_changed` setting
//!
//! Every load uses `ON CONFLICT DO NOTHING`, so re-running ingest over the
//! same files is a no-op.

pub mod clean;
pub mod download;
pub mod error;
pub mod ingest;

pub use clean::clean_csv_files;
pub use download::Downloader;
pub use error::{LoaderError, LoaderResult};
pub use ingest::{populate_db, run_ingest_tick};
