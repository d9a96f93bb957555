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

//! # sw-report
//!
//! The storewatch report engine.
//!
//! At the bottom sits [`interpolate`], a pure function over a store's
//! observation log, its weekly business hours, and a half-open UTC window.
//! On top of it:
//!
//! - [`builder`] assembles one store's hour/day/week figures
//! - [`fleet`] streams every store into the per-report CSV artifact
//! - [`total`] produces the full-history dashboard feed
//!
//! All interval math runs in UTC; local time is only consulted to gate
//! intervals against business hours.

pub mod builder;
pub mod error;
pub mod fleet;
pub mod interpolate;
pub mod total;

pub use builder::{build_store_report, StoreReport};
pub use error::{ReportError, ReportResult};
pub use fleet::{generate_for_all, temp_report_file};
pub use interpolate::{accumulate, StatusLogRow, WeeklyHours, Window};
pub use total::generate_total_report;
