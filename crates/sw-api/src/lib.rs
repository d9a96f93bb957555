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

//! # sw-api
//!
//! HTTP surface and background machinery for storewatch reports:
//!
//! - `GET /trigger_report` - single-flight report admission
//! - `GET /get_report?report_id=...` - status polling / artifact download
//! - `GET /total_report` - full-history dashboard feed
//!
//! Report generation never runs on a request handler; jobs go over an
//! in-process channel to a dedicated worker task. An hourly scheduler
//! refreshes the source CSVs and a janitor reclaims in-flight rows whose
//! worker died.

pub mod error;
pub mod handlers;
pub mod janitor;
pub mod scheduler;
pub mod state;
pub mod worker;

pub use error::ApiError;
pub use state::AppState;
pub use worker::{spawn_report_worker, ReportJob};

use actix_web::{web, App, HttpServer};

/// Run the HTTP server until shutdown
pub async fn run_server(state: AppState, bind_addr: &str) -> std::io::Result<()> {
  tracing::info!("storewatch api listening on {bind_addr}");

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(state.clone()))
      .route("/trigger_report", web::get().to(handlers::trigger_report))
      .route("/get_report", web::get().to(handlers::get_report))
      .route("/total_report", web::get().to(handlers::total_report))
  })
  .bind(bind_addr)?
  .run()
  .await
}
