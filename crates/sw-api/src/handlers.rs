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

//! Report lifecycle endpoints.
//!
//! Status replies are JSON with HTTP 200 even for "Not Found"; clients of
//! the original service poll on the body, not the status code.

use actix_files::NamedFile;
use actix_web::http::header::{
  ContentDisposition, DispositionParam, DispositionType, HeaderName, HeaderValue,
};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::{info, warn};
use uuid::Uuid;

use sw_core::TOTAL_REPORT_FILE;
use sw_database_postgres::models::{Admission, ReportCache};
use sw_database_postgres::RepositoryError;

use crate::error::ApiError;
use crate::state::AppState;
use crate::worker::ReportJob;

fn not_found() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "Not Found" }))
}

/// `GET /trigger_report`
///
/// Single-flight admission: if a report is already generating, its id is
/// returned and no new job starts. Otherwise a fresh id is registered and
/// handed to the background worker.
pub async fn trigger_report(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
  let mut conn = state.pool.get().await.map_err(RepositoryError::from)?;

  let admission = ReportCache::admit(&mut conn, Uuid::new_v4()).await?;
  match admission {
    Admission::Started(report_id) => {
      info!("starting report {report_id}");
      state.jobs.send(ReportJob::Fleet(report_id)).map_err(|_| ApiError::WorkerUnavailable)?;
    }
    Admission::Coalesced(report_id) => {
      info!("report {report_id} already in flight, coalescing");
    }
  }

  Ok(HttpResponse::Ok().json(json!({ "report_id": admission.report_id() })))
}

#[derive(Debug, Deserialize)]
pub struct GetReportQuery {
  pub report_id: Uuid,
}

/// `GET /get_report?report_id=<uuid>`
///
/// A finished row whose artifact vanished from disk is deleted before the
/// "Not Found" reply, so the cache table never points at nothing twice.
pub async fn get_report(
  state: web::Data<AppState>,
  query: web::Query<GetReportQuery>,
  req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let report_id = query.report_id;
  let mut conn = state.pool.get().await.map_err(RepositoryError::from)?;

  let Some(report) = ReportCache::find(&mut conn, report_id).await? else {
    return Ok(not_found());
  };

  let report_file = state.dirs.report_file(&report_id.to_string());
  if !report_file.exists() {
    if !report.generating {
      warn!("report {report_id} has no artifact on disk, dropping cache row");
      ReportCache::delete(&mut conn, report_id).await?;
      return Ok(not_found());
    }
    return Ok(
      HttpResponse::Ok().json(json!({ "status": "generating", "report_id": report.uuid })),
    );
  }

  if report.generating {
    return Ok(
      HttpResponse::Ok().json(json!({ "status": "generating", "report_id": report.uuid })),
    );
  }

  let named = NamedFile::open(&report_file)?.set_content_disposition(ContentDisposition {
    disposition: DispositionType::Attachment,
    parameters: vec![DispositionParam::Filename(format!("store_monitoring_{report_id}.csv"))],
  });

  let mut response = named.into_response(&req);
  response
    .headers_mut()
    .insert(HeaderName::from_static("status"), HeaderValue::from_static("Completed"));
  Ok(response)
}

/// `GET /total_report`
///
/// Serves the full-history feed; a missing artifact kicks off a background
/// rebuild guarded by the process-wide flag.
pub async fn total_report(
  state: web::Data<AppState>,
  req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let report_file = state.dirs.report_cache_dir().join(TOTAL_REPORT_FILE);

  if !report_file.exists()
    && state
      .generating_total
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_ok()
  {
    info!("total report missing, scheduling rebuild");
    state.jobs.send(ReportJob::Total).map_err(|_| ApiError::WorkerUnavailable)?;
  }

  if state.generating_total.load(Ordering::SeqCst) {
    return Ok(HttpResponse::Ok().json(json!({ "status": "generating" })));
  }

  Ok(NamedFile::open(&report_file)?.into_response(&req))
}
