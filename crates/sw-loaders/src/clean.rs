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

//! Normalization of downloaded CSVs into `*_clean.csv` siblings.
//!
//! Only `store_status.csv` needs rewriting: the textual status tokens
//! become booleans the bulk load understands. The other two files are
//! copied as-is so every table is loaded from a `_clean` file.

use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::error::LoaderResult;

/// Rewrite one status line. Replacement order matters: `inactive` contains
/// `active` as a substring.
fn normalize_status_line(line: &str) -> String {
  line.replace("inactive", "0").replace("active", "1")
}

fn clean_store_status_csv(csv_dir: &Path) -> LoaderResult<()> {
  let file_path = csv_dir.join("store_status.csv");
  let clean_file_path = csv_dir.join("store_status_clean.csv");

  if clean_file_path.exists() {
    debug!("store_status_clean.csv already exists");
    return Ok(());
  }

  let reader = BufReader::new(fs::File::open(&file_path)?);
  let mut writer = BufWriter::new(fs::File::create(&clean_file_path)?);

  for line in reader.lines() {
    let line = line?;
    if line.starts_with("store_id") {
      writeln!(writer, "{line}")?;
      continue;
    }
    writeln!(writer, "{}", normalize_status_line(&line))?;
  }
  writer.flush()?;

  Ok(())
}

fn copy_through(csv_dir: &Path, name: &str) -> LoaderResult<()> {
  let file_path = csv_dir.join(format!("{name}.csv"));
  let clean_file_path = csv_dir.join(format!("{name}_clean.csv"));

  if clean_file_path.exists() {
    debug!("{name}_clean.csv already exists");
    return Ok(());
  }

  // nothing to normalize in these files yet
  fs::copy(&file_path, &clean_file_path)?;
  Ok(())
}

/// Produce the three `*_clean.csv` files the populate step reads
pub fn clean_csv_files<P: AsRef<Path>>(csv_dir: P) -> LoaderResult<()> {
  let csv_dir = csv_dir.as_ref();
  clean_store_status_csv(csv_dir)?;
  copy_through(csv_dir, "menu_hours")?;
  copy_through(csv_dir, "time_zone_info")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn inactive_is_replaced_before_active() {
    assert_eq!(
      normalize_status_line("8139926242460185114,inactive,2023-01-24 09:06:42.605777 UTC"),
      "8139926242460185114,0,2023-01-24 09:06:42.605777 UTC"
    );
    assert_eq!(
      normalize_status_line("8139926242460185114,active,2023-01-24 09:06:42.605777 UTC"),
      "8139926242460185114,1,2023-01-24 09:06:42.605777 UTC"
    );
  }

  #[test]
  fn header_line_passes_through_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
      dir.path().join("store_status.csv"),
      "store_id,status,timestamp_utc\n1,active,2023-01-24 09:06:42 UTC\n2,inactive,2023-01-24 09:07:42 UTC\n",
    )
    .unwrap();

    clean_store_status_csv(dir.path()).unwrap();

    let cleaned = fs::read_to_string(dir.path().join("store_status_clean.csv")).unwrap();
    assert_eq!(
      cleaned,
      "store_id,status,timestamp_utc\n1,1,2023-01-24 09:06:42 UTC\n2,0,2023-01-24 09:07:42 UTC\n"
    );
  }

  #[test]
  fn existing_clean_file_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("store_status.csv"), "store_id,status,timestamp_utc\n").unwrap();
    fs::write(dir.path().join("store_status_clean.csv"), "already here\n").unwrap();

    clean_store_status_csv(dir.path()).unwrap();

    let cleaned = fs::read_to_string(dir.path().join("store_status_clean.csv")).unwrap();
    assert_eq!(cleaned, "already here\n");
  }

  #[test]
  fn passthrough_files_are_copied_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("menu_hours.csv"), "store_id,day,start,end\n1,0,09:00:00,17:00:00\n")
      .unwrap();

    copy_through(dir.path(), "menu_hours").unwrap();

    let copied = fs::read_to_string(dir.path().join("menu_hours_clean.csv")).unwrap();
    assert_eq!(copied, "store_id,day,start,end\n1,0,09:00:00,17:00:00\n");
  }
}
