//! Key/value settings. One key matters today: `csv_data_changed`, flipped
//! by the ingest trigger and consumed by the populate step.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};

use crate::schema::settings;

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = settings)]
#[diesel(primary_key(setting_name))]
pub struct Setting {
  pub setting_name: String,
  pub setting_value: String,
}

impl Setting {
  pub async fn get(
    conn: &mut diesel_async::AsyncPgConnection,
    name: &str,
  ) -> Result<Option<String>, diesel::result::Error> {
    use crate::schema::settings::dsl::*;

    settings
      .filter(setting_name.eq(name))
      .select(setting_value)
      .first(conn)
      .await
      .optional()
  }

  /// Upsert a setting value
  pub async fn set(
    conn: &mut diesel_async::AsyncPgConnection,
    name: &str,
    value: &str,
  ) -> Result<usize, diesel::result::Error> {
    use crate::schema::settings::dsl::*;

    diesel::insert_into(settings)
      .values(&Setting { setting_name: name.to_string(), setting_value: value.to_string() })
      .on_conflict(setting_name)
      .do_update()
      .set(setting_value.eq(value))
      .execute(conn)
      .await
  }

  /// Insert a default only if the key is absent
  pub async fn seed(
    conn: &mut diesel_async::AsyncPgConnection,
    name: &str,
    value: &str,
  ) -> Result<usize, diesel::result::Error> {
    use crate::schema::settings::dsl::*;

    diesel::insert_into(settings)
      .values(&Setting { setting_name: name.to_string(), setting_value: value.to_string() })
      .on_conflict(setting_name)
      .do_nothing()
      .execute(conn)
      .await
  }
}
