//! Store timezone lookup with the `America/Chicago` fallback.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};

use crate::schema::time_zone;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = time_zone)]
#[diesel(primary_key(store_id))]
pub struct StoreTimeZone {
  pub store_id: i64,
  pub timezone_str: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = time_zone)]
pub struct NewStoreTimeZone {
  pub store_id: i64,
  pub timezone_str: String,
}

impl NewStoreTimeZone {
  pub async fn bulk_insert(
    conn: &mut diesel_async::AsyncPgConnection,
    records: Vec<Self>,
  ) -> Result<usize, diesel::result::Error> {
    use diesel::insert_into;

    const BATCH_SIZE: usize = 1000;
    let mut total_inserted = 0;

    for chunk in records.chunks(BATCH_SIZE) {
      let inserted = insert_into(time_zone::table)
        .values(chunk)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
      total_inserted += inserted;
    }

    Ok(total_inserted)
  }
}

impl StoreTimeZone {
  /// IANA timezone name for one store; stores with no row report in
  /// `America/Chicago`.
  pub async fn timezone_for_store(
    conn: &mut diesel_async::AsyncPgConnection,
    store: i64,
  ) -> Result<String, diesel::result::Error> {
    use crate::schema::time_zone::dsl::*;

    let tz: Option<String> = time_zone
      .filter(store_id.eq(store))
      .select(timezone_str)
      .first(conn)
      .await
      .optional()?;

    Ok(tz.unwrap_or_else(|| sw_core::DEFAULT_TIMEZONE.to_string()))
  }

  pub async fn is_empty(
    conn: &mut diesel_async::AsyncPgConnection,
  ) -> Result<bool, diesel::result::Error> {
    use crate::schema::time_zone::dsl::*;

    let probe: Vec<i64> = time_zone.select(store_id).limit(1).load(conn).await?;
    Ok(probe.is_empty())
  }
}
