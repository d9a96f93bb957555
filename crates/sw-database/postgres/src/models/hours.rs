//! Declared business hours per (store, day-of-week). `day_of_week` follows
//! the source data: 0 = Monday through 6 = Sunday.

use chrono::NaiveTime;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};

use crate::schema::menu_hours;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = menu_hours)]
#[diesel(primary_key(store_id, day_of_week))]
pub struct MenuHours {
  pub store_id: i64,
  pub day_of_week: i16,
  pub start_time_local: NaiveTime,
  pub end_time_local: NaiveTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = menu_hours)]
pub struct NewMenuHours {
  pub store_id: i64,
  pub day_of_week: i16,
  pub start_time_local: NaiveTime,
  pub end_time_local: NaiveTime,
}

impl NewMenuHours {
  pub async fn bulk_insert(
    conn: &mut diesel_async::AsyncPgConnection,
    records: Vec<Self>,
  ) -> Result<usize, diesel::result::Error> {
    use diesel::insert_into;

    const BATCH_SIZE: usize = 1000;
    let mut total_inserted = 0;

    for chunk in records.chunks(BATCH_SIZE) {
      let inserted = insert_into(menu_hours::table)
        .values(chunk)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
      total_inserted += inserted;
    }

    Ok(total_inserted)
  }
}

impl MenuHours {
  /// Declared hours rows for one store; days with no row are treated as
  /// always-open by the report engine.
  pub async fn for_store(
    conn: &mut diesel_async::AsyncPgConnection,
    store: i64,
  ) -> Result<Vec<MenuHours>, diesel::result::Error> {
    use crate::schema::menu_hours::dsl::*;

    menu_hours.filter(store_id.eq(store)).load(conn).await
  }

  pub async fn is_empty(
    conn: &mut diesel_async::AsyncPgConnection,
  ) -> Result<bool, diesel::result::Error> {
    use crate::schema::menu_hours::dsl::*;

    let probe: Vec<i64> = menu_hours.select(store_id).limit(1).load(conn).await?;
    Ok(probe.is_empty())
  }
}
