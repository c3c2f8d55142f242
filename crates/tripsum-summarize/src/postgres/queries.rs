use sqlx::PgConnection;

use tripsum_core::{CityFare, Error, Result, TableName, TopTrip};

/// SQLSTATE `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

pub async fn count_trips(conn: &mut PgConnection, table: &TableName) -> Result<i64> {
    let sql = format!("select count(*) from {}", table.quoted());
    sqlx::query_scalar::<_, i64>(&sql)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| map_db_error(err, table))
}

pub async fn avg_fare_by_city(
    conn: &mut PgConnection,
    table: &TableName,
) -> Result<Vec<CityFare>> {
    let sql = format!(
        "select city, avg(fare)::float8 from {} group by city order by city",
        table.quoted()
    );
    let rows = sqlx::query_as::<_, (String, f64)>(&sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| map_db_error(err, table))?;

    Ok(rows
        .into_iter()
        .map(|(city, avg_fare)| CityFare { city, avg_fare })
        .collect())
}

pub async fn top_by_minutes(
    conn: &mut PgConnection,
    table: &TableName,
    top_n: u32,
) -> Result<Vec<TopTrip>> {
    let sql = format!(
        "select id::bigint, city, minutes::bigint, fare::float8 from {} order by minutes desc limit $1",
        table.quoted()
    );
    let rows = sqlx::query_as::<_, (i64, String, i64, f64)>(&sql)
        .bind(i64::from(top_n))
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| map_db_error(err, table))?;

    Ok(rows
        .into_iter()
        .map(|(id, city, minutes, fare)| TopTrip {
            id,
            city,
            minutes,
            fare,
        })
        .collect())
}

/// Tag `undefined_table` separately so callers can report it without knowing sqlx.
fn map_db_error(err: sqlx::Error, table: &TableName) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNDEFINED_TABLE) {
            return Error::MissingTable {
                table: table.to_string(),
            };
        }
    }
    Error::Db(err.to_string())
}
