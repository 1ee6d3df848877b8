use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::lead_type::LeadType;
use crate::models::store_visit::{NewStoreVisit, StoreVisit};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const VISIT_COLUMNS: &str = "id, visit_date, visit_time, sr_name, store_name, visit_type,
     store_category, phone_number, lead_type, follow_up_date, products, order_details,
     latitude, longitude, maps_url, location_recorded_answer, image_data, created_at";

/// Filters accepted by [`load_visits`]. All of them are optional and combined with AND.
#[derive(Debug, Default, Clone)]
pub struct VisitFilter {
    pub bounds: Option<(NaiveDate, NaiveDate)>,
    pub sr_name: Option<String>,
    pub lead_type: Option<LeadType>,
}

impl VisitFilter {
    fn where_clause(&self) -> (String, Vec<String>) {
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        if let Some((start, end)) = self.bounds {
            clauses.push("visit_date BETWEEN ? AND ?");
            values.push(start.format("%Y-%m-%d").to_string());
            values.push(end.format("%Y-%m-%d").to_string());
        }
        if let Some(sr) = &self.sr_name {
            clauses.push("sr_name = ? COLLATE NOCASE");
            values.push(sr.trim().to_string());
        }
        if let Some(lead) = self.lead_type {
            clauses.push("lead_type = ?");
            values.push(lead.to_db_str().to_string());
        }

        if clauses.is_empty() {
            (String::new(), values)
        } else {
            (format!("WHERE {}", clauses.join(" AND ")), values)
        }
    }
}

pub fn map_row(row: &Row) -> Result<StoreVisit> {
    Ok(StoreVisit {
        id: row.get("id")?,
        visit_date: row.get("visit_date")?,
        visit_time: row.get("visit_time")?,
        sr_name: row.get("sr_name")?,
        store_name: row.get("store_name")?,
        visit_type: row.get("visit_type")?,
        store_category: row.get("store_category")?,
        phone_number: row.get("phone_number")?,
        lead_type: row.get("lead_type")?,
        follow_up_date: row.get("follow_up_date")?,
        products: row.get("products")?,
        order_details: row.get("order_details")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        maps_url: row.get("maps_url")?,
        location_recorded_answer: row.get("location_recorded_answer")?,
        image_data: row.get("image_data")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a new visit and return its id.
pub fn insert_visit(conn: &Connection, v: &NewStoreVisit) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO store_visits (
            visit_date, visit_time, sr_name, store_name, visit_type, store_category,
            phone_number, lead_type, follow_up_date, products, order_details,
            latitude, longitude, maps_url, location_recorded_answer, image_data, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            v.visit_date.format("%Y-%m-%d").to_string(),
            v.visit_time.format("%H:%M:%S").to_string(),
            v.sr_name,
            v.store_name,
            v.visit_type.to_db_str(),
            v.store_category.to_db_str(),
            v.phone_number,
            v.lead_type.to_db_str(),
            v.follow_up_date.map(|d| d.format("%Y-%m-%d").to_string()),
            v.products,
            v.order_details,
            v.location.map(|c| c.latitude),
            v.location.map(|c| c.longitude),
            v.maps_url(),
            v.location_answer.to_db_str(),
            v.image_data,
            v.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_visit(pool: &mut DbPool, id: i64) -> AppResult<StoreVisit> {
    let sql = format!("SELECT {VISIT_COLUMNS} FROM store_visits WHERE id = ?1");
    pool.conn
        .query_row(&sql, [id], map_row)
        .optional()?
        .ok_or(AppError::VisitNotFound(id))
}

pub fn load_visits(pool: &mut DbPool, filter: &VisitFilter) -> AppResult<Vec<StoreVisit>> {
    let (where_sql, values) = filter.where_clause();
    let sql = format!(
        "SELECT {VISIT_COLUMNS} FROM store_visits {where_sql}
         ORDER BY visit_date ASC, visit_time ASC, id ASC"
    );

    let mut stmt = pool.conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_visits(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM store_visits", [], |row| row.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::models::coordinates::Coordinates;
    use crate::models::location_answer::LocationAnswer;
    use crate::models::store_category::StoreCategory;
    use crate::models::visit_type::VisitType;

    fn sample(sr: &str, date: &str, lead: LeadType, loc: Option<Coordinates>) -> NewStoreVisit {
        let mut v = NewStoreVisit::now(
            sr.to_string(),
            "Corner Store / Mr. Sen".to_string(),
            VisitType::New,
            StoreCategory::ModernTrade,
            "+91 98300 00000".to_string(),
            lead,
            None,
            "CIGARS".to_string(),
            None,
            loc,
            if loc.is_some() {
                LocationAnswer::Yes
            } else {
                LocationAnswer::No
            },
            "data:image/jpeg;base64,AAAA".to_string(),
        );
        v.visit_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        v
    }

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn insert_then_load_keeps_every_field() {
        let mut pool = pool();
        let loc = Coordinates::new(22.57, 88.36).unwrap();
        let id = insert_visit(
            &pool.conn,
            &sample("RAJU DAS", "2026-03-02", LeadType::Hot, Some(loc)),
        )
        .unwrap();

        let v = load_visit(&mut pool, id).unwrap();
        assert_eq!(v.id, id);
        assert_eq!(v.visit_date, "2026-03-02");
        assert_eq!(v.visit_type, "NEW VISIT");
        assert_eq!(v.store_category, "MT");
        assert_eq!(v.lead_type, "HOT");
        assert_eq!(v.latitude, Some(22.57));
        assert_eq!(
            v.maps_url.as_deref(),
            Some("https://www.google.com/maps?q=22.57,88.36")
        );
        assert_eq!(v.location_recorded_answer, "YES");
        assert_eq!(v.follow_up_date, None);
        assert_eq!(v.visit_time.len(), 8);
    }

    #[test]
    fn missing_visit_is_reported() {
        let mut pool = pool();
        assert!(matches!(
            load_visit(&mut pool, 42),
            Err(AppError::VisitNotFound(42))
        ));
    }

    #[test]
    fn filters_combine() {
        let mut pool = pool();
        for (sr, date, lead) in [
            ("RAJU DAS", "2026-01-10", LeadType::Hot),
            ("RAJU DAS", "2026-02-10", LeadType::Cold),
            ("SHUBRAM KAR", "2026-02-11", LeadType::Hot),
        ] {
            insert_visit(&pool.conn, &sample(sr, date, lead, None)).unwrap();
        }

        let feb = (
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
        );

        let all = load_visits(&mut pool, &VisitFilter::default()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(count_visits(&pool.conn).unwrap(), 3);

        let in_feb = load_visits(
            &mut pool,
            &VisitFilter {
                bounds: Some(feb),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(in_feb.len(), 2);

        let raju_hot = load_visits(
            &mut pool,
            &VisitFilter {
                sr_name: Some("raju das".into()),
                lead_type: Some(LeadType::Hot),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(raju_hot.len(), 1);
        assert_eq!(raju_hot[0].visit_date, "2026-01-10");
    }

    #[test]
    fn check_constraints_reject_unknown_labels() {
        let pool = pool();
        let res = pool.conn.execute(
            "INSERT INTO store_visits (visit_date, visit_time, sr_name, store_name, visit_type,
                store_category, phone_number, lead_type, products, location_recorded_answer,
                image_data, created_at)
             VALUES ('2026-01-01','10:00:00','A','B','MAYBE','MT','1','HOT','NONE','NO','x','now')",
            [],
        );
        assert!(res.is_err());
    }
}
