use crate::db::pool::DbPool;
use crate::db::queries::count_visits;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL VISITS
    //
    let count = count_visits(&pool.conn)?;
    println!(
        "{}• Total visits:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    //
    // 3) DATE RANGE
    //
    let bounds: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(visit_date), MAX(visit_date) FROM store_visits",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    let (first_date, last_date) = bounds.unwrap_or((None, None));

    let fmt_first = first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE VISITS/DAY
    //
    if let (Some(f), Some(l)) = (first_date, last_date) {
        let d1 = parse_date(&f)?;
        let d2 = parse_date(&l)?;
        let days = (d2 - d1).num_days().max(1);

        let avg = count as f64 / days as f64;
        println!("{}• Average visits/day:{} {:.2}", CYAN, RESET, avg);
    }

    //
    // 5) PER SALESPERSON
    //
    let mut stmt = pool.conn.prepare(
        "SELECT sr_name, COUNT(*),
                SUM(CASE WHEN lead_type = 'HOT' THEN 1 ELSE 0 END)
         FROM store_visits
         GROUP BY sr_name
         ORDER BY sr_name ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut per_rep = Vec::new();
    for r in rows {
        per_rep.push(r?);
    }

    if !per_rep.is_empty() {
        println!("{}• Visits by salesperson:{}", CYAN, RESET);
        for (name, total, hot) in per_rep {
            println!("    {:<20} {:>5}  (hot leads: {})", name, total, hot);
        }
    }

    println!();
    Ok(())
}

fn parse_date(date_str: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
