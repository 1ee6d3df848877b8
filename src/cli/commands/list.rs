use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{VisitFilter, load_visits};
use crate::errors::AppResult;
use crate::export::range::parse_range;
use crate::models::store_visit::StoreVisit;
use crate::utils::colors::{GREY, color_for_lead};
use crate::utils::date;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

/// Handle the `list` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        today,
        sr_name,
        lead,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;

        let bounds = if *today {
            let d = date::today();
            Some((d, d))
        } else {
            resolve_period(period)?
        };

        let visits = load_visits(
            &mut pool,
            &VisitFilter {
                bounds,
                sr_name: sr_name.clone(),
                lead_type: *lead,
            },
        )?;

        if visits.is_empty() {
            println!("No store visits for the selected period.");
            return Ok(());
        }

        print!("{}", render(&visits));
        println!("{} visit(s)", visits.len());
    }
    Ok(())
}

/// No period means the current month; `all` means no date filter.
fn resolve_period(period: &Option<String>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    match period.as_deref() {
        Some(p) if p.eq_ignore_ascii_case("all") => Ok(None),
        Some(p) => Ok(Some(parse_range(p)?)),
        None => Ok(Some(parse_range(&date::today().format("%Y-%m").to_string())?)),
    }
}

fn render(visits: &[StoreVisit]) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("DATE", 10),
        Column::new("TIME", 8),
        Column::new("SALESPERSON", 16),
        Column::new("STORE", 28),
        Column::new("TYPE", 9),
        Column::new("CAT", 6),
        Column::new("LEAD", 4),
        Column::new("FOLLOW-UP", 10),
        Column::new("PRODUCTS", 30),
        Column::new("LOC", 3),
    ]);

    for v in visits {
        let located = if v.coordinates().is_some() { "yes" } else { "-" };
        table.add_colored_row(vec![
            (v.id.to_string(), ""),
            (v.visit_date.clone(), ""),
            (v.visit_time.clone(), ""),
            (v.sr_name.clone(), ""),
            (v.store_name.clone(), ""),
            (v.visit_type.clone(), ""),
            (v.store_category.clone(), ""),
            (v.lead_type.clone(), color_for_lead(&v.lead_type)),
            (v.follow_up_date.clone().unwrap_or_else(|| "-".into()), ""),
            (v.products.clone(), ""),
            (located.into(), if located == "-" { GREY } else { "" }),
        ]);
    }

    table.render()
}
