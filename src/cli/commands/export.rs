use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        with_photos,
        force,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;
        ExportLogic::export(&mut pool, format, file, range, *with_photos, *force)?;
    }
    Ok(())
}
