use anyhow::Result;
use simple_logger::init_with_level;

pub fn init(level: log::Level) -> Result<()> {
    init_with_level(level)?;

    Ok(())
}
