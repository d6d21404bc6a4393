//! CLI command for the smart data cleaner

use clap::Args;

use super::{parse_day_bound, Bound};
use crate::config::Settings;
use crate::display::{format_clean_plan, format_clean_report};
use crate::error::HearthResult;
use crate::services::CleanerService;
use crate::storage::Storage;

/// Arguments of `hearth clean`
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// First day or month of the range (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    pub from: String,

    /// Last day or month of the range, inclusive (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    pub to: String,

    /// Delete without asking; otherwise only the plan is shown
    #[arg(short, long)]
    pub yes: bool,
}

/// Handle the clean command
pub fn handle_clean_command(storage: &Storage, settings: &Settings, args: CleanArgs) -> HearthResult<()> {
    let first_day = parse_day_bound(&args.from, Bound::Start)?;
    let last_day = parse_day_bound(&args.to, Bound::End)?;

    let service = CleanerService::new(storage, settings.effective_batch_size());
    let plan = service.plan(first_day, last_day)?;
    print!("{}", format_clean_plan(&plan, settings));

    if plan.is_empty() {
        return Ok(());
    }
    if !args.yes {
        println!("Use --yes to confirm deletion");
        return Ok(());
    }

    let report = service.execute(&plan, true)?;
    print!("{}", format_clean_report(&report));
    Ok(())
}
