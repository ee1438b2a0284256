//! `key` command: print the color legend.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::constants::COLOR_KEY_MAX_DAYS;
use crate::freshness::color_from_age;

/// Print the age to color legend with a swatch per day.
#[derive(Args)]
pub struct KeyCommand {
    /// Last day to show.
    #[arg(long, default_value_t = COLOR_KEY_MAX_DAYS, value_name = "DAYS")]
    max_days: u32,
}

impl KeyCommand {
    pub fn execute(self) -> Result<()> {
        for days in 0..=self.max_days {
            let color = color_from_age(f64::from(days));
            let swatch = "      ".on_truecolor(color.red as u8, color.green as u8, 0);
            println!("{days:>3} days  {swatch}  {}", color.to_hex());
        }
        Ok(())
    }
}
