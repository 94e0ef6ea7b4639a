use anyhow::Result;
use chrono::Utc;

use mkp_status::BiddingWindow;

use super::parse_utc;

/// Phase of a bidding window at `at` (default: now). No network.
pub fn print_phase(opens: &str, closes: &str, at: Option<&str>) -> Result<()> {
    let window = BiddingWindow::new(parse_utc("opens", opens)?, parse_utc("closes", closes)?)?;
    let now = match at {
        Some(raw) => parse_utc("at", raw)?,
        None => Utc::now(),
    };

    println!("opens_at={}", window.opens_at().to_rfc3339());
    println!("closes_at={}", window.closes_at().to_rfc3339());
    println!("at={}", now.to_rfc3339());
    println!("phase={}", window.phase(now).as_str());
    println!("accepts_bids={}", window.accepts_bids(now));
    match window.remaining(now) {
        Some(d) => println!("remaining_secs={}", d.num_seconds()),
        None => println!("remaining_secs=-"),
    }
    Ok(())
}
