use anyhow::{anyhow, Result};

use mkp_status::OrderStatus;

use super::{opt_str, AdminGateway};

fn parse_status(flag: &str, raw: &str) -> Result<OrderStatus> {
    raw.parse::<OrderStatus>()
        .map_err(|e| anyhow!("invalid --{flag}: {e}"))
}

/// Status picker rows for an order currently at `current`. No network.
pub fn print_options(current: &str) -> Result<()> {
    let current = parse_status("current", current)?;
    println!("current={}", current.as_str());
    for opt in current.options() {
        println!(
            "option={} code={} selected={} enabled={} refusal={}",
            opt.status.as_str(),
            opt.status.rank(),
            opt.selected,
            opt.enabled,
            opt_str(opt.refusal.as_ref().map(|r| r.as_str())),
        );
    }
    Ok(())
}

/// Fetch the order, run the gateway, print the outcome.
pub async fn set_status(gw: &AdminGateway, id: &str, to: &str) -> Result<()> {
    let target = parse_status("to", to)?;
    let mut order = gw.fetch_order(id).await?;
    let from = order.order_status;

    let ack = gw.set_order_status(&mut order, target).await?;

    println!("order_id={}", order.id);
    println!("from={}", from.as_str());
    println!("status={}", order.order_status.as_str());
    println!("message={}", opt_str(ack.message.as_deref()));
    Ok(())
}
