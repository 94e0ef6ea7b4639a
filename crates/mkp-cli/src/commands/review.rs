//! One-shot approve/reject commands: payment slips, contracts, licenses.

use anyhow::Result;

use mkp_status::Resolution;

use super::{opt_str, AdminGateway};

pub async fn resolve_slip(gw: &AdminGateway, id: &str, resolution: Resolution) -> Result<()> {
    let mut slip = gw.fetch_payment_slip(id).await?;
    let from = slip.status;
    let ack = gw.resolve_payment_slip(&mut slip, resolution).await?;

    println!("slip_id={}", slip.id);
    println!("from={}", from.as_str());
    println!("status={}", slip.status.as_str());
    println!("message={}", opt_str(ack.message.as_deref()));
    Ok(())
}

pub async fn resolve_contract(gw: &AdminGateway, id: &str, resolution: Resolution) -> Result<()> {
    let mut bid = gw.fetch_won_bid(id).await?;
    let from = bid.contract_status;
    let ack = gw.resolve_contract(&mut bid, resolution).await?;

    println!("won_bid_id={}", bid.id);
    println!("from={}", from.as_str());
    println!("contract_status={}", bid.contract_status.as_str());
    println!("message={}", opt_str(ack.message.as_deref()));
    Ok(())
}

pub async fn resolve_license(
    gw: &AdminGateway,
    user_id: &str,
    resolution: Resolution,
) -> Result<()> {
    let mut license = gw.fetch_user_license(user_id).await?;
    let from = license.license_status;
    let ack = gw.resolve_license(&mut license, resolution).await?;

    println!("user_id={}", license.user_id);
    println!("from={}", from.as_str());
    println!("license_status={}", license.license_status.as_str());
    println!("message={}", opt_str(ack.message.as_deref()));
    Ok(())
}
