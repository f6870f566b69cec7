// ─────────────────────────────────────────────────────────────────────────────
//  Qaif — Outgoing Transfer Tracer
//  Part of the Al-Hafiz Project, the Guardian Layer of BismillahDAO.
//
//  Qaif (قائف): "The Tracker" follows the trail of ETH leaving a wallet,
//  hop by hop, and lays the flow out as a graph of who paid whom.
//
//  In the name of Allah, the Most Gracious, the Most Merciful.
// ─────────────────────────────────────────────────────────────────────────────

use qaif::engine::qaif::Qaif;
use qaif::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
  Qaif::run().await?;
  Ok(())
}
