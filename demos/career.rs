// demos/career.rs
// Run with:
//   RUST_LOG=funding_floor=debug cargo run --example career -- [settings.yaml] [scenario.json]

use funding_floor::host::{Career, MemoryHost};
use funding_floor::{Settings, TransactionReason, logging};

fn main() -> anyhow::Result<()> {
    logging::init("funding_floor=info")?;

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "funding_floor.yaml".into());
    let scenario_path = args.next().unwrap_or_else(|| "scenario.json".into());

    let settings = Settings {
        funding_penalty_percent: 0.02,
        funding_bonus_percent: 0.02,
        science_bonus_percent: 0.01,
        ..Settings::load(&settings_path)?
    };

    // A fresh career: no funds yet, middling reputation, a little science.
    let host = MemoryHost::new(0.0, 250.0, 120.0, settings);
    let mut career = Career::resume(host, &scenario_path)?;
    report("start", &career);

    career.spend(45_000.0, TransactionReason::VesselRollout);
    report("after rollout", &career);

    career.earn(120_000.0, TransactionReason::ContractReward);
    report("after contract", &career);

    career.research("basicRocketry", 45);
    report("after research", &career);

    career.gain_reputation(-40.0, TransactionReason::ContractPenalty);
    report("after failed contract", &career);

    career.save(&scenario_path)?;
    career.stop();
    println!("saved science_spent={} to {scenario_path}", career.science_spent());
    Ok(())
}

fn report(label: &str, career: &Career) {
    let l = career.ledger();
    println!(
        "{label:>22}: budget={:>9} funds={:>12.2} rep={:>8.3} sci={:>8.3} spent={}",
        career.budget(),
        l.funds.unwrap_or_default(),
        l.reputation.unwrap_or_default(),
        l.science.unwrap_or_default(),
        career.science_spent(),
    );
}
