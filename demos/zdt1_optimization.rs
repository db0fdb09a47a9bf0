//! ZDT1 Optimization
//!
//! This example runs steady-state SMS-EMOA on the ZDT1 benchmark with the
//! hypervolume truncation rule and reports how close the final population
//! is to the true Pareto front f2 = 1 - sqrt(f1).
//!
//! Set `RUST_LOG=sms_emoa=debug` to watch individual selections.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sms_emoa::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== ZDT1 with SMS-EMOA ===\n");

    // Create a seeded RNG for reproducibility
    let mut rng = StdRng::seed_from_u64(42);

    const DIM: usize = 30;

    let mut algo = SmsEmoa::builder()
        .problem(Zdt1::new(DIM))
        .population_size(50)
        .selection_method(SelectionMethod::Hypervolume)
        .build()?;

    let result = algo.run(&MaxEvaluations::new(20_000), &mut rng)?;

    println!("Optimization complete!");
    println!("  Generations:  {}", result.generations);
    println!("  Evaluations:  {}", result.evaluations);
    println!("  Stopped:      {}", result.termination_reason);

    let front = algo.pareto_front();
    let points: Vec<&[f64]> = front.iter().map(|i| i.objectives.as_slice()).collect();
    let hv = hypervolume(&points, &[1.1, 1.1]).unwrap_or(0.0);
    println!("\nNon-dominated points: {}", front.len());
    println!("Hypervolume w.r.t. (1.1, 1.1): {:.4} (optimum ~0.8712)", hv);

    // Vertical distance to the analytic front
    let gap = front
        .iter()
        .map(|i| i.objectives[1] - (1.0 - i.objectives[0].sqrt()))
        .fold(0.0f64, f64::max);
    println!("Largest gap to the true front: {:.4}", gap);

    println!("\n{:>8} {:>8}", "f1", "f2");
    let mut sorted = front.clone();
    sorted.sort_by(|a, b| a.objectives[0].total_cmp(&b.objectives[0]));
    for ind in sorted {
        println!("{:>8.4} {:>8.4}", ind.objectives[0], ind.objectives[1]);
    }

    Ok(())
}
