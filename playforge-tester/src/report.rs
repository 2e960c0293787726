//! Report rendering for batch playthrough results.

use anyhow::Result;
use colored::Colorize;
use playforge_game::GameDesign;

use crate::runner::Aggregate;

/// Print a human-readable summary to stdout.
pub fn print_console(design: &GameDesign, aggregate: &Aggregate) {
    println!();
    println!(
        "{} {}",
        "Playability report:".bold(),
        design.title.bold().cyan()
    );
    println!(
        "  {} games, rolls to finish: min {} / mean {:.1} / max {}",
        aggregate.games, aggregate.min_rolls, aggregate.mean_rolls, aggregate.max_rolls
    );
    println!(
        "  tile effects fired: {}, cards drawn: {}",
        aggregate.total_tile_landings, aggregate.total_card_draws
    );

    if !aggregate.card_draws_by_type.is_empty() {
        println!("  {}", "card draw distribution:".bold());
        let expected_share = 100.0 / aggregate.card_draws_by_type.len() as f64;
        for (kind, count) in &aggregate.card_draws_by_type {
            #[allow(clippy::cast_precision_loss)]
            let share = if aggregate.total_card_draws == 0 {
                0.0
            } else {
                *count as f64 * 100.0 / aggregate.total_card_draws as f64
            };
            let share_text = format!("{share:.1}% (uniform would be {expected_share:.1}%)");
            let share_colored = if (share - expected_share).abs() <= 5.0 {
                share_text.green()
            } else {
                share_text.yellow()
            };
            println!("    {kind}: {count} draws, {share_colored}");
        }
    }
    println!();
}

/// Print the aggregate as JSON to stdout.
///
/// # Errors
///
/// Returns an error if the aggregate cannot be serialized.
pub fn print_json(aggregate: &Aggregate) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(aggregate)?);
    Ok(())
}
