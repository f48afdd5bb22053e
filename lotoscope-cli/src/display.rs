use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use textplots::{Chart, Plot, Shape};

use crate::import::ImportResult;
use lotoscope_core::buckets::Bucket;
use lotoscope_core::gaussian::GaussianFit;
use lotoscope_core::hotcold::HotColdResult;
use lotoscope_db::games::Game;
use lotoscope_db::models::Draw;

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_draws(game: &Game, draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut header = vec!["N°", "Date", "Numéros"];
    if game.supplementary_count > 0 {
        header.push("Compl.");
    }
    if game.special_max.is_some() {
        header.push("Spécial");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for draw in draws {
        let mut sorted = draw.winning_numbers.clone();
        sorted.sort();

        let mut row = vec![draw.draw_number.to_string(), draw.draw_date.clone(), join_numbers(&sorted)];
        if game.supplementary_count > 0 {
            row.push(join_numbers(&draw.supplementary_numbers));
        }
        if game.special_max.is_some() {
            row.push(match draw.special_number {
                Some(s) => s.to_string(),
                None => "—".to_string(),
            });
        }
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_games(games: &[Game]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Nom", "Pool", "Tirés", "Compl.", "Spécial"]);

    for game in games {
        table.add_row(vec![
            game.id.clone(),
            game.name.clone(),
            format!("1-{}", game.max_number),
            game.pick_count.to_string(),
            game.supplementary_count.to_string(),
            match game.special_max {
                Some(max) => format!("1-{}", max),
                None => "—".to_string(),
            },
        ]);
    }

    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_hot_cold(result: &HotColdResult, window: u32) {
    println!("\n🌡️  Numéros chauds et froids sur les {} derniers tirages\n", window);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["", "Numéros"]);

    table.add_row(vec![
        Cell::new("CHAUDS").fg(Color::Green),
        Cell::new(join_numbers(&result.hot)),
    ]);
    table.add_row(vec![
        Cell::new("FROIDS").fg(Color::Red),
        Cell::new(join_numbers(&result.cold)),
    ]);

    println!("{table}");
}

pub fn display_buckets(buckets: &[Bucket], window: u32) {
    println!("\n📊 Histogramme des sommes sur les {} derniers tirages\n", window);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Somme", "Fréquence", ""]);

    for bucket in buckets {
        table.add_row(vec![
            bucket.label.clone(),
            bucket.freq.to_string(),
            "█".repeat(bucket.freq as usize),
        ]);
    }

    println!("{table}");
}

/// Superpose la densité observée (points) et la courbe ajustée (ligne).
pub fn display_fit(buckets: &[Bucket], bin_size: u32, fit: &GaussianFit) {
    let total: u32 = buckets.iter().map(|b| b.freq).sum();
    if total == 0 || fit.curve.is_empty() {
        return;
    }

    let observed: Vec<(f32, f32)> = buckets
        .iter()
        .map(|b| {
            let density = b.freq as f64 / (total as f64 * bin_size as f64);
            (b.mid as f32, density as f32)
        })
        .collect();
    let curve: Vec<(f32, f32)> = fit
        .curve
        .iter()
        .map(|&(x, y)| (x as f32, y as f32))
        .collect();

    let x_min = curve[0].0;
    let x_max = curve[curve.len() - 1].0;
    let y_max = observed
        .iter()
        .chain(curve.iter())
        .map(|p| p.1)
        .fold(0.0f32, f32::max)
        * 1.1;

    println!(
        "\n📈 Ajustement normal : moyenne {:.1}, écart-type {:.1}\n",
        fit.mean, fit.sigma
    );
    let mut chart = Chart::new_with_y_range(120, 40, x_min, x_max, 0.0, y_max);
    println!(
        "{}",
        chart
            .lineplot(&Shape::Lines(&curve))
            .lineplot(&Shape::Points(&observed))
    );
}

pub fn display_grids(game: &Game, grids: &[(Vec<u8>, Option<u8>)]) {
    println!("\n🎲 Grilles générées\n");

    let mut header = vec!["#", "Numéros"];
    if game.special_max.is_some() {
        header.push("Spécial");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for (i, (numbers, special)) in grids.iter().enumerate() {
        let mut row = vec![(i + 1).to_string(), join_numbers(numbers)];
        if game.special_max.is_some() {
            row.push(match special {
                Some(s) => s.to_string(),
                None => "—".to_string(),
            });
        }
        table.add_row(row);
    }

    println!("{table}");
}
