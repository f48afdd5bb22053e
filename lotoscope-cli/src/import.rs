use anyhow::{Context, Result};
use chrono::NaiveDate;
use lotoscope_db::rusqlite::Connection;
use std::path::Path;

use lotoscope_db::db::insert_draw;
use lotoscope_db::games::Game;
use lotoscope_db::models::{Draw, validate_draw};

/// Convertit une date JJ/MM/AAAA en forme ISO pour le stockage.
pub fn parse_date(raw: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y")
        .with_context(|| format!("Format de date invalide : '{}'", raw))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

pub fn parse_numbers(raw: &str) -> Result<Vec<u8>> {
    raw.split_whitespace()
        .map(|s| {
            s.parse::<u8>()
                .with_context(|| format!("Impossible de parser le numéro '{}'", s))
        })
        .collect()
}

/// Format attendu (séparateur ';', première ligne d'en-tête) :
/// numéro de tirage ; date JJ/MM/AAAA ; numéros gagnants ;
/// complémentaires (optionnel) ; numéro spécial (optionnel)
fn parse_record(record: &csv::StringRecord, game: &Game) -> Result<Draw> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let number_raw = get(0)?;
    let draw_number: i64 = number_raw
        .parse()
        .with_context(|| format!("Numéro de tirage illisible : '{}'", number_raw))?;
    let draw_date = parse_date(&get(1)?)?;
    let winning_numbers = parse_numbers(&get(2)?)?;

    let supplementary_raw = record.get(3).map(str::trim).unwrap_or("");
    let supplementary_numbers = parse_numbers(supplementary_raw)?;

    let special_raw = record.get(4).map(str::trim).unwrap_or("");
    let special_number = if special_raw.is_empty() {
        None
    } else {
        Some(
            special_raw
                .parse::<u8>()
                .with_context(|| format!("Numéro spécial illisible : '{}'", special_raw))?,
        )
    };

    let draw = Draw {
        draw_number,
        draw_date,
        winning_numbers,
        supplementary_numbers,
        special_number,
    };
    validate_draw(game, &draw)?;
    Ok(draw)
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_csv(conn: &Connection, game: &Game, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let tx = conn
        .unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record, game) {
                Ok(draw) => match insert_draw(&tx, &game.id, &draw) {
                    Ok(true) => result.inserted += 1,
                    Ok(false) => result.skipped += 1,
                    Err(e) => {
                        eprintln!("Erreur insertion tirage {}: {}", result.total_records, e);
                        result.errors += 1;
                    }
                },
                Err(e) => {
                    eprintln!("Erreur parsing ligne {}: {}", result.total_records, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                eprintln!("Erreur lecture ligne {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}
