use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use crate::models::Draw;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    game_id               TEXT NOT NULL,
    draw_number           INTEGER NOT NULL,
    draw_date             TEXT NOT NULL,
    winning_numbers       TEXT NOT NULL,
    supplementary_numbers TEXT NOT NULL DEFAULT '',
    special_number        INTEGER,
    PRIMARY KEY (game_id, draw_number)
);
";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lotoscope.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).context("Échec de la migration")?;
    Ok(())
}

fn encode_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_numbers(text: &str) -> Result<Vec<u8>> {
    text.split_whitespace()
        .map(|s| {
            s.parse::<u8>()
                .with_context(|| format!("Numéro illisible en base : '{}'", s))
        })
        .collect()
}

pub fn insert_draw(conn: &Connection, game_id: &str, draw: &Draw) -> Result<bool> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO draws (game_id, draw_number, draw_date, winning_numbers, supplementary_numbers, special_number)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                game_id,
                draw.draw_number,
                draw.draw_date,
                encode_numbers(&draw.winning_numbers),
                encode_numbers(&draw.supplementary_numbers),
                draw.special_number,
            ],
        )
        .context("Échec de l'insertion")?;
    Ok(changed > 0)
}

/// Derniers tirages d'un jeu, du plus récent au plus ancien.
pub fn fetch_last_draws(conn: &Connection, game_id: &str, limit: u32) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(
        "SELECT draw_number, draw_date, winning_numbers, supplementary_numbers, special_number
         FROM draws WHERE game_id = ?1 ORDER BY draw_number DESC LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![game_id, limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<u8>>(4)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(draw_number, draw_date, winning, supplementary, special_number)| {
            Ok(Draw {
                draw_number,
                draw_date,
                winning_numbers: decode_numbers(&winning)?,
                supplementary_numbers: decode_numbers(&supplementary)?,
                special_number,
            })
        })
        .collect()
}

/// Numéros gagnants seuls, sous la forme consommée par lotoscope-core.
pub fn fetch_last_winning_numbers(
    conn: &Connection,
    game_id: &str,
    limit: u32,
) -> Result<Vec<Vec<u8>>> {
    let draws = fetch_last_draws(conn, game_id, limit)?;
    Ok(draws.into_iter().map(|d| d.winning_numbers).collect())
}

pub fn count_draws(conn: &Connection, game_id: &str) -> Result<u32> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM draws WHERE game_id = ?1",
        [game_id],
        |row| row.get(0),
    )?;
    Ok(count)
}
