use anyhow::{Result, bail};

use crate::games::Game;

#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub draw_number: i64,
    pub draw_date: String,
    pub winning_numbers: Vec<u8>,
    pub supplementary_numbers: Vec<u8>,
    pub special_number: Option<u8>,
}

/// Vérifie qu'un tirage est cohérent avec la définition du jeu : nombre de
/// numéros, bornes, absence de doublons (complémentaires compris, tirés du
/// même pool), et numéro spécial dans son propre pool le cas échéant.
pub fn validate_draw(game: &Game, draw: &Draw) -> Result<()> {
    if draw.winning_numbers.len() != game.pick_count {
        bail!(
            "Le jeu {} attend {} numéros, {} reçus",
            game.id,
            game.pick_count,
            draw.winning_numbers.len()
        );
    }
    if draw.supplementary_numbers.len() != game.supplementary_count {
        bail!(
            "Le jeu {} attend {} numéros complémentaires, {} reçus",
            game.id,
            game.supplementary_count,
            draw.supplementary_numbers.len()
        );
    }

    let mut seen: Vec<u8> = Vec::new();
    for &n in draw
        .winning_numbers
        .iter()
        .chain(draw.supplementary_numbers.iter())
    {
        if n < 1 || n > game.max_number {
            bail!("Numéro {} hors limites (1-{})", n, game.max_number);
        }
        if seen.contains(&n) {
            bail!("Numéro en double : {}", n);
        }
        seen.push(n);
    }

    match (game.special_max, draw.special_number) {
        (Some(max), Some(s)) => {
            if s < 1 || s > max {
                bail!("Numéro spécial {} hors limites (1-{})", s, max);
            }
        }
        (Some(_), None) => bail!("Numéro spécial manquant pour le jeu {}", game.id),
        (None, Some(s)) => bail!("Le jeu {} n'a pas de numéro spécial (reçu {})", game.id, s),
        (None, None) => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::default_games;

    fn loto() -> Game {
        default_games()
            .into_iter()
            .find(|g| g.id == "loto")
            .unwrap()
    }

    fn loto_draw() -> Draw {
        Draw {
            draw_number: 2024001,
            draw_date: "2024-01-01".to_string(),
            winning_numbers: vec![3, 12, 25, 33, 48],
            supplementary_numbers: vec![],
            special_number: Some(7),
        }
    }

    #[test]
    fn test_validate_draw_ok() {
        assert!(validate_draw(&loto(), &loto_draw()).is_ok());
    }

    #[test]
    fn test_validate_wrong_pick_count() {
        let mut draw = loto_draw();
        draw.winning_numbers.push(49);
        assert!(validate_draw(&loto(), &draw).is_err());
    }

    #[test]
    fn test_validate_number_out_of_range() {
        let mut draw = loto_draw();
        draw.winning_numbers[0] = 50;
        assert!(validate_draw(&loto(), &draw).is_err());
        draw.winning_numbers[0] = 0;
        assert!(validate_draw(&loto(), &draw).is_err());
    }

    #[test]
    fn test_validate_duplicate_numbers() {
        let mut draw = loto_draw();
        draw.winning_numbers[1] = 3;
        assert!(validate_draw(&loto(), &draw).is_err());
    }

    #[test]
    fn test_validate_special_out_of_range() {
        let mut draw = loto_draw();
        draw.special_number = Some(11);
        assert!(validate_draw(&loto(), &draw).is_err());
    }

    #[test]
    fn test_validate_missing_special() {
        let mut draw = loto_draw();
        draw.special_number = None;
        assert!(validate_draw(&loto(), &draw).is_err());
    }

    #[test]
    fn test_validate_supplementary_same_pool() {
        let game = Game {
            id: "super7".to_string(),
            name: "Super 7".to_string(),
            max_number: 35,
            pick_count: 5,
            supplementary_count: 2,
            special_max: None,
        };
        let draw = Draw {
            draw_number: 1,
            draw_date: "2024-01-01".to_string(),
            winning_numbers: vec![1, 2, 3, 4, 5],
            supplementary_numbers: vec![6, 7],
            special_number: None,
        };
        assert!(validate_draw(&game, &draw).is_ok());

        let dup = Draw {
            supplementary_numbers: vec![5, 7],
            ..draw
        };
        assert!(validate_draw(&game, &dup).is_err());
    }
}
