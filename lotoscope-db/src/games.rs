use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Définition d'un jeu : taille du pool principal, nombre de numéros tirés,
/// numéros complémentaires (tirés du même pool) et pool spécial séparé
/// éventuel (numéro chance, etc.).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub max_number: u8,
    pub pick_count: usize,
    #[serde(default)]
    pub supplementary_count: usize,
    #[serde(default)]
    pub special_max: Option<u8>,
}

impl Game {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            bail!("Identifiant de jeu vide");
        }
        if self.max_number == 0 {
            bail!("Jeu {} : max_number doit être au moins 1", self.id);
        }
        if self.pick_count == 0 || self.pick_count > self.max_number as usize {
            bail!(
                "Jeu {} : pick_count ({}) doit être entre 1 et max_number ({})",
                self.id,
                self.pick_count,
                self.max_number
            );
        }
        if self.pick_count + self.supplementary_count > self.max_number as usize {
            bail!(
                "Jeu {} : {} numéros + {} complémentaires dépassent le pool de {}",
                self.id,
                self.pick_count,
                self.supplementary_count,
                self.max_number
            );
        }
        if self.special_max == Some(0) {
            bail!("Jeu {} : special_max doit être au moins 1", self.id);
        }
        Ok(())
    }
}

pub fn default_games() -> Vec<Game> {
    vec![
        Game {
            id: "loto".to_string(),
            name: "Loto".to_string(),
            max_number: 49,
            pick_count: 5,
            supplementary_count: 0,
            special_max: Some(10),
        },
        Game {
            id: "eurodreams".to_string(),
            name: "EuroDreams".to_string(),
            max_number: 40,
            pick_count: 6,
            supplementary_count: 0,
            special_max: Some(5),
        },
        Game {
            id: "keno".to_string(),
            name: "Keno".to_string(),
            max_number: 70,
            pick_count: 20,
            supplementary_count: 0,
            special_max: None,
        },
    ]
}

/// Charge une liste de jeux depuis un fichier JSON et valide chaque entrée.
pub fn load_games(path: &Path) -> Result<Vec<Game>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let games: Vec<Game> = serde_json::from_str(&content)
        .with_context(|| format!("JSON de jeux invalide dans {:?}", path))?;
    if games.is_empty() {
        bail!("Aucun jeu défini dans {:?}", path);
    }
    for game in &games {
        game.validate()?;
    }
    Ok(games)
}

pub fn find_game<'a>(games: &'a [Game], id: &str) -> Result<&'a Game> {
    games.iter().find(|g| g.id == id).with_context(|| {
        let known: Vec<&str> = games.iter().map(|g| g.id.as_str()).collect();
        format!("Jeu inconnu : {} (jeux disponibles : {})", id, known.join(", "))
    })
}
