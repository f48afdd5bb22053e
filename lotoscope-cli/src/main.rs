mod display;
mod import;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lotoscope_core::buckets::build_sum_buckets;
use lotoscope_core::gaussian::fit_gaussian;
use lotoscope_core::generator::{GenerationConfig, generate_set};
use lotoscope_core::hotcold::hot_cold_numbers;
use lotoscope_db::db::{
    count_draws, db_path, fetch_last_draws, fetch_last_winning_numbers, insert_draw, migrate,
    open_db,
};
use lotoscope_db::games::{Game, default_games, find_game, load_games};
use lotoscope_db::models::{Draw, validate_draw};

#[derive(Parser)]
#[command(name = "lotoscope", about = "Analyseur d'historique de tirages de loterie")]
struct Cli {
    /// Fichier JSON de définitions de jeux (jeux intégrés par défaut)
    #[arg(long, global = true)]
    games: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer les tirages d'un jeu depuis un fichier CSV
    Import {
        /// Identifiant du jeu
        #[arg(short, long)]
        game: String,

        /// Chemin vers le fichier CSV
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les jeux configurés
    Games,

    /// Lister les derniers tirages
    List {
        /// Identifiant du jeu
        #[arg(short, long)]
        game: String,

        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Numéros chauds et froids sur une fenêtre de tirages
    HotCold {
        /// Identifiant du jeu
        #[arg(short, long)]
        game: String,

        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "100")]
        window: u32,

        /// Taille des listes en pourcentage du pool (0-100)
        #[arg(short, long, default_value = "20")]
        pct: f64,
    },

    /// Histogramme des sommes et courbe normale ajustée
    Curve {
        /// Identifiant du jeu
        #[arg(short, long)]
        game: String,

        /// Largeur des classes de sommes
        #[arg(short, long, default_value = "5")]
        bin_size: u32,

        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "200")]
        window: u32,
    },

    /// Générer des grilles de numéros
    Generate {
        /// Identifiant du jeu
        #[arg(short, long)]
        game: String,

        /// Nombre de grilles à générer
        #[arg(short, long, default_value = "3")]
        count: usize,

        /// Fraction du pool couverte par la fenêtre de tirage (0-1]
        #[arg(short = 'p', long, default_value = "1.0")]
        window_pct: f64,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Ajouter un tirage manuellement
    Add {
        /// Identifiant du jeu
        #[arg(short, long)]
        game: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let games = match &cli.games {
        Some(path) => load_games(path)?,
        None => default_games(),
    };

    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { game, file } => cmd_import(&conn, find_game(&games, &game)?, &file),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::Games => {
            display::display_games(&games);
            Ok(())
        }
        Command::List { game, last } => cmd_list(&conn, find_game(&games, &game)?, last),
        Command::HotCold { game, window, pct } => {
            cmd_hot_cold(&conn, find_game(&games, &game)?, window, pct)
        }
        Command::Curve {
            game,
            bin_size,
            window,
        } => cmd_curve(&conn, find_game(&games, &game)?, bin_size, window),
        Command::Generate {
            game,
            count,
            window_pct,
            seed,
        } => cmd_generate(find_game(&games, &game)?, count, window_pct, seed),
        Command::Add { game } => cmd_add(&conn, find_game(&games, &game)?),
    }
}

fn empty_base(conn: &lotoscope_db::rusqlite::Connection, game: &Game) -> Result<bool> {
    let n = count_draws(conn, &game.id)?;
    if n == 0 {
        println!(
            "Base vide pour {}. Lancez d'abord : lotoscope import --game {}",
            game.name, game.id
        );
        return Ok(true);
    }
    Ok(false)
}

fn cmd_import(
    conn: &lotoscope_db::rusqlite::Connection,
    game: &Game,
    file: &PathBuf,
) -> Result<()> {
    let result = import::import_csv(conn, game, file)?;
    display::display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &lotoscope_db::rusqlite::Connection, game: &Game, last: u32) -> Result<()> {
    if empty_base(conn, game)? {
        return Ok(());
    }
    let draws = fetch_last_draws(conn, &game.id, last)?;
    display::display_draws(game, &draws);
    Ok(())
}

fn cmd_hot_cold(
    conn: &lotoscope_db::rusqlite::Connection,
    game: &Game,
    window: u32,
    pct: f64,
) -> Result<()> {
    if empty_base(conn, game)? {
        return Ok(());
    }
    let draws = fetch_last_winning_numbers(conn, &game.id, window)?;
    let result = hot_cold_numbers(&draws, game.max_number, pct)?;
    display::display_hot_cold(&result, draws.len() as u32);
    Ok(())
}

fn cmd_curve(
    conn: &lotoscope_db::rusqlite::Connection,
    game: &Game,
    bin_size: u32,
    window: u32,
) -> Result<()> {
    if empty_base(conn, game)? {
        return Ok(());
    }
    let draws = fetch_last_winning_numbers(conn, &game.id, window)?;
    let buckets = build_sum_buckets(&draws, bin_size)?;
    display::display_buckets(&buckets, draws.len() as u32);

    match fit_gaussian(&buckets) {
        Some(fit) => display::display_fit(&buckets, bin_size, &fit),
        None => println!("Dispersion insuffisante : pas de courbe à ajuster."),
    }
    Ok(())
}

fn cmd_generate(game: &Game, count: usize, window_pct: f64, seed: Option<u64>) -> Result<()> {
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let config = GenerationConfig {
        max_number: game.max_number,
        pick_count: game.pick_count,
        window_pct,
    };

    let mut grids = Vec::with_capacity(count);
    for _ in 0..count {
        let numbers = generate_set(&config, &mut || rng.random::<f64>())?;
        let special = match game.special_max {
            Some(max) => {
                let special_config = GenerationConfig::full_range(max, 1);
                generate_set(&special_config, &mut || rng.random::<f64>())?
                    .first()
                    .copied()
            }
            None => None,
        };
        grids.push((numbers, special));
    }

    display::display_grids(game, &grids);
    Ok(())
}

fn cmd_add(conn: &lotoscope_db::rusqlite::Connection, game: &Game) -> Result<()> {
    println!("Ajout d'un tirage {} manuellement\n", game.name);

    let number_raw = prompt("Numéro du tirage (ex: 2024012) : ")?;
    let draw_number: i64 = number_raw
        .parse()
        .with_context(|| format!("Numéro de tirage illisible : '{}'", number_raw))?;

    let raw_date = prompt("Date (JJ/MM/AAAA) : ")?;
    let draw_date = import::parse_date(&raw_date)?;

    let winning_numbers = prompt_numbers("Numéros", game.pick_count, game.max_number)?;
    let supplementary_numbers = if game.supplementary_count > 0 {
        prompt_numbers("Complémentaires", game.supplementary_count, game.max_number)?
    } else {
        Vec::new()
    };
    let special_number = match game.special_max {
        Some(max) => {
            let raw = prompt(&format!("Numéro spécial (1-{}) : ", max))?;
            Some(
                raw.parse::<u8>()
                    .with_context(|| format!("Numéro spécial illisible : '{}'", raw))?,
            )
        }
        None => None,
    };

    let draw = Draw {
        draw_number,
        draw_date,
        winning_numbers,
        supplementary_numbers,
        special_number,
    };
    validate_draw(game, &draw)?;

    println!("\nTirage à insérer :");
    display::display_draws(game, &[draw.clone()]);

    let confirm = prompt("\nConfirmer l'insertion ? (o/n) : ")?;
    if confirm.trim().to_lowercase() == "o" {
        let inserted = insert_draw(conn, &game.id, &draw)?;
        if inserted {
            println!("Tirage inséré avec succès.");
        } else {
            println!("Ce tirage existe déjà (doublon ignoré).");
        }
    } else {
        println!("Insertion annulée.");
    }

    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_numbers(label: &str, count: usize, max: u8) -> Result<Vec<u8>> {
    loop {
        let input = prompt(&format!(
            "{} ({} numéros, 1-{}, séparés par des espaces) : ",
            label, count, max
        ))?;
        match import::parse_numbers(&input) {
            Ok(nums) if nums.len() == count => return Ok(nums),
            _ => println!("Entrez exactement {} numéros. Réessayez.", count),
        }
    }
}
