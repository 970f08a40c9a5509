use std::io;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rusty_maze::prompt::read_positive;
use rusty_maze::{AldousBroder, Glyph, Glyphs, RenderStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Génère un labyrinthe parfait et l'affiche.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Nombre de lignes (demandé au clavier si absent)
    #[arg(long)]
    rows: Option<usize>,

    /// Nombre de colonnes (demandé au clavier si absent)
    #[arg(long)]
    cols: Option<usize>,

    /// Graine pour un labyrinthe reproductible
    #[arg(long)]
    seed: Option<u64>,

    /// Largeur d'une cellule, impaire
    #[arg(long, default_value_t = 3)]
    cell_width: usize,

    /// Caractère de l'entrée
    #[arg(long, default_value = "")]
    entrance_glyph: String,

    /// Caractère de la sortie
    #[arg(long, default_value = "X")]
    exit_glyph: String,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rusty_maze=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let style = RenderStyle::with_cell_width(args.cell_width)?;
    let glyphs = Glyphs {
        entrance: Glyph::parse(&args.entrance_glyph).context("invalid --entrance-glyph")?,
        exit: Glyph::parse(&args.exit_glyph).context("invalid --exit-glyph")?,
    };

    let (rows, cols) = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        let rows = match args.rows {
            Some(rows) => rows,
            None => read_positive(&mut input, &mut output, "Number of rows")?,
        };
        let cols = match args.cols {
            Some(cols) => cols,
            None => read_positive(&mut input, &mut output, "Number of columns")?,
        };
        (rows, cols)
    };

    let grid = match args.seed {
        Some(seed) => AldousBroder::seeded(seed).with_glyphs(glyphs).generate(rows, cols),
        None => AldousBroder::from_os().with_glyphs(glyphs).generate(rows, cols),
    }
    .with_context(|| format!("cannot generate a {rows}x{cols} maze"))?;

    match args.format {
        Format::Text => println!("{}", grid.render_with(&style)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&grid)?),
    }

    Ok(())
}
