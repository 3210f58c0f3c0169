// bfart: tape-language interpreter and text-art renderer

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bfart::art::{ArtGrid, ColorGrid};
use bfart::generator::generate;
use bfart::interpreter::constants::{
    DEFAULT_MAX_OPERATIONS, DEFAULT_SNAPSHOT_LIMIT, DEFAULT_TAPE_SIZE,
};
use bfart::interpreter::history::History;
use bfart::render::{save_html, HtmlOptions};
use bfart::ui::App;
use bfart::{ExecConfig, Interpreter};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

#[derive(Parser)]
#[command(name = "bfart", version, about = "Tape-language interpreter and text-art renderer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ExecArgs {
    /// Initial tape length, also the growth block size
    #[arg(long, default_value_t = DEFAULT_TAPE_SIZE)]
    tape_size: usize,

    /// Maximum number of operations before the run is aborted
    #[arg(long, default_value_t = DEFAULT_MAX_OPERATIONS)]
    max_ops: u64,
}

impl ExecArgs {
    fn config(&self) -> ExecConfig {
        ExecConfig::new(self.tape_size, self.max_ops)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Execute a program and print its output
    Run {
        /// Program file
        file: PathBuf,
        #[command(flatten)]
        exec: ExecArgs,
    },
    /// Print a program that outputs the given text
    Generate {
        /// Text to encode
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,
        /// Read the text from a file instead
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Execute a program and render its output over a color grid as HTML
    Render {
        /// Program file
        #[arg(long, required_unless_present = "text", conflicts_with = "text")]
        program: Option<PathBuf>,
        /// Generate the program from this text instead
        #[arg(long)]
        text: Option<String>,
        /// Color grid file (rows of whitespace-separated hex colors)
        #[arg(long, required_unless_present = "image", conflicts_with = "image")]
        colors: Option<PathBuf>,
        /// Sample the colors from this image instead
        #[arg(long)]
        image: Option<PathBuf>,
        /// Grid columns when sampling an image
        #[arg(long, default_value_t = 80)]
        width: u32,
        /// Grid rows when sampling an image
        #[arg(long, default_value_t = 40)]
        height: u32,
        /// Output HTML path
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value_t = 10)]
        font_size: u32,
        #[arg(long, default_value_t = 1.0)]
        line_height: f64,
        /// Foreground factor on light backgrounds
        #[arg(long, default_value_t = bfart::render::color::DEFAULT_DARKEN_FACTOR)]
        darken: f64,
        /// Foreground factor on dark backgrounds
        #[arg(long, default_value_t = bfart::render::color::DEFAULT_LIGHTEN_FACTOR)]
        lighten: f64,
        #[command(flatten)]
        exec: ExecArgs,
    },
    /// Step through a program in the terminal debugger
    Debug {
        /// Program file
        file: PathBuf,
        /// Memory ceiling for recorded snapshots, in bytes
        #[arg(long, default_value_t = DEFAULT_SNAPSHOT_LIMIT)]
        snapshot_limit: usize,
        #[command(flatten)]
        exec: ExecArgs,
    },
}

fn main() {
    bfart::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run { file, exec } => run_file(&file, &exec.config()),
        Command::Generate { text, file } => generate_program(text, file.as_deref()),
        Command::Render {
            program,
            text,
            colors,
            image,
            width,
            height,
            output,
            font_size,
            line_height,
            darken,
            lighten,
            exec,
        } => {
            let options = HtmlOptions {
                font_size,
                line_height_ratio: line_height,
                darken_factor: darken,
                lighten_factor: lighten,
            };
            let source = match (colors, image) {
                (Some(path), _) => Some(ColorSource::Grid(path)),
                (None, Some(path)) => Some(ColorSource::Image {
                    path,
                    width,
                    height,
                }),
                (None, None) => None,
            };
            match source {
                Some(source) => render_art(
                    program.as_deref(),
                    text.as_deref(),
                    &source,
                    &output,
                    &options,
                    &exec.config(),
                ),
                None => Err("no color grid or image given".into()),
            }
        }
        Command::Debug {
            file,
            snapshot_limit,
            exec,
        } => debug_file(&file, &exec.config(), snapshot_limit),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_file(path: &Path, config: &ExecConfig) -> Result<(), Box<dyn std::error::Error>> {
    let program = fs::read_to_string(path)?;
    let output = Interpreter::new(&program, config)?.run()?;
    print!("{output}");
    Ok(())
}

fn generate_program(
    text: Option<String>,
    file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => return Err("no text given".into()),
    };
    println!("{}", generate(&text)?);
    Ok(())
}

/// Where the background colors of the art come from
enum ColorSource {
    Grid(PathBuf),
    Image {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

impl ColorSource {
    fn load(&self) -> Result<ColorGrid, Box<dyn std::error::Error>> {
        let grid = match self {
            ColorSource::Grid(path) => ColorGrid::parse(&fs::read_to_string(path)?)?,
            ColorSource::Image {
                path,
                width,
                height,
            } => ColorGrid::from_image(path, *width, *height)?,
        };
        Ok(grid)
    }
}

fn render_art(
    program: Option<&Path>,
    text: Option<&str>,
    colors: &ColorSource,
    output: &Path,
    options: &HtmlOptions,
    config: &ExecConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let program = match (program, text) {
        (Some(path), _) => fs::read_to_string(path)?,
        (None, Some(text)) => generate(text)?,
        (None, None) => return Err("no program or text given".into()),
    };

    let produced = Interpreter::new(&program, config)?.run()?;
    let grid = ArtGrid::from_text(&produced, colors.load()?)?;

    save_html(&grid, output, options)?;
    info!(path = %output.display(), rows = grid.height(), cols = grid.width(), "wrote art");
    eprintln!("Wrote {}", output.display());
    Ok(())
}

fn debug_file(
    path: &Path,
    config: &ExecConfig,
    snapshot_limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let program = fs::read_to_string(path)?;

    eprintln!("Executing program...");
    let history = History::record(&program, config, snapshot_limit)?;
    match history.outcome() {
        Ok(_) => eprintln!("Execution completed successfully."),
        Err(e) => eprintln!("Runtime error: {e}"),
    }
    eprintln!("Total snapshots: {}", history.len());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(history, config.max_operations);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
