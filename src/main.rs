use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use fireworks::config::ShowConfig;
use fireworks::show::FireworkShow;
use fireworks::{Error, Result, Rgb};
use std::env;
use std::fs::File;
use std::io::{BufWriter, Stdout, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

const FIXED_DT: f64 = 1.0 / 60.0;

fn print_usage() {
    eprintln!("fireworks - Terminal firework simulator");
    eprintln!();
    eprintln!("Usage: fireworks [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config PATH      Load a show from a TOML file (see assets/show.toml)");
    eprintln!("  --bg-color RRGGBB  Set background color as hex (e.g., --bg-color 1a1b26)");
    eprintln!("  --seed N           Seed the random generator for a repeatable show");
    eprintln!("  --once             Exit after the first firework burns out");
    eprintln!("  --log PATH         Write logs to PATH (level from RUST_LOG, default info)");
    eprintln!();
    eprintln!("Colors:");
    let names: Vec<&str> = Rgb::palette().map(|(name, _)| name).collect();
    eprintln!("  {}", names.join(", "));
    eprintln!();
    eprintln!("Press SPACE to relaunch; 'q', ESC, or Ctrl+C to exit");
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    config: Option<PathBuf>,
    bg_color: Option<Rgb>,
    seed: Option<u64>,
    once: bool,
    log: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        let value = |flag: &str| {
            args.get(i + 1)
                .cloned()
                .ok_or_else(|| Error::Usage(format!("{flag} requires a value")))
        };
        match args[i].as_str() {
            "--config" => {
                options.config = Some(PathBuf::from(value("--config")?));
                i += 2;
            }
            "--bg-color" => {
                let hex = value("--bg-color")?;
                let color = fireworks::color::parse_hex_color(&hex).ok_or_else(|| {
                    Error::Usage(format!(
                        "Invalid hex color: {hex}\nExpected format: RRGGBB (e.g., 1a1b26)"
                    ))
                })?;
                options.bg_color = Some(color);
                i += 2;
            }
            "--seed" => {
                let seed = value("--seed")?;
                options.seed = Some(
                    seed.parse()
                        .map_err(|_| Error::Usage(format!("Invalid seed: {seed}")))?,
                );
                i += 2;
            }
            "--log" => {
                options.log = Some(PathBuf::from(value("--log")?));
                i += 2;
            }
            "--once" => {
                options.once = true;
                i += 1;
            }
            "help" | "--help" | "-h" => {
                options.help = true;
                i += 1;
            }
            arg => return Err(Error::Usage(format!("Unknown option: {arg}"))),
        }
    }

    Ok(options)
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(options: &Options) -> Result<ShowConfig> {
    let mut config = match &options.config {
        Some(path) => {
            let config = ShowConfig::load(path)?;
            info!(path = %path.display(), "loaded show config");
            config
        }
        None => ShowConfig::default(),
    };

    if options.bg_color.is_some() {
        config.background = options.bg_color;
    }
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    config.once |= options.once;

    // Surface charge errors before the terminal switches screens
    config.firework.plan()?;
    Ok(config)
}

fn run_show(config: &ShowConfig) -> Result<()> {
    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let result = show_loop(config, &mut stdout);

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}

fn show_loop(config: &ShowConfig, stdout: &mut BufWriter<Stdout>) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut show = FireworkShow::new(config, cols as usize, rows as usize * 2)?;

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f64;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            match &event {
                Event::Key(key_event) => {
                    if key_event.code == KeyCode::Char('q')
                        || key_event.code == KeyCode::Esc
                        || (key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        break;
                    }
                    show.handle_event(&event);
                }
                Event::Resize(cols, rows) => {
                    show.resize(*cols as usize, *rows as usize * 2);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => show.handle_event(&event),
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        // A stalled frame must not turn into one giant physics step
        accumulator = (accumulator + frame_time).min(FIXED_DT * 3.0);

        while accumulator >= FIXED_DT {
            show.update(FIXED_DT);
            accumulator -= FIXED_DT;
        }

        show.render(stdout)?;

        if show.is_finished() {
            break;
        }
    }

    Ok(())
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args)?;
    if options.help {
        print_usage();
        return Ok(());
    }

    if let Some(path) = &options.log {
        init_logging(path)?;
    }

    let config = load_config(&options)?;
    run_show(&config)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        if matches!(err, Error::Usage(_)) {
            eprintln!();
            print_usage();
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("fireworks")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_every_flag() {
        let options = parse_args(&args(&[
            "--config", "show.toml", "--bg-color", "1a1b26", "--seed", "42", "--once", "--log",
            "fw.log",
        ]))
        .unwrap();
        assert_eq!(
            options,
            Options {
                config: Some(PathBuf::from("show.toml")),
                bg_color: Some(Rgb(0x1a, 0x1b, 0x26)),
                seed: Some(42),
                once: true,
                log: Some(PathBuf::from("fw.log")),
                help: false,
            }
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(parse_args(&args(&["--bg-color", "zz"])), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args(&["--seed"])), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args(&["fire"])), Err(Error::Usage(_))));
    }

    #[test]
    fn cli_overrides_config() {
        let options = Options {
            bg_color: Some(Rgb(1, 2, 3)),
            seed: Some(9),
            once: true,
            ..Options::default()
        };
        let config = load_config(&options).unwrap();
        assert_eq!(config.background(), Rgb(1, 2, 3));
        assert_eq!(config.seed, Some(9));
        assert!(config.once);
    }
}
