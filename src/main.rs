//! Backdrop binary.
//!
//! ```text
//! backdrop [config.json]
//! backdrop [config.json] --snapshot out.png [WIDTHxHEIGHT] [TICKS]
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use backdrop::{BackdropConfig, SurfaceSize};

const DEFAULT_SNAPSHOT_SIZE: SurfaceSize = SurfaceSize::new(1280, 720);
const DEFAULT_SNAPSHOT_TICKS: u32 = 120;

struct Snapshot {
    path: PathBuf,
    size: SurfaceSize,
    ticks: u32,
}

fn parse_size(arg: &str) -> Option<SurfaceSize> {
    let (w, h) = arg.split_once(['x', 'X'])?;
    Some(SurfaceSize::new(w.parse().ok()?, h.parse().ok()?))
}

fn parse_args(args: &[String]) -> Result<(Option<PathBuf>, Option<Snapshot>), String> {
    let mut config_path = None;
    let mut snapshot = None;
    let mut iter = args.iter().peekable();

    while let Some(arg) = iter.next() {
        if arg == "--snapshot" {
            let path = iter.next().ok_or("--snapshot needs an output path")?;
            let mut shot = Snapshot {
                path: PathBuf::from(path),
                size: DEFAULT_SNAPSHOT_SIZE,
                ticks: DEFAULT_SNAPSHOT_TICKS,
            };
            if let Some(size) = iter.peek().and_then(|a| parse_size(a)) {
                shot.size = size;
                iter.next();
            }
            if let Some(ticks) = iter.peek().and_then(|a| a.parse().ok()) {
                shot.ticks = ticks;
                iter.next();
            }
            snapshot = Some(shot);
        } else if config_path.is_none() {
            config_path = Some(PathBuf::from(arg));
        } else {
            return Err(format!("unexpected argument: {}", arg));
        }
    }
    Ok((config_path, snapshot))
}

fn load_config(path: Option<PathBuf>) -> BackdropConfig {
    let Some(path) = path else {
        return BackdropConfig::default();
    };
    match BackdropConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config from {:?}: {}. Using defaults.", path, e);
            BackdropConfig::default()
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("backdrop=info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (config_path, snapshot) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Usage: backdrop [config.json] [--snapshot out.png [WxH] [ticks]]");
            return ExitCode::FAILURE;
        }
    };
    let config = load_config(config_path);

    let result = match snapshot {
        Some(shot) => backdrop::snapshot(&config, shot.size, shot.ticks, &shot.path).map(|_| ()),
        None => backdrop::run(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_no_args() {
        let (config, snapshot) = parse_args(&[]).unwrap();
        assert!(config.is_none());
        assert!(snapshot.is_none());
    }

    #[test]
    fn test_parse_snapshot_full() {
        let (config, snapshot) =
            parse_args(&args(&["cfg.json", "--snapshot", "out.png", "800x600", "30"])).unwrap();
        assert_eq!(config, Some(PathBuf::from("cfg.json")));
        let shot = snapshot.unwrap();
        assert_eq!(shot.path, PathBuf::from("out.png"));
        assert_eq!(shot.size, SurfaceSize::new(800, 600));
        assert_eq!(shot.ticks, 30);
    }

    #[test]
    fn test_parse_snapshot_defaults() {
        let (_, snapshot) = parse_args(&args(&["--snapshot", "out.png"])).unwrap();
        let shot = snapshot.unwrap();
        assert_eq!(shot.size, DEFAULT_SNAPSHOT_SIZE);
        assert_eq!(shot.ticks, DEFAULT_SNAPSHOT_TICKS);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--snapshot"])).is_err());
        assert!(parse_args(&args(&["a.json", "b.json"])).is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1920x1080"), Some(SurfaceSize::new(1920, 1080)));
        assert_eq!(parse_size("12"), None);
        assert_eq!(parse_size("ax3"), None);
    }
}
