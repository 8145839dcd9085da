use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "mandelview",
    author,
    version,
    about = "Interactive GPU-rendered Mandelbrot set viewer"
)]
pub struct Cli {
    /// Override the initial window size (e.g. `1280x800`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{value}`"))?;
    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid width `{width}`: {err}"))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid height `{height}`: {err}"))?;
    if width == 0 || height == 0 {
        return Err("window dimensions must be non-zero".to_string());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_width_by_height() {
        assert_eq!(parse_size("1280x800"), Ok((1280, 800)));
        assert_eq!(parse_size("1920X1080"), Ok((1920, 1080)));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(parse_size("1280").is_err());
        assert!(parse_size("0x800").is_err());
        assert!(parse_size("800x0").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn size_flag_is_optional() {
        let cli = Cli::try_parse_from(["mandelview"]).expect("bare invocation");
        assert_eq!(cli.size, None);

        let cli = Cli::try_parse_from(["mandelview", "--size", "1920x1080"]).expect("with size");
        assert_eq!(cli.size, Some((1920, 1080)));
    }
}
