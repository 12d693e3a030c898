use std::collections::HashMap;
use std::env;
use std::fmt::Display;

use tracing_subscriber::EnvFilter;
use viterbi_align::{
    AlignmentResult, CostGrid, EmissionSource, ForcedAlignerBuilder, OriginCost, StateLabel,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("align_grid: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    let grid = match CostGrid::load(&options.grid_path) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("align_grid: {}: {err}", options.grid_path);
            std::process::exit(1);
        }
    };
    tracing::info!(
        path = %options.grid_path,
        frames = grid.num_frames(),
        states = grid.num_states(),
        "loaded cost grid"
    );

    let outcome = match &options.label_map {
        Some(map) => align(&options, &grid, options.transcript.clone(), Some(map.clone())),
        None => {
            let transcript = match options
                .transcript
                .iter()
                .map(|s| s.parse::<usize>())
                .collect::<Result<Vec<_>, _>>()
            {
                Ok(t) => t,
                Err(_) => {
                    eprintln!("align_grid: non-numeric transcript labels need --map");
                    std::process::exit(2);
                }
            };
            align(&options, &grid, transcript, None)
        }
    };

    if let Err(err) = outcome {
        eprintln!("align_grid: {err}");
        std::process::exit(1);
    }
}

fn align<L: StateLabel + Display>(
    options: &Options,
    grid: &CostGrid,
    transcript: Vec<L>,
    label_map: Option<HashMap<L, usize>>,
) -> viterbi_align::Result<()> {
    let mut builder = ForcedAlignerBuilder::new(transcript.clone())
        .with_stay_probability(options.stay_probability)
        .with_origin_cost(options.origin);
    if let Some(map) = label_map {
        builder = builder.with_label_map(map);
    }
    let result = builder.build(grid)?.run()?;
    options.format.write(&result, &transcript);
    Ok(())
}

struct Options {
    grid_path: String,
    transcript: Vec<String>,
    label_map: Option<HashMap<String, usize>>,
    stay_probability: f64,
    origin: OriginCost,
    format: OutputFormat,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut grid_path = None;
        let mut transcript = None;
        let mut label_map = None;
        let mut stay_probability = 0.5f64;
        let mut origin = OriginCost::FirstLabel;
        let mut format = OutputFormat::Text;

        while let Some(arg) = args.next() {
            let arg: String = arg.into();
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };
            let mut value = |name: &str| -> Result<String, String> {
                match &inline {
                    Some(v) => Ok(v.clone()),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {name}")),
                }
            };
            match flag.as_str() {
                "--help" | "-h" => {
                    Options::print_help();
                    std::process::exit(0);
                }
                "--transcript" | "-t" => {
                    transcript = Some(split_list(&value("--transcript")?));
                }
                "--map" | "-m" => {
                    label_map = Some(parse_map(&value("--map")?)?);
                }
                "--stay" | "-p" => {
                    stay_probability = value("--stay")?
                        .parse::<f64>()
                        .map_err(|_| "stay probability must be a number".to_string())?;
                }
                "--origin" => {
                    origin = match value("--origin")?.as_str() {
                        "first-label" => OriginCost::FirstLabel,
                        "grid-origin" => OriginCost::GridOrigin,
                        other => return Err(format!("unknown origin '{other}'")),
                    };
                }
                "--format" => {
                    format = OutputFormat::from_str(&value("--format")?)?;
                }
                other if other.starts_with('-') => {
                    return Err(format!("unrecognized argument '{other}'"));
                }
                _ => {
                    if grid_path.replace(arg).is_some() {
                        return Err("only one grid file may be given".to_string());
                    }
                }
            }
        }

        let transcript: Vec<String> =
            transcript.ok_or_else(|| "--transcript is required".to_string())?;
        if transcript.is_empty() {
            return Err("--transcript must name at least one label".to_string());
        }
        Ok(Self {
            grid_path: grid_path.ok_or_else(|| "missing grid file".to_string())?,
            transcript,
            label_map,
            stay_probability,
            origin,
            format,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: align_grid <GRID_FILE> --transcript <LABELS> [options]

GRID_FILE holds one frame per line, whitespace separated costs per state
(negative log-likelihoods, as written by numpy.savetxt).

Options:
  -t, --transcript <a,b,c>      Ordered transcript labels (required)
  -m, --map <a=2,b=1,...>       Label to grid column map (required for non-numeric labels)
  -p, --stay <P>                Stay probability in (0, 1) (default: 0.5)
      --origin <first-label|grid-origin>
                                Cost seeding frame 0 (default: first-label);
                                grid-origin needs the first label on column 0
      --format <text|csv|json>  Output format (default: text)
  -h, --help                    Print this help message

Examples:
  align_grid likelihood.txt --transcript 2,6,5,1,0,3,4
  align_grid likelihood.txt -t a,b,c,b,c --map a=2,b=1,c=3 --format json
"
        );
    }
}

/// `RUST_LOG` directives, falling back to `info` when unset or malformed.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_map(value: &str) -> Result<HashMap<String, usize>, String> {
    split_list(value)
        .into_iter()
        .map(|entry| {
            let (label, column) = entry
                .split_once('=')
                .ok_or_else(|| format!("map entry '{entry}' is not label=column"))?;
            let column = column
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("column in '{entry}' must be a non-negative integer"))?;
            Ok((label.trim().to_string(), column))
        })
        .collect()
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write<L: StateLabel + Display>(self, result: &AlignmentResult<L>, transcript: &[L]) {
        match self {
            OutputFormat::Text => write_text(result, transcript),
            OutputFormat::Csv => write_csv(result),
            OutputFormat::Json => write_json(result),
        }
    }
}

fn write_text<L: StateLabel + Display>(result: &AlignmentResult<L>, transcript: &[L]) {
    let labels: Vec<String> = result.labels().iter().map(ToString::to_string).collect();
    println!("frames: {}", result.num_frames());
    println!("cost: {:.6}", result.cost());
    println!("alignment: [{}]", labels.join(", "));
    let counts: Vec<String> = result
        .counts_for(transcript)
        .iter()
        .map(|(label, count)| format!("({label}, {count})"))
        .collect();
    println!("counts: [{}]", counts.join(", "));
}

fn write_csv<L: StateLabel + Display>(result: &AlignmentResult<L>) {
    println!("position,label,start_frame,frames");
    for seg in result.segments() {
        println!("{},{},{},{}", seg.position, seg.label, seg.start, seg.frames);
    }
}

fn write_json<L: StateLabel + Display>(result: &AlignmentResult<L>) {
    println!("{}", render_json(result));
}

fn render_json<L: StateLabel + Display>(result: &AlignmentResult<L>) -> String {
    let segments: Vec<String> = result
        .segments()
        .iter()
        .map(|seg| {
            format!(
                "{{\"position\":{},\"label\":{},\"start_frame\":{},\"frames\":{}}}",
                seg.position,
                json_string(&seg.label.to_string()),
                seg.start,
                seg.frames
            )
        })
        .collect();
    format!(
        "{{\"frames\":{},\"cost\":{},\"segments\":[{}]}}",
        result.num_frames(),
        json_number(result.cost()),
        segments.join(",")
    )
}

/// Quoted JSON string literal for `value`.
fn json_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// JSON has no infinities or NaN
fn json_number(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "null".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligned(labels: [&str; 2]) -> AlignmentResult<String> {
        let grid = CostGrid::from_rows(&[[0.0, 1.0], [1.0, 0.0], [1.0, 0.0]]).unwrap();
        let transcript: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        let map = HashMap::from([(transcript[0].clone(), 0), (transcript[1].clone(), 1)]);
        ForcedAlignerBuilder::new(transcript)
            .with_label_map(map)
            .build(&grid)
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn json_escapes_backslash_and_quote() {
        assert_eq!(json_string(r"a\"), r#""a\\""#);
        assert_eq!(json_string(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(json_string("tab\there"), r#""tab\there""#);
        assert_eq!(json_string("\u{1}"), r#""\u0001""#);
    }

    #[test]
    fn json_output_keeps_labels_intact() {
        let json = render_json(&aligned([r"a\", "b\""]));
        assert!(json.contains(r#""label":"a\\","start_frame":0"#), "{json}");
        assert!(json.contains(r#""label":"b\"","start_frame":1"#), "{json}");
        assert!(json.ends_with("]}"));
    }

    #[test]
    fn json_number_never_emits_infinity() {
        assert_eq!(json_number(1.5), "1.5");
        assert_eq!(json_number(f64::INFINITY), "null");
    }

    #[test]
    fn log_filter_falls_back_to_info() {
        let fallback = log_filter(None).to_string();
        assert!(fallback.eq_ignore_ascii_case("info"), "{fallback}");
        let custom = log_filter(Some("viterbi_align=trace")).to_string();
        assert!(custom.to_ascii_lowercase().contains("viterbi_align=trace"), "{custom}");
    }
}
