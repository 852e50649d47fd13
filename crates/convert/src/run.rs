//! Line-by-line conversion of one input file.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use pipeline::Pipeline;

use crate::cli::Cli;
use crate::conf::ConvertConfig;
use crate::stats::{FailureKind, RunStats, StatsSnapshot};

/// Fully resolved paths and switches for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub problems: PathBuf,
    pub json: bool,
    pub report_stats: bool,
}

impl RunOptions {
    pub fn resolve(cli: &Cli, config: &ConvertConfig) -> Self {
        Self {
            input: cli.input.clone(),
            output: cli
                .output
                .clone()
                .unwrap_or_else(|| with_suffix(&cli.input, &config.output_suffix)),
            problems: cli
                .problems
                .clone()
                .unwrap_or_else(|| with_suffix(&cli.input, &config.problems_suffix)),
            json: config.json_output,
            report_stats: config.report_stats,
        }
    }
}

/// `path` with `suffix` appended to its final component.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Convert `options.input`, writing both sinks.
///
/// Lines the pipeline rejects are copied to the problems file and do not stop
/// the run; I/O failures on the input or either sink do.
pub fn run(pipeline: &Pipeline, options: &RunOptions) -> Result<StatsSnapshot> {
    let input = File::open(&options.input)
        .with_context(|| format!("Failed to open input {}", options.input.display()))?;
    let output = File::create(&options.output)
        .with_context(|| format!("Failed to create output {}", options.output.display()))?;
    let problems = File::create(&options.problems)
        .with_context(|| format!("Failed to create problems file {}", options.problems.display()))?;

    info!(
        "Converting {} -> {} (problems: {})",
        options.input.display(),
        options.output.display(),
        options.problems.display()
    );

    let stats = RunStats::new();
    let mut output = BufWriter::new(output);
    let mut problems = BufWriter::new(problems);

    convert_lines(
        pipeline,
        BufReader::new(input),
        &mut output,
        &mut problems,
        options.json,
        &stats,
    )?;
    output.flush().context("Failed to flush output")?;
    problems.flush().context("Failed to flush problems file")?;

    let snapshot = stats.snapshot();
    if options.report_stats {
        info!(
            "Run finished: {}",
            serde_json::to_string(&snapshot).unwrap_or_else(|_| format!("{:?}", snapshot))
        );
    }
    Ok(snapshot)
}

/// Core loop over any reader and pair of writers.
///
/// Empty lines are counted and skipped; they go to neither sink. A line that
/// is not valid UTF-8 is copied byte for byte to the problems sink. In JSON
/// mode the typed output entry is written, after it has rendered cleanly.
pub fn convert_lines<R, W, P>(
    pipeline: &Pipeline,
    mut reader: R,
    output: &mut W,
    problems: &mut P,
    json: bool,
    stats: &RunStats,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    P: Write,
{
    let mut buf = Vec::new();
    let mut number = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("Failed to read line {}", number + 1))?;
        if read == 0 {
            break;
        }
        number += 1;
        stats.record_read();

        let raw = strip_newline(&buf);
        if raw.is_empty() {
            stats.record_empty();
            continue;
        }

        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(err) => {
                debug!("Line {} rejected: {}", number, err);
                stats.record_failure(FailureKind::NonUtf8);
                problems
                    .write_all(raw)
                    .and_then(|_| problems.write_all(b"\n"))
                    .context("Failed to write problems file")?;
                continue;
            }
        };

        match pipeline.transform_rendered(line) {
            Ok((entry, text)) => {
                if json {
                    let encoded = serde_json::to_string(&entry).context("Failed to serialize entry")?;
                    writeln!(output, "{}", encoded).context("Failed to write output")?;
                } else {
                    writeln!(output, "{}", text).context("Failed to write output")?;
                }
                stats.record_converted();
            }
            Err(err) => {
                debug!("Line {} rejected: {}", number, err);
                stats.record_failure(FailureKind::of(&err));
                writeln!(problems, "{}", line).context("Failed to write problems file")?;
            }
        }
    }
    Ok(())
}

/// `line` without its trailing `\n` or `\r\n`.
fn strip_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const INPUT: &str = "10.03.2025 15:14:49.523 INFORMATION Program version: '3.4.0.48729'\n\
                         not a log line\n\
                         \n\
                         2025-03-10 15:14:51.5882| INFO|11|MobileComputer.GetDeviceId| Device id: '@MINDEO-M40-D-410244015546'\n";

    fn convert(json: bool) -> (String, String, StatsSnapshot) {
        let pipeline = Pipeline::standard().unwrap();
        let stats = RunStats::new();
        let mut output = Vec::new();
        let mut problems = Vec::new();
        convert_lines(&pipeline, Cursor::new(INPUT), &mut output, &mut problems, json, &stats).unwrap();
        (
            String::from_utf8(output).unwrap(),
            String::from_utf8(problems).unwrap(),
            stats.snapshot(),
        )
    }

    #[test]
    fn test_lines_split_between_sinks() {
        let (output, problems, stats) = convert(false);
        assert_eq!(
            output,
            "10-03-2025\t15:14:49.523\tINFO\tDEFAULT\tProgram version: '3.4.0.48729'\n\
             10-03-2025\t15:14:51.5882\tINFO\tMobileComputer.GetDeviceId\tDevice id: '@MINDEO-M40-D-410244015546'\n"
        );
        assert_eq!(problems, "not a log line\n");
        assert_eq!(stats.lines_read, 4);
        assert_eq!(stats.converted, 2);
        assert_eq!(stats.no_match, 1);
        assert_eq!(stats.empty_lines, 1);
    }

    #[test]
    fn test_json_lines() {
        let (output, _, stats) = convert(true);
        let rows: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(stats.converted, 2);
        assert_eq!(rows[0]["level"], "INFO");
        assert_eq!(rows[0]["calling_method"], serde_json::Value::Null);
        assert_eq!(rows[1]["time"], "15:14:51.5882");
        assert_eq!(rows[1]["calling_method"], "MobileComputer.GetDeviceId");
    }

    #[test]
    fn test_invalid_utf8_line_goes_to_problems() {
        let pipeline = Pipeline::standard().unwrap();
        let stats = RunStats::new();
        let input: &[u8] = b"garbage \xff\xfe line\r\n10.03.2025 15:14:49.523 INFORMATION ok\n";
        let mut output = Vec::new();
        let mut problems = Vec::new();

        convert_lines(&pipeline, Cursor::new(input), &mut output, &mut problems, false, &stats).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "10-03-2025\t15:14:49.523\tINFO\tDEFAULT\tok\n"
        );
        assert_eq!(problems, b"garbage \xff\xfe line\n");
        let snap = stats.snapshot();
        assert_eq!(snap.lines_read, 2);
        assert_eq!(snap.converted, 1);
        assert_eq!(snap.non_utf8, 1);
        assert_eq!(snap.problems, 1);
    }

    #[test]
    fn test_last_line_without_newline() {
        let pipeline = Pipeline::standard().unwrap();
        let stats = RunStats::new();
        let mut output = Vec::new();
        let mut problems = Vec::new();
        convert_lines(
            &pipeline,
            Cursor::new("10.03.2025 15:14:49.523 WARNING tail"),
            &mut output,
            &mut problems,
            false,
            &stats,
        )
        .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "10-03-2025\t15:14:49.523\tWARN\tDEFAULT\ttail\n");
    }

    #[test]
    fn test_json_line_that_fails_to_render_is_a_problem() {
        use pipeline::{Entry, FieldValue, Format, LineParser, Part, PartSet, PartType, TransformMap};
        use pipeline::ConvertError;

        let input = Format::delimited(',', PartSet::builder().part("msg", Part::text()).build().unwrap());
        let unrenderable = PartSet::builder()
            .part(
                "msg",
                Part::new(
                    PartType::Text,
                    |raw| raw.map(FieldValue::text).ok_or(ConvertError::Missing),
                    |_| Err(ConvertError::Other("cannot render".into())),
                ),
            )
            .build()
            .unwrap();
        let output_format = Format::delimited('\t', unrenderable);
        let out = output_format.clone();
        let map = TransformMap::builder(output_format)
            .route(input.clone(), move |e| {
                Ok(Entry::from_pairs(out.clone(), [("msg", FieldValue::text(e.get_string("msg")?))])?)
            })
            .unwrap()
            .build()
            .unwrap();
        let pipeline = Pipeline::new(LineParser::new(vec![input]).unwrap(), map);

        let stats = RunStats::new();
        let mut output = Vec::new();
        let mut problems = Vec::new();
        convert_lines(&pipeline, Cursor::new("hello\n"), &mut output, &mut problems, true, &stats).unwrap();

        assert!(output.is_empty());
        assert_eq!(problems, b"hello\n");
        assert_eq!(stats.snapshot().render_failures, 1);
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(
            with_suffix(Path::new("/var/log/app.log"), ".converted"),
            PathBuf::from("/var/log/app.log.converted")
        );
    }

    #[test]
    fn test_resolve_defaults_from_config() {
        let cli = Cli {
            input: PathBuf::from("app.log"),
            output: None,
            problems: Some(PathBuf::from("bad.txt")),
            config: None,
            json: false,
            no_stats: false,
        };
        let options = RunOptions::resolve(&cli, &ConvertConfig::default());
        assert_eq!(options.output, PathBuf::from("app.log.converted"));
        assert_eq!(options.problems, PathBuf::from("bad.txt"));
        assert!(!options.json);
        assert!(options.report_stats);
    }
}
