//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::conversion::{
    ConversionConfig, ConversionEngine, ConversionResult, ConversionStatistics, ConvertedJson,
};
use crate::error::{ConversionError, ConversionErrorKind};
use crate::naming::Convention;
use crate::parser::directory::find_json_files;
use crate::parser::JsonSource;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "keycase")]
#[command(about = "Rename JSON keys between snake_case and camelCase, at every depth")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Input JSON source (string, file, or directory)
    #[arg()]
    pub input: Option<String>,

    /// Target key convention
    #[arg(long = "to", value_enum, default_value_t = Case::Camel)]
    pub case: Case,

    /// Output file path (default: stdout); required for directories
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read JSON from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Disable pretty-printing
    #[arg(long)]
    pub plain: bool,

    /// Maximum input size (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub memory_limit: Option<String>,

    /// Maximum container nesting depth (default: 1000)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Only validate JSON, don't convert
    #[arg(long)]
    pub validate_only: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,

    /// Continue converting other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,
}

/// Key conventions accepted by `--to`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    #[value(name = "camel", alias = "camelCase")]
    Camel,
    #[value(name = "snake", alias = "snake_case")]
    Snake,
}

impl From<Case> for Convention {
    fn from(case: Case) -> Self {
        match case {
            Case::Camel => Convention::Camel,
            Case::Snake => Convention::Snake,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let conversion_config = Self::create_conversion_config(&args)?;

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &Args) -> ConversionResult<ConversionConfig> {
        let config = ConversionConfig {
            convention: args.case.into(),
            pretty: !args.plain,
            memory_limit: parse_memory_limit(&args.memory_limit)?,
            max_depth: Some(args.max_depth.unwrap_or(1000)),
        };

        // Validate configuration
        config
            .validate()
            .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;

        Ok(config)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }

    /// Get input source description
    pub fn input_description(&self) -> String {
        if self.args.stdin {
            "standard input".to_string()
        } else if let Some(input) = &self.args.input {
            format!("'{}'", input)
        } else {
            "no input specified".to_string()
        }
    }

    /// Get output destination description
    pub fn output_description(&self) -> String {
        if let Some(output) = &self.args.output {
            format!("'{}'", output.display())
        } else {
            "standard output".to_string()
        }
    }
}

/// Parse memory limit string (e.g., "100MB", "1GB", "500KB")
fn parse_memory_limit(limit: &Option<String>) -> ConversionResult<usize> {
    let Some(limit_str) = limit else {
        return Ok(100 * 1024 * 1024); // 100MB default
    };
    let limit_str = limit_str.trim().to_uppercase();
    let invalid = || {
        ConversionError::conversion(ConversionErrorKind::Configuration {
            message: format!("Invalid memory limit: {}", limit_str),
        })
    };

    let scaled = |suffix: &str, factor: f64| -> ConversionResult<usize> {
        let size = &limit_str[..limit_str.len() - suffix.len()];
        let value = size.trim().parse::<f64>().map_err(|_| invalid())?;
        Ok((value * factor) as usize)
    };

    if limit_str.ends_with("GB") {
        scaled("GB", 1024.0 * 1024.0 * 1024.0)
    } else if limit_str.ends_with("MB") {
        scaled("MB", 1024.0 * 1024.0)
    } else if limit_str.ends_with("KB") {
        scaled("KB", 1024.0)
    } else if let Some(bytes) = limit_str.strip_suffix('B') {
        bytes.trim().parse::<usize>().map_err(|_| invalid())
    } else {
        // Assume bytes
        limit_str.parse::<usize>().map_err(|_| invalid())
    }
}

/// Execute the command described by `config`
pub fn run(config: &CliConfig) -> CliResult<()> {
    tracing::debug!(
        input = %config.input_description(),
        output = %config.output_description(),
        convention = %config.conversion_config.convention,
        "starting"
    );

    let args = &config.args;
    if args.stdin {
        return convert_single(&JsonSource::Stdin, config);
    }

    let input = args.input.as_deref().ok_or_else(|| {
        ConversionError::conversion(ConversionErrorKind::configuration(
            "No input provided. Use --stdin or provide an input path".to_string(),
        ))
    })?;

    let path = PathBuf::from(input);
    if JsonSource::looks_like_json(input) {
        convert_single(&JsonSource::String(input.to_string()), config)
    } else if path.is_file() {
        convert_single(&JsonSource::File(path), config)
    } else if path.is_dir() {
        convert_directory(&path, config)
    } else {
        Err(ConversionError::conversion(ConversionErrorKind::io(
            format!("Input path does not exist: {}", input),
            Some(path),
        )))
    }
}

fn convert_single(source: &JsonSource, config: &CliConfig) -> CliResult<()> {
    let engine = ConversionEngine::new(config.conversion_config.clone());

    if config.args.validate_only {
        source.parse(config.conversion_config.memory_limit)?;
        CliUtils::show_success("Valid JSON", config.is_quiet());
        return Ok(());
    }

    let converted = engine.convert_from_source(source)?;
    match &config.args.output {
        Some(output_path) => {
            write_output(output_path, &converted)?;
            CliUtils::show_success(
                &format!("Converted to: {}", output_path.display()),
                config.is_quiet(),
            );
        }
        None => println!("{}", converted.content),
    }

    if config.args.stats && !config.is_quiet() {
        eprintln!("\nConversion Statistics:\n{}", converted.statistics.summary());
    }
    Ok(())
}

fn convert_directory(input_dir: &Path, config: &CliConfig) -> CliResult<()> {
    let args = &config.args;
    let json_files = find_json_files(input_dir, args.recursive)
        .map_err(|e| ConversionError::io(e, Some(input_dir.to_path_buf())))?;

    if json_files.is_empty() {
        CliUtils::show_warning(
            &format!("No JSON files found in {}", input_dir.display()),
            config.is_quiet(),
        );
        return Ok(());
    }

    if args.validate_only {
        return validate_files(input_dir, &json_files, config);
    }

    let output_dir = args.output.as_ref().ok_or_else(|| {
        ConversionError::conversion(ConversionErrorKind::configuration(
            "Output directory required for directory conversion".to_string(),
        ))
    })?;

    CliUtils::show_success(
        &format!("Found {} JSON files", json_files.len()),
        config.is_quiet(),
    );

    let start_time = Instant::now();
    let engine = ConversionEngine::new(config.conversion_config.clone());
    let progress = (!config.is_quiet() && CliUtils::should_use_color())
        .then(|| CliUtils::create_progress_bar(json_files.len() as u64));
    let mut totals = ConversionStatistics::new();
    let mut failures = 0usize;

    for json_file in &json_files {
        let relative_path = json_file.strip_prefix(input_dir).unwrap_or(json_file);
        let output_file =
            path_mapping::map_input_to_output(input_dir, json_file, output_dir, "json");

        let result = engine
            .convert_from_source(&JsonSource::File(json_file.clone()))
            .and_then(|converted| write_output(&output_file, &converted).map(|_| converted));

        match result {
            Ok(converted) => {
                totals.combine(&converted.statistics);
                if progress.is_none() {
                    CliUtils::show_success(
                        &format!("{} -> {}", relative_path.display(), output_file.display()),
                        config.is_quiet(),
                    );
                }
            }
            Err(e) => {
                failures += 1;
                CliUtils::show_error(&format!(
                    "Error converting {}: {}",
                    relative_path.display(),
                    e.user_message()
                ));
                if !args.continue_on_error {
                    if let Some(pb) = &progress {
                        pb.abandon();
                    }
                    return Err(e);
                }
            }
        }

        if let Some(pb) = &progress {
            pb.set_message(relative_path.display().to_string());
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }
    CliUtils::show_success(
        &format!(
            "Converted {} files in {}",
            json_files.len() - failures,
            CliUtils::format_duration(start_time.elapsed())
        ),
        config.is_quiet(),
    );
    if failures > 0 {
        CliUtils::show_warning(
            &format!("{} of {} files failed", failures, json_files.len()),
            config.is_quiet(),
        );
    }
    if args.stats && !config.is_quiet() {
        eprintln!("\nConversion Statistics:\n{}", totals.summary());
    }
    Ok(())
}

fn validate_files(input_dir: &Path, json_files: &[PathBuf], config: &CliConfig) -> CliResult<()> {
    let mut invalid = 0usize;
    for json_file in json_files {
        let relative_path = json_file.strip_prefix(input_dir).unwrap_or(json_file);
        match JsonSource::File(json_file.clone()).parse(config.conversion_config.memory_limit) {
            Ok(_) => CliUtils::show_success(&relative_path.display().to_string(), config.is_quiet()),
            Err(e) => {
                invalid += 1;
                CliUtils::show_error(&format!("{}: {}", relative_path.display(), e.user_message()));
            }
        }
    }

    if invalid > 0 && !config.args.continue_on_error {
        return Err(ConversionError::conversion(ConversionErrorKind::json_parse(
            format!("{} of {} files are not valid JSON", invalid, json_files.len()),
            None,
        )));
    }
    Ok(())
}

fn write_output(output_path: &Path, converted: &ConvertedJson) -> CliResult<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ConversionError::io(e, Some(parent.to_path_buf())))?;
    }
    std::fs::write(output_path, &converted.content)
        .map_err(|e| ConversionError::io(e, Some(output_path.to_path_buf())))
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if stderr is an interactive terminal
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stderr) && std::env::var("NO_COLOR").is_err()
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    CliUtils::show_error(&error.user_message());

    // Provide helpful suggestions
    match error {
        ConversionError::ParseError(_) => {
            eprintln!("\nTip: Use --validate-only to check JSON syntax before conversion");
        }
        ConversionError::Conversion {
            kind: ConversionErrorKind::JsonTooLarge { .. },
            ..
        } => {
            eprintln!("\nTip: Use --memory-limit to increase the input size allowance");
        }
        ConversionError::Validation(_) => {
            eprintln!("\nTip: Use --max-depth to accept more deeply nested input");
        }
        _ => {}
    }

    eprintln!("\nTry 'keycase --help' for usage information.");
}

/// Command execution result
pub type CliResult<T> = Result<T, ConversionError>;
