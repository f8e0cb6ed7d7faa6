#![deny(missing_docs)]

//! Command-line front end for the corruption-risk scoring client.

use std::path::PathBuf;
use std::time::Duration;

use obra_risk::batch::{BatchTable, REQUIRED_COLUMNS, UploadedFile};
use obra_risk::config::{self, ClientSettings};
use obra_risk::controller::{PredictorController, StatusTone};
use obra_risk::form::FormField;
use obra_risk::logging;
use obra_risk::presenter::ResultView;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = logging::init(options.verbose) {
        eprintln!("Logging disabled: {err}");
    }
    let settings = load_settings(&options)?;
    tracing::debug!(api_base = %settings.api_base, "settings resolved");

    match options.command {
        Command::Predict { fields } => run_predict(settings, &fields),
        Command::Batch { file, out, export } => run_batch(settings, file, out, export),
        Command::Config { save } => run_config(&settings, options.config_path.as_deref(), save),
    }
}

fn load_settings(options: &Options) -> Result<ClientSettings, String> {
    let stored = match &options.config_path {
        Some(path) => config::load_from_path(path),
        None => config::load_or_default(),
    }
    .map_err(|err| err.to_string())?;
    let env_api_base = std::env::var(config::API_BASE_ENV).ok();
    config::resolve(stored, env_api_base.as_deref(), options.api_base.as_deref())
        .map_err(|err| err.to_string())
}

fn run_predict(settings: ClientSettings, fields: &[(String, String)]) -> Result<(), String> {
    let mut controller = PredictorController::with_http_client(settings);
    for (name, value) in fields {
        controller
            .set_field_from_str(name, value)
            .map_err(|err| err.to_string())?;
    }
    if !controller.submit_enabled() {
        let missing: Vec<String> = controller
            .form()
            .invalid_fields()
            .iter()
            .map(|field| format!("--{}", field.wire_name().replace('_', "-")))
            .collect();
        return Err(format!(
            "Missing or non-numeric values for: {}",
            missing.join(", ")
        ));
    }
    controller.submit_prediction();
    wait_for_jobs(&mut controller)?;
    match controller.result_view() {
        Some(view) => {
            print_result(&view);
            Ok(())
        }
        None => Err("No prediction received".to_string()),
    }
}

fn run_batch(
    settings: ClientSettings,
    file: PathBuf,
    out: Option<PathBuf>,
    export: bool,
) -> Result<(), String> {
    let mut controller = PredictorController::with_http_client(settings);
    controller.select_file(UploadedFile::from_path(file));
    controller.upload_batch();
    wait_for_jobs(&mut controller)?;
    match controller.batch_table() {
        Some(table) => print_table(&table),
        None => println!("Sin filas."),
    }
    if let Some(count) = controller.batch_count() {
        println!("Total: {count}");
    }
    if export && controller.export_enabled() {
        let path = controller
            .save_export(out.as_deref())
            .map_err(|err| err.to_string())?;
        println!("Exportado a {}", path.display());
    }
    Ok(())
}

fn run_config(
    settings: &ClientSettings,
    config_path: Option<&std::path::Path>,
    save: bool,
) -> Result<(), String> {
    let text = toml::to_string_pretty(settings).map_err(|err| err.to_string())?;
    print!("{text}");
    if save {
        match config_path {
            Some(path) => config::save_to_path(settings, path),
            None => config::save(settings),
        }
        .map_err(|err| err.to_string())?;
        eprintln!("Settings saved.");
    }
    Ok(())
}

/// Drive the controller until both coordinators are idle, then surface
/// notifications. An error notification fails the command.
fn wait_for_jobs(controller: &mut PredictorController) -> Result<(), String> {
    while !controller.wait_until_idle(POLL_INTERVAL) {}
    let mut failure = None;
    while let Some(notification) = controller.take_notification() {
        match notification.tone {
            StatusTone::Error => failure = Some(notification.message),
            tone => eprintln!("{}: {}", tone.label(), notification.message),
        }
    }
    match failure {
        Some(message) => Err(message),
        None => Ok(()),
    }
}

fn print_result(view: &ResultView) {
    println!("Probabilidad de riesgo: {}", view.percentage);
    println!("Resultado: {}", view.verdict.label());
    if let Some(flags) = &view.flags {
        println!("Factores principales:");
        for flag in flags {
            println!("  - {flag}");
        }
    }
}

fn print_table(table: &BatchTable) {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    println!("{}", format_row(&table.columns, &widths));
    for row in &table.rows {
        println!("{}", format_row(row, &widths));
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

enum Command {
    Predict { fields: Vec<(String, String)> },
    Batch {
        file: PathBuf,
        out: Option<PathBuf>,
        export: bool,
    },
    Config { save: bool },
}

struct Options {
    command: Command,
    api_base: Option<String>,
    config_path: Option<PathBuf>,
    verbose: bool,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut api_base = None;
    let mut config_path = None;
    let mut verbose = false;
    let mut command_name = None;
    let mut fields = Vec::new();
    let mut positional = Vec::new();
    let mut out = None;
    let mut export = true;
    let mut save = false;
    let mut idx = 0usize;
    while idx < args.len() {
        let arg = args[idx].as_str();
        match arg {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "-v" | "--verbose" => verbose = true,
            "--api-base" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--api-base requires a value".to_string())?;
                api_base = Some(value.clone());
            }
            "--config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--config requires a value".to_string())?;
                config_path = Some(PathBuf::from(value));
            }
            "--out" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--out requires a value".to_string())?;
                out = Some(PathBuf::from(value));
            }
            "--no-export" => export = false,
            "--save" => save = true,
            flag if flag.starts_with("--") => {
                let name = &flag[2..];
                let field: FormField = name
                    .parse()
                    .map_err(|_| format!("Unknown argument: {flag}"))?;
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| format!("{flag} requires a value"))?;
                fields.push((field.wire_name().to_string(), value.clone()));
            }
            value if command_name.is_none() => command_name = Some(value.to_string()),
            value => positional.push(value.to_string()),
        }
        idx += 1;
    }

    let command = match command_name.as_deref() {
        Some("predict") => {
            reject_positional(&positional)?;
            Command::Predict { fields }
        }
        Some("batch") => {
            let file = single_positional(positional)?;
            Command::Batch {
                file,
                out,
                export,
            }
        }
        Some("config") => {
            reject_positional(&positional)?;
            Command::Config { save }
        }
        Some(other) => return Err(format!("Unknown command: {other}\n\n{}", help_text())),
        None => {
            println!("{}", help_text());
            return Ok(None);
        }
    };
    Ok(Some(Options {
        command,
        api_base,
        config_path,
        verbose,
    }))
}

fn single_positional(mut positional: Vec<String>) -> Result<PathBuf, String> {
    match positional.len() {
        0 => Err("batch requires a CSV file".to_string()),
        1 => Ok(PathBuf::from(positional.remove(0))),
        _ => Err(format!(
            "batch takes one CSV file, got {}: {}",
            positional.len(),
            positional.join(" ")
        )),
    }
}

fn reject_positional(positional: &[String]) -> Result<(), String> {
    match positional.first() {
        Some(extra) => Err(format!("Unexpected argument: {extra}")),
        None => Ok(()),
    }
}

fn help_text() -> String {
    let fields: Vec<String> = FormField::ALL
        .iter()
        .map(|field| format!("  --{} <value>", field.wire_name().replace('_', "-")))
        .collect();
    format!(
        "obra-risk {version}\n\
Score public works projects for corruption risk.\n\n\
Usage:\n  obra-risk [global options] predict [field options]\n  \
obra-risk [global options] batch <file.csv> [--out <dir>] [--no-export]\n  \
obra-risk [global options] config [--save]\n\n\
Global options:\n  --api-base <url>   Scoring service address (env {env})\n  \
--config <path>    Settings file to use instead of the default\n  \
-v, --verbose      Debug logging\n  -h, --help         Show this help\n\n\
Field options (predict):\n{fields}\n\n\
Flags take 0/1, region takes ALTA/MEDIA/BAJA, process type takes\n\
Licitación, Adjudicación Simplificada or Contratación Directa.\n\n\
Batch files need the columns:\n  {columns}",
        version = env!("CARGO_PKG_VERSION"),
        env = config::API_BASE_ENV,
        fields = fields.join("\n"),
        columns = REQUIRED_COLUMNS.join(", "),
    )
}
