mod goldens;

#[derive(Debug, thiserror::Error)]
enum XtaskError {
    #[error("usage: xtask <command> ...")]
    Usage,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("transform failed for {path}: {source}")]
    Transform {
        path: String,
        #[source]
        source: svgfit_core::Error,
    },
    #[error("output for {path} is not well-formed XML: {message}")]
    Malformed { path: String, message: String },
    #[error("golden check failed:\n{0}")]
    CheckFailed(String),
}

fn print_help() {
    println!("usage: xtask <command> ...");
    println!();
    println!("Commands:");
    println!("  update-goldens [--filter <substr>]   rewrite fixtures/*.golden.svg");
    println!("  check-goldens  [--filter <substr>]   report fixtures whose output drifted");
    println!();
    println!("Each fixtures/<name>.svg is transformed with the options in fixtures/<name>.json");
    println!("(defaults when absent).");
}

fn main() -> Result<(), XtaskError> {
    let mut args = std::env::args().skip(1);
    let Some(cmd_name) = args.next() else {
        return Err(XtaskError::Usage);
    };

    match cmd_name.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            Ok(())
        }
        "update-goldens" => goldens::update_goldens(args.collect()),
        "check-goldens" => goldens::check_goldens(args.collect()),
        other => Err(XtaskError::UnknownCommand(other.to_string())),
    }
}
