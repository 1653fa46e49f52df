use crate::XtaskError;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use svgfit_core::{Normalizer, TransformOptions};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn parse_filter(args: &[String]) -> Result<Option<String>, XtaskError> {
    let mut filter = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--filter" => {
                i += 1;
                filter = Some(args.get(i).ok_or(XtaskError::Usage)?.to_string());
            }
            _ => return Err(XtaskError::Usage),
        }
        i += 1;
    }
    Ok(filter)
}

fn read(path: &Path) -> Result<String, XtaskError> {
    fs::read_to_string(path).map_err(|source| XtaskError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}

fn fixture_sources(filter: Option<&str>) -> Result<Vec<PathBuf>, XtaskError> {
    let root = workspace_root().join("fixtures");
    let entries = fs::read_dir(&root).map_err(|source| XtaskError::ReadFile {
        path: root.display().to_string(),
        source,
    })?;

    let mut out = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if !name.ends_with(".svg") || name.ends_with(".golden.svg") {
            continue;
        }
        if filter.is_some_and(|f| !name.contains(f)) {
            continue;
        }
        out.push(path);
    }
    out.sort();
    Ok(out)
}

fn render_fixture(svg_path: &Path) -> Result<String, XtaskError> {
    let json_path = svg_path.with_extension("json");
    let options = if json_path.exists() {
        let value: serde_json::Value = serde_json::from_str(&read(&json_path)?)?;
        TransformOptions::from_value(value).map_err(|source| XtaskError::Transform {
            path: json_path.display().to_string(),
            source,
        })?
    } else {
        TransformOptions::default()
    };

    let transform_err = |source| XtaskError::Transform {
        path: svg_path.display().to_string(),
        source,
    };
    let normalizer = Normalizer::new(options).map_err(transform_err)?;
    let out = futures::executor::block_on(normalizer.transform(&read(svg_path)?))
        .map_err(transform_err)?;

    if let Err(e) = roxmltree::Document::parse(&out) {
        return Err(XtaskError::Malformed {
            path: svg_path.display().to_string(),
            message: e.to_string(),
        });
    }
    Ok(out)
}

pub(crate) fn update_goldens(args: Vec<String>) -> Result<(), XtaskError> {
    let filter = parse_filter(&args)?;
    let sources = fixture_sources(filter.as_deref())?;
    for svg_path in &sources {
        let out = render_fixture(svg_path)?;
        let golden_path = svg_path.with_extension("golden.svg");
        fs::write(&golden_path, format!("{out}\n")).map_err(|source| XtaskError::WriteFile {
            path: golden_path.display().to_string(),
            source,
        })?;
    }
    println!("updated {} golden file(s)", sources.len());
    Ok(())
}

pub(crate) fn check_goldens(args: Vec<String>) -> Result<(), XtaskError> {
    let filter = parse_filter(&args)?;
    let sources = fixture_sources(filter.as_deref())?;

    let mut report = String::new();
    for svg_path in &sources {
        let out = render_fixture(svg_path)?;
        let golden_path = svg_path.with_extension("golden.svg");
        let golden = fs::read_to_string(&golden_path).unwrap_or_default();
        if golden.trim_end() != out {
            let _ = writeln!(report, "  {}", golden_path.display());
        }
    }

    if !report.is_empty() {
        return Err(XtaskError::CheckFailed(report));
    }
    println!("{} golden file(s) up to date", sources.len());
    Ok(())
}
