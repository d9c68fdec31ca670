// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{
    config::{GenerateConfig, Mode},
    error::GenerateError,
    process_template::{emit_docs, generated_file_text, normalize_docs, process_yaml_template},
};

pub const DUMP_LABEL: &str = "rendered yaml is: ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerateOutcome {
    Written,
    UpToDate,
}

/// Runs the whole pipeline, printing the rendered YAML to stdout.
pub fn generate(config: &GenerateConfig) -> Result<GenerateOutcome, GenerateError> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    generate_with_dump(config, &mut stdout)
}

/// Runs the whole pipeline, printing the rendered YAML to `dump`.
///
/// Either the complete output file is written or the existing one is left untouched.
pub fn generate_with_dump<W: Write>(config: &GenerateConfig, dump: &mut W) -> Result<GenerateOutcome, GenerateError> {
    info!("loading template {}", config.template_path.display());
    let template = fs::read_to_string(&config.template_path).map_err(|source| GenerateError::FileRead {
        path: config.template_path.clone(),
        source,
    })?;

    debug!("bindings: {:?}", config.bindings.names().collect::<Vec<_>>());
    let filename = config.template_path.display().to_string();
    let docs = process_yaml_template(&filename, &template, &config.bindings)?;

    let rendered = emit_docs(&docs).unwrap_or_else(|err| {
        warn!("rendered yaml cannot be displayed: {}", err);
        String::new()
    });
    if let Err(err) = write!(dump, "{}\n{}", DUMP_LABEL, rendered).and_then(|_| dump.flush()) {
        warn!("failed to print rendered yaml: {}", err);
    }

    let normalized = normalize_docs(&docs)?;
    let output = generated_file_text(&normalized)?;
    match config.mode {
        Mode::Write => {
            write_atomic(&config.output_path, &output)?;
            info!("wrote {}", config.output_path.display());
            Ok(GenerateOutcome::Written)
        }
        Mode::Check => check_up_to_date(&config.output_path, &output),
    }
}

fn check_up_to_date(path: &Path, output: &str) -> Result<GenerateOutcome, GenerateError> {
    match fs::read_to_string(path) {
        Ok(existing) if existing == output => {
            info!("{} is up to date", path.display());
            Ok(GenerateOutcome::UpToDate)
        }
        Ok(_) => Err(GenerateError::Stale { path: path.to_path_buf() }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(GenerateError::Stale { path: path.to_path_buf() }),
        Err(source) => Err(GenerateError::FileRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// The temporary file lives next to the destination so the final rename stays on one filesystem.
fn write_atomic(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let write_err = |source: io::Error| GenerateError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = fs::metadata(path).map(|metadata| metadata.permissions().mode()).unwrap_or(0o644);
        file.as_file().set_permissions(fs::Permissions::from_mode(mode)).map_err(write_err)?;
    }

    file.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}
