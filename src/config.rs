// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::path::{Path, PathBuf};

use crate::bindings::Bindings;

pub const HEADER: &str = "# THIS FILE IS AUTOMATICALLY GENERATED\n# DO NOT EDIT\n";

pub const DEFAULT_TEMPLATES_DIR: &str = ".github/workflow-templates";
pub const TEMPLATE_FILE_NAME: &str = "test.yml.erb";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Write,
    // Compare against the existing output instead of writing it.
    Check,
}

#[derive(Clone, Debug)]
pub struct GenerateConfig {
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub bindings: Bindings,
    pub mode: Mode,
}

impl GenerateConfig {
    /// The template sits in `templates_dir`; the output goes to its sibling `workflows` directory.
    pub fn from_templates_dir(templates_dir: &Path) -> GenerateConfig {
        GenerateConfig {
            template_path: templates_dir.join(TEMPLATE_FILE_NAME),
            output_path: templates_dir.join("..").join("workflows").join("test_generated.yml"),
            bindings: Bindings::with_defaults(),
            mode: Mode::Write,
        }
    }
}
