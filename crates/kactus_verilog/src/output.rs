//! Generation of one Verilog file: elaborate, preserve, render, write.

use std::io;
use std::path::{Path, PathBuf};

use kactus_common::InternalError;
use kactus_config::{GeneratorConfig, PreserveFailurePolicy};
use kactus_diagnostics::{Diagnostic, DiagnosticSink};
use kactus_elaborate::{elaborate_design, ElaborationContext};
use kactus_ir::GeneratedModule;
use kactus_model::{Component, Design, Library};
use log::{debug, info, warn};

use crate::header::FileHeader;
use crate::preserve::{read_implementation, PreserveError};
use crate::writer::VerilogWriter;

/// A failed generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The output directory could not be created.
    #[error("failed to create directory `{path}`: {source}")]
    CreateDir {
        /// The directory.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// The output file could not be written.
    #[error("failed to write `{path}`: {source}")]
    Write {
        /// The output file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// The previous file could not be preserved and the configuration says
    /// to abort.
    #[error("cannot preserve the implementation in `{path}`: {source}")]
    Preserve {
        /// The previous output file.
        path: PathBuf,
        /// Why preservation failed.
        #[source]
        source: PreserveError,
    },
    /// A generator bug.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// What to generate.
#[derive(Clone, Copy, Debug)]
pub struct GenerationRequest<'a> {
    /// The component whose module is generated.
    pub component: &'a Component,
    /// The design implementing the component, for hierarchical generation.
    pub design: Option<&'a Design>,
    /// The view selecting the component instantiation.
    pub view: Option<&'a str>,
    /// Path of the component's XML document, shown in the file header.
    pub xml_path: &'a str,
}

impl<'a> GenerationRequest<'a> {
    /// Requests the module of a component without contents.
    pub fn component(component: &'a Component) -> Self {
        Self {
            component,
            design: None,
            view: None,
            xml_path: "",
        }
    }

    /// Requests the module of a hierarchical component.
    pub fn design(component: &'a Component, design: &'a Design) -> Self {
        Self {
            design: Some(design),
            ..Self::component(component)
        }
    }

    /// Selects a view.
    pub fn with_view(mut self, view: &'a str) -> Self {
        self.view = Some(view);
        self
    }

    /// Sets the XML document path.
    pub fn with_xml_path(mut self, path: &'a str) -> Self {
        self.xml_path = path;
        self
    }
}

/// The result of a successful run.
#[derive(Debug)]
pub struct GenerationOutcome {
    /// The written file.
    pub path: PathBuf,
    /// Whether a previous implementation was carried over.
    pub preserved: bool,
    /// Why the previous file could not be preserved, if it could not.
    pub preserve_error: Option<PreserveError>,
    /// Diagnostics reported during elaboration.
    pub diagnostics: Vec<Diagnostic>,
}

/// The path of the file generated for a module.
pub fn output_path(config: &GeneratorConfig, module_name: &str) -> PathBuf {
    Path::new(&config.output.directory)
        .join(format!("{module_name}.{}", config.output.extension))
}

/// Generates the Verilog file of one component.
///
/// Model problems become diagnostics in the outcome. The file is written in
/// one piece after rendering succeeds.
pub fn generate(
    library: &dyn Library,
    config: &GeneratorConfig,
    request: &GenerationRequest<'_>,
) -> Result<GenerationOutcome, GenerateError> {
    let sink = DiagnosticSink::new();
    let ctx = ElaborationContext::new(library, &sink, config);
    let mut module = elaborate_design(&ctx, request.component, request.design, request.view)?;
    let path = output_path(config, &module.name);

    let mut preserved = false;
    let mut preserve_error = None;
    if config.output.preserve_implementation {
        match read_implementation(&path) {
            Ok(Some(text)) => {
                preserved = true;
                if !text.implementation.is_empty() {
                    module.implementation = Some(text.implementation);
                }
                if !text.post_module.is_empty() {
                    module.post_module = Some(text.post_module);
                }
            }
            Ok(None) => {}
            Err(source) => match config.output.on_preserve_failure {
                PreserveFailurePolicy::Abort => {
                    return Err(GenerateError::Preserve { path, source })
                }
                PreserveFailurePolicy::Overwrite => {
                    warn!(
                        "overwriting {} without preserving its implementation: {source}",
                        path.display()
                    );
                    preserve_error = Some(source);
                }
            },
        }
    } else {
        info!("implementation preservation disabled for {}", path.display());
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let header = FileHeader::new(file_name, request.component.vlnv.clone(), config)
        .with_description(request.component.description.clone())
        .with_xml_path(request.xml_path);
    let text = render_file(&header, &module)
        .map_err(|source| GenerateError::Write { path: path.clone(), source })?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| GenerateError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(&path, text).map_err(|source| GenerateError::Write {
        path: path.clone(),
        source,
    })?;
    info!("wrote {}", path.display());

    let diagnostics = sink.take_all();
    debug!("{} diagnostic(s) for {}", diagnostics.len(), module.name);
    Ok(GenerationOutcome {
        path,
        preserved,
        preserve_error,
        diagnostics,
    })
}

/// Renders the file header followed by the module.
pub fn render_file(header: &FileHeader, module: &GeneratedModule) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    header.write(&mut out)?;
    let mut writer = VerilogWriter::new(out);
    writer.write_module(module)?;
    Ok(writer.into_inner())
}
