//! Verilog-2001 output for elaborated IP-XACT components.
//!
//! A [`GeneratedModule`](kactus_ir::GeneratedModule) is written below a fixed
//! file header. Everything after the merge marker in a previously generated
//! file is read back by the [`preserve`] module and carried into the new file,
//! so regenerating never loses hand-written code.
//!
//! [`generate`] runs one component end to end; [`generate_all`] runs several
//! in parallel.

#![warn(missing_docs)]

pub mod batch;
pub mod header;
pub mod output;
pub mod preserve;
pub mod syntax;
pub mod writer;

pub use batch::generate_all;
pub use header::FileHeader;
pub use output::{generate, output_path, GenerateError, GenerationOutcome, GenerationRequest};
pub use preserve::{extract_implementation, read_implementation, PreserveError, PreservedText};
pub use writer::{render_module, VerilogWriter};
