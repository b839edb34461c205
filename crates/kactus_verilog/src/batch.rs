//! Parallel generation of independent modules.

use kactus_config::GeneratorConfig;
use kactus_model::Library;
use log::debug;
use rayon::prelude::*;

use crate::output::{generate, GenerateError, GenerationOutcome, GenerationRequest};

/// Generates every request in parallel.
///
/// Each run has its own diagnostic sink and shares only the read-only library
/// and configuration. Results are in request order. Requests must produce
/// distinct output files.
pub fn generate_all(
    library: &dyn Library,
    config: &GeneratorConfig,
    requests: &[GenerationRequest<'_>],
) -> Vec<Result<GenerationOutcome, GenerateError>> {
    debug!("generating {} module(s)", requests.len());
    requests
        .par_iter()
        .map(|request| generate(library, config, request))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kactus_common::Vlnv;
    use kactus_model::{Component, Direction, MemoryLibrary, Port};

    #[test]
    fn results_follow_request_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GeneratorConfig::default();
        config.output.directory = dir.path().to_string_lossy().into_owned();

        let components: Vec<Component> = (0..8)
            .map(|i| {
                let vlnv = Vlnv::new("Test", "TestLibrary", format!("Leaf{i}"), "1.0");
                let mut c = Component::new(vlnv);
                c.ports.push(Port::scalar("clk", Direction::In));
                c
            })
            .collect();
        let requests: Vec<_> = components.iter().map(GenerationRequest::component).collect();

        let results = generate_all(&MemoryLibrary::new(), &config, &requests);
        assert_eq!(results.len(), 8);
        for (i, result) in results.into_iter().enumerate() {
            let outcome = result.unwrap();
            assert_eq!(outcome.path, dir.path().join(format!("Leaf{i}.v")));
            let text = std::fs::read_to_string(&outcome.path).unwrap();
            assert!(text.contains(&format!("module Leaf{i}(")));
        }
    }
}
