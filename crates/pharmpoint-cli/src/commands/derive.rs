use crate::cli::DeriveArgs;
use crate::config::{CliOverrides, InputPaths, PartialPipelineConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pharmpoint::{engine::progress::ProgressReporter, workflows};
use tracing::{info, warn};

pub fn run(args: DeriveArgs) -> Result<()> {
    let partial_config = PartialPipelineConfig::load(args.parameters.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let parameters = partial_config.merge_with_cli(&args.parameters, &CliOverrides::from(&args))?;

    let config = parameters.to_config(InputPaths {
        rings: args.rings,
        donors: args.donors,
        acceptors: args.acceptors,
        site: args.site,
        output: args.output,
    })?;
    info!(
        threshold = config.merge_threshold,
        selection = ?config.selection,
        "Resolved pipeline parameters."
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Deriving pharmacophore...");
    let model = workflows::derive::run(&config, &reporter)?;

    if model.ligand_features.is_empty() {
        warn!("No ligand features were derived; the session holds exclusion spheres only.");
        println!("Warning: no ligand features were derived.");
    }

    println!(
        "✓ {} ligand feature(s) and {} exclusion sphere(s) written to: {}",
        model.ligand_features.len(),
        model.exclusion_features.len(),
        config.output_path.display()
    );
    for (rank, feature) in model.ligand_features.iter().enumerate() {
        let position = feature.position();
        println!(
            "  {:>2}. {:<11} ({:>8.3}, {:>8.3}, {:>8.3})  weight {:.1}",
            rank + 1,
            feature.kind(),
            position.x,
            position.y,
            position.z,
            feature.weight()
        );
    }

    Ok(())
}
