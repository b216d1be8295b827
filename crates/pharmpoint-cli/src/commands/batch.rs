use crate::cli::BatchArgs;
use crate::config::{CliOverrides, PartialPipelineConfig};
use crate::error::{CliError, Result};
use crate::manifest::BatchManifest;
use crate::utils::progress::batch_progress_bar;
use pharmpoint::engine::config::PipelineConfig;
use pharmpoint::engine::error::EngineError;
use pharmpoint::engine::progress::ProgressReporter;
use pharmpoint::workflows::{self, derive::PharmacophoreModel};
use rayon::prelude::*;
use tracing::{error, info, info_span};

pub fn run(args: BatchArgs) -> Result<()> {
    let manifest = BatchManifest::from_file(&args.manifest)?;
    let partial_config = PartialPipelineConfig::load(args.parameters.config.as_deref())?;
    let parameters =
        partial_config.merge_with_cli(&args.parameters, &CliOverrides::default())?;

    let jobs = manifest
        .targets
        .into_iter()
        .map(|target| Ok((target.name, parameters.to_config(target.paths)?)))
        .collect::<Result<Vec<(String, PipelineConfig)>>>()?;
    let total = jobs.len();
    info!(targets = total, "Loaded batch manifest.");

    println!("Deriving pharmacophores for {} target(s)...", total);
    let pb = batch_progress_bar(total);

    let outcomes: Vec<(&str, std::result::Result<PharmacophoreModel, EngineError>)> = jobs
        .par_iter()
        .map(|(name, config)| {
            let _span = info_span!("target", name = name.as_str()).entered();
            let outcome = workflows::derive::run(config, &ProgressReporter::new());
            match &outcome {
                Ok(model) => pb.println(format!(
                    "  ✓ {}: {} ligand feature(s), {} exclusion sphere(s) -> {}",
                    name,
                    model.ligand_features.len(),
                    model.exclusion_features.len(),
                    config.output_path.display()
                )),
                Err(e) => {
                    error!(target_name = name.as_str(), "Target failed: {}", e);
                    pb.println(format!("  ✗ {}: {}", name, e));
                }
            }
            pb.inc(1);
            (name.as_str(), outcome)
        })
        .collect();
    pb.finish_and_clear();

    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|(_, outcome)| outcome.is_err())
        .map(|(name, _)| *name)
        .collect();

    if failed.is_empty() {
        println!("✓ All {} target(s) completed.", total);
        Ok(())
    } else {
        error!(failed = ?failed, "Batch finished with failures.");
        Err(CliError::Batch {
            failed: failed.len(),
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ParameterArgs;
    use std::fs;
    use tempfile::tempdir;

    const DONOR_SDF: &str = "\
donor
     RDKit          3D

  2  1  0  0  0  0  0  0  0  0999 V2000
    1.0000    1.0000    1.0000 N   0  0  0  0  0  0  0  0  0  0  0  0
    1.5000    1.0000    1.0000 H   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
M  END
> <CLUSTER_SIZE>
4

$$$$
";

    const SITE_PDB: &str = "\
ATOM      1  CA  ALA A   1      11.639   6.071  -5.147  1.00  0.00           C
END
";

    fn write_target(dir: &std::path::Path, name: &str, site: &str) {
        let target_dir = dir.join(name);
        fs::create_dir_all(&target_dir).unwrap();
        fs::write(target_dir.join("rings.sdf"), "").unwrap();
        fs::write(target_dir.join("donors.sdf"), DONOR_SDF).unwrap();
        fs::write(target_dir.join("acceptors.sdf"), "").unwrap();
        fs::write(target_dir.join("site.pdb"), site).unwrap();
    }

    fn manifest_entry(name: &str) -> String {
        format!(
            "[[target]]\nname = \"{0}\"\nrings = \"{0}/rings.sdf\"\ndonors = \"{0}/donors.sdf\"\n\
             acceptors = \"{0}/acceptors.sdf\"\nsite = \"{0}/site.pdb\"\noutput = \"{0}.json\"\n\n",
            name
        )
    }

    fn batch_args(manifest: std::path::PathBuf) -> BatchArgs {
        BatchArgs {
            manifest,
            parameters: ParameterArgs::default(),
        }
    }

    #[test]
    fn every_target_writes_its_session() {
        let dir = tempdir().unwrap();
        write_target(dir.path(), "alpha", SITE_PDB);
        write_target(dir.path(), "beta", SITE_PDB);
        let manifest = dir.path().join("targets.toml");
        fs::write(
            &manifest,
            [manifest_entry("alpha"), manifest_entry("beta")].concat(),
        )
        .unwrap();

        run(batch_args(manifest)).unwrap();

        for name in ["alpha", "beta"] {
            let content = fs::read_to_string(dir.path().join(format!("{}.json", name))).unwrap();
            assert!(content.contains("HydrogenDonor"));
            assert!(content.contains("ExclusionSphere"));
        }
    }

    #[test]
    fn one_failing_target_fails_the_batch_but_not_the_others() {
        let dir = tempdir().unwrap();
        write_target(dir.path(), "good", SITE_PDB);
        write_target(
            dir.path(),
            "bad",
            "ATOM      1 ZN   ZN  A   1      11.639   6.071  -5.147  1.00  0.00          ZN\n",
        );
        let manifest = dir.path().join("targets.toml");
        fs::write(
            &manifest,
            [manifest_entry("good"), manifest_entry("bad")].concat(),
        )
        .unwrap();

        let result = run(batch_args(manifest));

        assert!(matches!(
            result,
            Err(CliError::Batch {
                failed: 1,
                total: 2
            })
        ));
        assert!(dir.path().join("good.json").exists());
        assert!(!dir.path().join("bad.json").exists());
    }
}
