use crate::core::io::pdb::SiteFile;
use crate::core::io::sdf::ClusterFile;
use crate::core::io::session::SessionFile;
use crate::core::io::traits::RecordFile;
use crate::core::models::cluster::{AtomRecord, Cluster};
use crate::core::models::feature::{Feature, InteractionKind};
use crate::engine::config::PipelineConfig;
use crate::engine::error::EngineError;
use crate::engine::exclusion::extract_exclusion_features;
use crate::engine::ingestion::ingest_clusters;
use crate::engine::merge::merge_nearby_features;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{debug, info, instrument};

/// The outcome of a derivation: ranked ligand features and the site's exclusion spheres.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PharmacophoreModel {
    pub ligand_features: Vec<Feature>,
    pub exclusion_features: Vec<Feature>,
}

impl PharmacophoreModel {
    /// Ligand features first, exclusion spheres last, each group in its own order.
    pub fn ordered_features(&self) -> Vec<Feature> {
        self.ligand_features
            .iter()
            .chain(&self.exclusion_features)
            .cloned()
            .collect()
    }

    pub fn total_features(&self) -> usize {
        self.ligand_features.len() + self.exclusion_features.len()
    }
}

/// Sorts features by weight, heaviest first. Equal weights keep their relative order.
pub fn rank_by_weight(features: &mut [Feature]) {
    features.sort_by(|a, b| b.weight().total_cmp(&a.weight()));
}

/// Derives a pharmacophore from three cluster groups and the binding-site atoms.
///
/// The ligand clusters are ingested per kind, merged together with `threshold`, and ranked by
/// weight. Site atoms become exclusion spheres that never take part in merging. The two
/// sequences are returned separately, ligand features first.
///
/// # Errors
///
/// Fails on the first malformed cluster, an invalid threshold, or a site atom whose element
/// has no known radius.
#[instrument(skip_all, name = "derive_pharmacophore", fields(threshold = threshold))]
pub fn derive_pharmacophore(
    ring_clusters: &[Cluster],
    donor_clusters: &[Cluster],
    acceptor_clusters: &[Cluster],
    site_atoms: &[AtomRecord],
    threshold: f64,
) -> Result<(Vec<Feature>, Vec<Feature>), EngineError> {
    let mut ligand = ingest_clusters(InteractionKind::Hydrophobic, ring_clusters)?;
    ligand.extend(ingest_clusters(InteractionKind::Donor, donor_clusters)?);
    ligand.extend(ingest_clusters(InteractionKind::Acceptor, acceptor_clusters)?);
    let ingested = ligand.len();

    let mut merged = merge_nearby_features(&ligand, threshold)?;
    rank_by_weight(&mut merged);

    let exclusion = extract_exclusion_features(site_atoms)?;

    info!(
        ingested,
        ligand = merged.len(),
        exclusion = exclusion.len(),
        "Derived pharmacophore features."
    );
    Ok((merged, exclusion))
}

fn read_clusters(kind: InteractionKind, path: &Path) -> Result<Vec<Cluster>, EngineError> {
    let clusters = ClusterFile::new(kind)
        .read_from_path(path)
        .map_err(|source| EngineError::ClusterFile {
            path: path.display().to_string(),
            source,
        })?;
    debug!(%kind, path = %path.display(), count = clusters.len(), "Read cluster file.");
    Ok(clusters)
}

/// Runs the full file-to-file derivation described by `config`.
///
/// Reads the three cluster files and the site structure, derives the features, applies the
/// configured selection strategy (if any) and re-ranks its output, then writes ligand
/// features followed by exclusion spheres to the session file.
#[instrument(skip_all, name = "derive_workflow")]
pub fn run(
    config: &PipelineConfig,
    reporter: &ProgressReporter,
) -> Result<PharmacophoreModel, EngineError> {
    // === Phase 1: Read inputs ===
    reporter.report(Progress::PhaseStart {
        name: "Reading inputs",
    });
    let rings = read_clusters(InteractionKind::Hydrophobic, &config.clusters.rings)?;
    let donors = read_clusters(InteractionKind::Donor, &config.clusters.donors)?;
    let acceptors = read_clusters(InteractionKind::Acceptor, &config.clusters.acceptors)?;
    let site_atoms = SiteFile
        .read_from_path(&config.site_path)
        .map_err(|source| EngineError::SiteFile {
            path: config.site_path.display().to_string(),
            source,
        })?;
    debug!(count = site_atoms.len(), "Read site structure.");
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Derive and select ===
    reporter.report(Progress::PhaseStart {
        name: "Deriving features",
    });
    let (mut ligand_features, exclusion_features) = derive_pharmacophore(
        &rings,
        &donors,
        &acceptors,
        &site_atoms,
        config.merge_threshold,
    )?;

    if let Some(selection) = &config.selection {
        let strategy = selection.build(config.merge_threshold)?;
        reporter.report(Progress::Message(format!(
            "Applying {} selection ({} points)",
            strategy.name(),
            selection.num_points
        )));
        ligand_features = strategy.select(&ligand_features)?;
        rank_by_weight(&mut ligand_features);
    }
    reporter.report(Progress::FeaturesDerived {
        ligand: ligand_features.len(),
        exclusion: exclusion_features.len(),
    });
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Write session ===
    reporter.report(Progress::PhaseStart {
        name: "Writing session",
    });
    let model = PharmacophoreModel {
        ligand_features,
        exclusion_features,
    };
    SessionFile::write_to_path(&model.ordered_features(), &config.output_path).map_err(
        |source| EngineError::SessionFile {
            path: config.output_path.display().to_string(),
            source,
        },
    )?;
    reporter.report(Progress::PhaseFinish);

    info!(
        output = %config.output_path.display(),
        points = model.total_features(),
        "Workflow complete."
    );
    Ok(model)
}
