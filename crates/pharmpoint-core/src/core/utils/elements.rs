use phf::{Map, phf_map};

/// Van der Waals radii in Angstroms, keyed by the element symbol found in site structures.
///
/// `O1` and `N1` cover element fields that carry a trailing charge digit.
static VDW_RADII: Map<&'static str, f64> = phf_map! {
    "C" => 1.70,
    "O" => 1.52,
    "O1" => 1.52,
    "S" => 1.80,
    "N" => 1.55,
    "N1" => 1.55,
    "H" => 1.20,
};

/// Looks up the van der Waals radius for an element symbol.
///
/// Returns `None` for symbols outside the table; callers decide whether that is fatal.
#[inline]
pub fn vdw_radius(symbol: &str) -> Option<f64> {
    VDW_RADII.get(symbol).copied()
}
