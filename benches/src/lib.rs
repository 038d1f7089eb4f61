//! Shared fixtures for the codec benchmarks.

use pixcrumb_types::img::{Crumb, CrumbPlane};

/// Builds a crumb plane that mimics delta-filtered art: long zero runs
/// broken up by short bursts of literals.
pub fn sparse_plane(width_crumbs: usize, height_crumbs: usize) -> CrumbPlane {
	let rows = (0..height_crumbs)
		.map(|y| {
			(0..width_crumbs)
				.map(|x| {
					if (x * 7 + y * 13) % 23 == 0 {
						((x + y) % 15 + 1) as Crumb
					} else {
						0
					}
				})
				.collect()
		})
		.collect();
	CrumbPlane::from_rows(rows).expect("rows are rectangular")
}

/// Builds a worst-case plane with no zero runs at all.
pub fn dense_plane(width_crumbs: usize, height_crumbs: usize) -> CrumbPlane {
	let rows = (0..height_crumbs)
		.map(|y| {
			(0..width_crumbs)
				.map(|x| ((x * 5 + y * 3) % 15 + 1) as Crumb)
				.collect()
		})
		.collect();
	CrumbPlane::from_rows(rows).expect("rows are rectangular")
}
