use graphseg_core::WeightedEdge;

/// Builds edges from `(source, target, weight)` triples.
#[must_use]
pub fn edges(raw: &[(usize, usize, f64)]) -> Vec<WeightedEdge> {
    raw.iter()
        .map(|&(source, target, weight)| WeightedEdge::new(source, target, weight))
        .collect()
}

/// Returns the raw label values of a segmentation.
#[must_use]
pub fn label_values(segmentation: &graphseg_core::Segmentation) -> Vec<usize> {
    segmentation.labels().iter().map(|id| id.get()).collect()
}
