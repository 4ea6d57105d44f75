/// Read-only view of a model, used by distributions that materialize lazily.
pub trait IModelView {
    /// Parents of `node` in graph order.
    fn parents(&self, node: &str) -> Vec<String>;

    /// Number of states of `node`, if its distribution already knows it.
    fn cardinality(&self, node: &str) -> Option<usize>;

    /// Numeric value of each state of `node`, if known.
    fn states(&self, node: &str) -> Option<Vec<f64>>;
}
