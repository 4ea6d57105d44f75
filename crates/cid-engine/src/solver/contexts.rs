use cid_core::Context;

/// Every joint assignment of `variables`, the last one varying fastest.
///
/// Matches the column order of a [`cid_cpd::TabularCpd`] with these variables as evidence.
/// No variables yields the single empty context.
pub fn enumerate_contexts(variables: &[String], cardinality: &[usize]) -> Vec<Context> {
    let total: usize = cardinality.iter().product();
    let mut contexts = Vec::with_capacity(total);
    for column in 0..total {
        let mut rest = column;
        let mut context = Context::new();
        for (variable, &card) in variables.iter().zip(cardinality).rev() {
            context.insert(variable.clone(), rest % card);
            rest /= card;
        }
        contexts.push(context);
    }
    contexts
}
