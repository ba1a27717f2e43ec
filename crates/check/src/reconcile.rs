use crate::model::{Finding, SymbolSet};

/// Consumer-declared symbols the native side does not export, in the order
/// the consumer side first declared them.
pub fn reconcile(native: &SymbolSet, consumer: &SymbolSet) -> Vec<Finding> {
    difference(consumer, native)
}

/// Native exports no consumer declares. Kept separate from [`reconcile`]:
/// an unused export cannot break the consumer at load time.
pub fn unused_exports(native: &SymbolSet, consumer: &SymbolSet) -> Vec<Finding> {
    difference(native, consumer)
}

fn difference(from: &SymbolSet, minus: &SymbolSet) -> Vec<Finding> {
    from.iter()
        .filter(|decl| !minus.contains(&decl.name))
        .map(Finding::from)
        .collect()
}
