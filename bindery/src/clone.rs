use bindery_model::Bound;
use std::sync::Arc;

/// Deep copy of a bound object.
///
/// Every field is copied and shares nothing with `source`. The schema is not
/// part of the instance, so the copy keeps resolving the same shared schema
/// and its captured defaults.
pub fn clone_bound(source: &dyn Bound) -> Box<dyn Bound> {
    source.clone_box()
}

/// True when both objects resolve to the same schema instance.
pub fn shares_schema(a: &dyn Bound, b: &dyn Bound) -> bool {
    Arc::ptr_eq(&a.schema(), &b.schema())
}
