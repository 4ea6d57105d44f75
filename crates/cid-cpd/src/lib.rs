//! # cid-cpd
//!
//! Conditional probability distributions attached to influence diagram nodes, and the
//! factor arithmetic inference runs on.
//!
//! [`Distribution`] is a closed sum over the supported variants. Placeholder and
//! functional distributions are *materializable*: they compute their table lazily from
//! an [`IModelView`] once their parents are known.

pub mod continuous;
pub mod distribution;
pub mod factor;
pub mod functional;
pub mod placeholder;
pub mod tabular;
pub mod view;

pub use continuous::ContinuousCpd;
pub use distribution::{Distribution, DistributionKind};
pub use factor::Factor;
pub use functional::{FunctionalCpd, ParentValues, PolicyFn};
pub use placeholder::PlaceholderCpd;
pub use tabular::TabularCpd;
pub use view::IModelView;
