//! Admissibility predicates: the class allow-list and back-reference eligibility.
//!
//! ## Menu
//!
//! - [`Whitelist`]: the pluggable allow-list capability.
//!     - [`AllWhitelist`]: lists every class.
//!     - [`EmptyWhitelist`]: lists nothing, only marked classes pass.
//!     - [`ListedWhitelist`]: an explicit set of class names, loadable through serde.
//! - [`WhitelistPolicy`]: the whitelist decision, combining the allow-list with
//!   the inheritable serializable marker.
//! - [`reference_eligible`]: whether instances may be written as back-references.

// -----------------------------------------------------------------------------
// Modules

mod listed;
mod reference;
mod whitelist;

// -----------------------------------------------------------------------------
// Exports

pub use listed::ListedWhitelist;
pub use reference::reference_eligible;
pub use whitelist::{AllWhitelist, EmptyWhitelist, Whitelist, WhitelistPolicy};
