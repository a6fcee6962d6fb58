//! Client-side data model: identifiers, roles, configuration and the
//! server-defined records rendered by the views.

mod config;
mod identity;
mod ids;
mod records;

pub use self::config::*;
pub use self::identity::*;
pub use self::ids::*;
pub use self::records::*;
