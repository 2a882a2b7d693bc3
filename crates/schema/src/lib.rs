//! forecast-app domain types and validation schemas
//!
//! Every entity and payload exchanged with the forecast-app backend, together
//! with a declarative [`Schema`] used to validate data crossing the network
//! boundary.

pub mod clothing;
pub mod error;
pub mod fashion;
pub mod location;
pub mod outfit;
pub mod schema;
pub mod user;
pub mod weather;

pub use clothing::*;
pub use error::{ValidationError, ValidationErrors, ValidationResult};
pub use fashion::*;
pub use location::Location;
pub use outfit::*;
pub use schema::{check, parse, Field, NumberRules, Schema, StringRules, Validated};
pub use user::*;
pub use weather::*;
