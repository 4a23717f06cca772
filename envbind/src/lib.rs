//! Bind environment variables onto nested, typed configuration structs
//!
//! `envbind` walks a struct tree depth-first and fills every field from a flat
//! [`Snapshot`] of environment variables. Each field's variable name is built
//! from a **prefix path** (one upper-cased segment per enclosing struct) and the
//! field's `#[env("...")]` tag, so nested configuration maps naturally onto
//! `APP_DATABASE_HOST`-style names.
//!
//! # Features
//!
//! - **Declarative**: Automatic implementation with `#[derive(EnvBind)]`
//! - **Prefix paths**: Nested and optional sub-structs extend the variable name
//! - **Candidate names**: Several variable names per field, first present wins
//! - **Defaults and required fields**: Declared inline in the tag
//! - **Rich values**: Booleans, integers, floats, durations (`1h30m`), lists
//!   (`a,b,c`) and maps (`k1=v1;k2=v2`)
//! - **Explicit input**: The binder reads a [`Snapshot`], never the process
//!   environment directly; `.env` files and templates build on the same type
//!
//! # Example
//!
//! ```rust
//! use envbind::{EnvBind, Options, Snapshot};
//!
//! #[derive(Debug, Default, EnvBind)]
//! struct Root {
//!     #[env("PORT,default=8080")]
//!     pub port: u16,
//!
//!     #[env("NAME,required=true")]
//!     pub name: String,
//! }
//!
//! # fn main() -> Result<(), envbind::BindError> {
//! let env: Snapshot = [("ROOT_NAME", "svc")].into_iter().collect();
//! let config = Root::from_snapshot(&env, &Options::default())?;
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.name, "svc");
//!
//! let err = Root::from_snapshot(&Snapshot::new(), &Options::default()).unwrap_err();
//! assert_eq!(err.name(), "ROOT_NAME");
//! # Ok(())
//! # }
//! ```
//!
//! # Tags
//!
//! `#[env("NAME1,NAME2,default=value,required=true")]`
//!
//! - Tokens without `=` are candidate names, tried in order
//! - `default=...` is used when no candidate is present
//! - `required=true` fails when no candidate is present, even with a default
//! - Without a tag (or without candidate names) the field name upper-cased is used
//!
//! A present variable always wins over the default, even when it is empty.
//!
//! # Prefix paths
//!
//! ```rust
//! use envbind::{EnvBind, Options, Snapshot};
//!
//! #[derive(Debug, Default, EnvBind)]
//! struct Database {
//!     #[env("HOST,default=localhost")]
//!     pub host: String,
//! }
//!
//! #[derive(Debug, Default, EnvBind)]
//! #[env(prefix = "APP")]
//! struct Config {
//!     pub database: Database,
//!     pub replica: Option<Database>,
//! }
//!
//! let env: Snapshot = [("APP_DATABASE_HOST", "db")].into_iter().collect();
//! let config = Config::from_snapshot(&env, &Options::default()).unwrap();
//! assert_eq!(config.database.host, "db");
//! // Optional sub-structs are always materialized
//! assert_eq!(config.replica.unwrap().host, "db");
//!
//! let config = Config::from_snapshot(
//!     &[("DATABASE_HOST", "local")].into_iter().collect(),
//!     &Options::default().ignore_prefix(true),
//! )
//! .unwrap();
//! assert_eq!(config.database.host, "local");
//! ```
//!
//! The segment a struct contributes is its type name, or `prefix` when given.
//!
//! # Field types
//!
//! Every field must implement [`BindField`]. A field the binder cannot fill is
//! a compile error rather than a silently skipped field, e.g. an optional
//! scalar:
//!
//! ```compile_fail
//! use envbind::EnvBind;
//!
//! #[derive(Default, EnvBind)]
//! struct Config {
//!     #[env("PORT")]
//!     pub port: Option<u32>,
//! }
//! ```
//!
//! or a type without a [`Coerce`] grammar:
//!
//! ```compile_fail
//! use envbind::EnvBind;
//! use std::path::PathBuf;
//!
//! #[derive(Default, EnvBind)]
//! struct Config {
//!     #[env("DATA_DIR")]
//!     pub data_dir: PathBuf,
//! }
//! ```

pub mod bind;
pub mod coerce;
pub mod dotenv;
mod error;
mod snapshot;
pub mod tag;
pub mod template;

pub use bind::{bind, BindField, Binder, EnvBind, FieldDescriptor, Options};
pub use coerce::Coerce;
pub use envbind_derive::EnvBind;
pub use error::{BindError, CoerceError, DotenvError, TemplateError};
pub use snapshot::Snapshot;
pub use tag::Tag;
