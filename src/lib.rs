//! Reader for an INI-derived configuration format with nested sections,
//! lists, maps and typed scalars.
//!
//! ```text
//! [multiplex]
//! addr = "tcp://localhost:6789"   ; comments run to the end of the line
//! ports = [6789, 6790,]
//! labels = { "env": "prod", }
//!
//! [groups.group0]
//! group = "udp://224.0.0.1:11001"
//! ```
//!
//! Input is parsed into a [`Section`] tree, which is then bound onto structs
//! deriving [`Bind`]:
//!
//! ```
//! use ini_cfg::{Bind, IniConfig};
//!
//! #[derive(Debug, Default, Bind)]
//! struct Group {
//!     group: String,
//! }
//!
//! #[derive(Debug, Default, Bind)]
//! struct Multiplex {
//!     addr: String,
//!     groups: Vec<Group>,
//! }
//!
//! let input = r#"
//! [multiplex]
//! addr = "tcp://localhost:6789"
//! [groups.group0]
//! group = "udp://224.0.0.1:11001"
//! "#;
//!
//! let mut m = Multiplex::default();
//! IniConfig::from_str(input, "multiplex")?.read(&mut m)?;
//! assert_eq!(m.groups[0].group, "udp://224.0.0.1:11001");
//! # Ok::<(), ini_cfg::ConfigError>(())
//! ```

extern crate self as ini_cfg;

pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Section, Value};
pub use config::{bind, bind_section, parse, parse_reader, Bind, Binder, IniConfig, Setting, Shape};
pub use error::{ConfigError, Result};
pub use ini_cfg_derive::Bind;
