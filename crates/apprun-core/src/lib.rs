//! Support library for the bundle launchers.
//!
//! # Architecture
//!
//! Everything up to the final `execv` is pure: the bundle root is resolved into
//! a [`BundleContext`], the environment is composed through the
//! [`Environment`] trait and the argument vector is captured in a
//! [`LaunchPlan`]. Only [`LaunchPlan::exec`] touches the process image.
//!
//! # Example
//!
//! ```
//! use apprun_core::{BundleContext, Environment, LaunchPlan, MemoryEnv, env, vars};
//!
//! let bundle = BundleContext::new("/opt/bundle".into(), None).unwrap();
//! let mut environment = MemoryEnv::new().with("PATH", "/usr/bin");
//!
//! env::prepend_search_path(&mut environment, vars::PATH, &bundle.tool_dir());
//! assert_eq!(
//!     environment.var("PATH").unwrap(),
//!     "/opt/bundle/fakebin:/usr/bin"
//! );
//!
//! let plan = LaunchPlan::new(&bundle.tool("ninja")).unwrap();
//! assert_eq!(plan.program(), bundle.tool("ninja"));
//! ```

pub use bundle::{BundleContext, absolute, resolve_invoking_image, resolve_self};
pub use env::{Environment, MemoryEnv, ProcessEnv};
pub use error::{Error, Result, report};
pub use log::Verbosity;
pub use plan::LaunchPlan;

pub mod bundle;
pub mod env;
mod error;
pub mod layout;
pub mod log;
mod plan;
pub mod vars;
