//! Core of omafed: turns an Ubuntu-flavoured script repository into a Fedora one.
//!
//! The crate has two halves that share the `Item` model:
//!
//! - **Selection**: `selector::ListState` is a pure state machine for browsing
//!   and multi-selecting discovered scripts in a scrolling window.
//! - **Rewriting**: `discovery` lists the scripts of a tree, and
//!   `rewriter::Rewriter` applies the apt-to-dnf `rules::RuleSet` to every
//!   script, one file at a time.
//!
//! `acquire` fetches the script repository in the first place.

pub mod acquire;
pub mod discovery;
pub mod errors;
pub mod rewriter;
pub mod rules;
pub mod script;
pub mod selector;

pub use acquire::{Acquirer, GitAcquirer, DEFAULT_REPO_URL};
pub use discovery::{discover, find_named};
pub use errors::{ConvertError, RewriteError, SelectionError};
pub use rewriter::{FileOutcome, RewriteReport, Rewriter};
pub use rules::{ReplacementRule, RuleSet};
pub use script::{Item, ScriptFilter, DEFAULT_SCRIPT_SUFFIX};
pub use selector::{Direction, ListState, ListView, Phase, SelectorEvent, DEFAULT_WINDOW_SIZE};
