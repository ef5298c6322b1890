//! Completion system for pipeline definitions
//!
//! Completion works by recovering from parse faults. The parser stops at the
//! first token it cannot accept and reports a fault naming what it expected;
//! recovery strategies registered for that fault shape turn it into full
//! replacement texts.
//!
//! # Architecture
//!
//! - **Registry**: ordered strategies, each declaring the fault shapes it handles
//! - **Strategies**: one per completion scenario, consulting metadata lookups
//! - **Proposal builder**: joins suggestions onto the safe prefix
//! - **Engine**: parses, dispatches, deduplicates and caps
//!
//! # Examples
//!
//! ```
//! use pipeline_complete::completion::CompletionEngine;
//! use pipeline_complete::metadata::{Catalog, Lookups};
//!
//! let lookups = Lookups::from_catalog(Catalog::builtin().unwrap());
//! let engine = CompletionEngine::standard(lookups, false).unwrap();
//!
//! let proposals = engine.complete("http --for", 0);
//! assert_eq!(proposals[0].text, "http --format.");
//! ```

mod engine;
mod forward;
mod proposal;
mod registry;
mod strategies;


pub use engine::CompletionEngine;
pub use proposal::{CompletionProposal, ProposalBuilder};
pub use registry::{RecoveryStrategy, Shape, StrategyRegistry, StrategyRegistryBuilder};
pub use strategies::{
    ComponentNameStrategy, MissingComponentStrategy, OptionGroupStrategy, OptionLeafStrategy,
    OptionMarkerStrategy, OptionValueStrategy, ResolvedComponentStrategy,
};
