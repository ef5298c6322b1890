//! Built-in recovery strategies, one per completion scenario
//!
//! Strategies are stateless apart from their policy flags. They read the fault
//! and the metadata lookups and never fail: anything they cannot resolve
//! simply yields no proposals.

mod component;
mod option_marker;
mod option_name;
mod option_value;

pub use component::{ComponentNameStrategy, MissingComponentStrategy, ResolvedComponentStrategy};
pub use option_marker::OptionMarkerStrategy;
pub use option_name::{OptionGroupStrategy, OptionLeafStrategy};
pub use option_value::OptionValueStrategy;

use crate::metadata::{ComponentDescriptor, Lookups};
use crate::parser::{ComponentUse, ParseFault, Token, TokenKind};

/// Maximum number of proposals for a detail level; 0 means unlimited
fn limit(detail_level: usize) -> usize {
    match detail_level {
        0 => usize::MAX,
        n => n,
    }
}

/// Last token before the end of input
fn last_significant(fault: &ParseFault) -> Option<&Token> {
    fault.tokens().iter().rev().find(|t| !t.is(TokenKind::End))
}

/// The component whose options are being typed, resolved at its position
fn configured_component<'a>(
    fault: &'a ParseFault,
    lookups: &Lookups,
) -> Option<(ComponentDescriptor, &'a ComponentUse)> {
    let used = fault.definition().last()?;
    let descriptor = lookups.resolve_last(fault.definition())?;
    Some((descriptor, used))
}
