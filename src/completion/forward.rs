//! Continuations offered after a complete component
//!
//! Shared by the success path of the engine and by the strategy that
//! recognises a fully typed component name.

use super::proposal::{CompletionProposal, ProposalBuilder};
use crate::metadata::{ComponentDescriptor, Lookups};
use crate::parser::{ComponentUse, Lexer, TokenKind};

/// Close a quoted value left open at the end of `text`
///
/// Anything appended to an open literal would become part of the value, so
/// this is the only continuation offered for such input.
pub(crate) fn close_literal(text: &str) -> Option<CompletionProposal> {
    let literal = Lexer::tokenize(text)
        .into_iter()
        .rev()
        .find(|token| !token.is(TokenKind::End))
        .filter(|token| token.is_unterminated_literal())?;

    let quote = literal.raw.chars().next()?;
    let dangling_escape =
        literal.raw[quote.len_utf8()..].chars().rev().take_while(|&c| c == '\\').count() % 2 == 1;
    let suffix = if dangling_escape {
        format!("\\{quote}")
    } else {
        quote.to_string()
    };

    Some(ProposalBuilder::new(text).adjoin(&suffix, "Close the quoted value"))
}

/// Propose `|` and `--` after a component
///
/// # Arguments
/// * `prefix` - Text ending with the component or its last option
/// * `descriptor` - The resolved component
/// * `used` - Options already supplied to it
/// * `lookups` - Metadata used to count unused options
/// * `include_deprecated` - Whether deprecated options count as available
///
/// # Returns
/// * `Vec<CompletionProposal>` - Pipe unless the component is terminal, option
///   marker unless every option is used
pub(crate) fn continuations(
    prefix: &str,
    descriptor: &ComponentDescriptor,
    used: &ComponentUse,
    lookups: &Lookups,
    include_deprecated: bool,
) -> Vec<CompletionProposal> {
    let builder = ProposalBuilder::new(prefix);
    let mut proposals = Vec::new();

    if descriptor.category.accepts_downstream() {
        proposals.push(builder.separate(
            "|",
            format!("Send the output of '{}' to another component", descriptor.name),
        ));
    }

    let available = lookups
        .unused_options(descriptor, used, include_deprecated)
        .len();
    if available > 0 {
        proposals.push(builder.separate(
            "--",
            format!("Configure '{}' ({available} options available)", descriptor.name),
        ));
    }

    proposals
}
