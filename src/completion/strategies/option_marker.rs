//! Completes a single `-` into the option marker

use crate::completion::proposal::{CompletionProposal, ProposalBuilder};
use crate::completion::registry::{RecoveryStrategy, Shape};
use crate::metadata::Lookups;
use crate::parser::{FaultKind, ParseFault, TokenKind};

/// Turns a lone `-` into `--` without consulting metadata
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionMarkerStrategy;

impl RecoveryStrategy for OptionMarkerStrategy {
    fn name(&self) -> &'static str {
        "option-marker"
    }

    fn shapes(&self) -> &[Shape] {
        const SHAPES: &[Shape] = &[Shape::new(
            FaultKind::UnfinishedOptionMarker,
            &[TokenKind::Unknown],
        )];
        SHAPES
    }

    fn propose(&self, fault: &ParseFault, _: &Lookups, _: usize) -> Vec<CompletionProposal> {
        let builder = ProposalBuilder::new(fault.safe_prefix());
        vec![builder.separate("--", "Start an option")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Catalog;
    use crate::parser::Parser;

    #[test]
    fn test_dash_becomes_marker() {
        let lookups = Lookups::from_catalog(Catalog::new());
        for input in ["http -", "http --port=1 -", "http | log    -"] {
            let fault = Parser::parse(input).unwrap_err();
            let proposals = OptionMarkerStrategy.propose(&fault, &lookups, 0);
            assert_eq!(proposals.len(), 1);
            assert_eq!(proposals[0].text, format!("{} --", fault.safe_prefix()));
        }
    }
}
