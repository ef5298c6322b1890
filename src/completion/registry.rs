//! Recovery strategy registry
//!
//! Each strategy declares the fault shapes it handles: a fault kind plus the
//! token kinds that must end the input. The registry is assembled once,
//! validated, and only read afterwards.

use std::collections::HashSet;

use super::proposal::CompletionProposal;
use super::strategies::{
    ComponentNameStrategy, MissingComponentStrategy, OptionGroupStrategy, OptionLeafStrategy,
    OptionMarkerStrategy, OptionValueStrategy, ResolvedComponentStrategy,
};
use crate::error::RegistrationError;
use crate::metadata::Lookups;
use crate::parser::{FaultKind, ParseFault, TokenKind};

/// A fault kind together with the trailing token kinds it must show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub fault: FaultKind,
    /// Trailing significant token kinds, oldest first; empty matches any tail
    pub fingerprint: &'static [TokenKind],
}

impl Shape {
    pub const fn new(fault: FaultKind, fingerprint: &'static [TokenKind]) -> Self {
        Self { fault, fingerprint }
    }

    /// Check whether a fault has this shape
    pub fn matches(&self, fault: &ParseFault) -> bool {
        fault.kind() == self.fault && fault.ends_with(self.fingerprint)
    }
}

/// Turns one kind of parse fault into completion proposals
pub trait RecoveryStrategy: Send + Sync {
    /// Unique name, used in logs and for duplicate detection
    fn name(&self) -> &'static str;

    /// Fault shapes this strategy handles
    fn shapes(&self) -> &[Shape];

    /// Produce proposals for a fault with one of this strategy's shapes
    ///
    /// # Arguments
    /// * `fault` - The fault that stopped parsing
    /// * `lookups` - Component and option metadata
    /// * `detail_level` - Maximum number of proposals; 0 means unlimited
    ///
    /// # Returns
    /// * `Vec<CompletionProposal>` - Proposals, empty when metadata is missing
    fn propose(
        &self,
        fault: &ParseFault,
        lookups: &Lookups,
        detail_level: usize,
    ) -> Vec<CompletionProposal>;
}

/// Ordered, read-only list of recovery strategies
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn RecoveryStrategy>>,
}

impl StrategyRegistry {
    pub fn builder() -> StrategyRegistryBuilder {
        StrategyRegistryBuilder::default()
    }

    /// Registry holding every built-in strategy in dispatch order
    ///
    /// # Arguments
    /// * `include_deprecated` - Whether option strategies offer deprecated options
    pub fn standard(include_deprecated: bool) -> Result<Self, RegistrationError> {
        Self::builder()
            .register(ComponentNameStrategy)
            .register(ResolvedComponentStrategy::new(include_deprecated))
            .register(MissingComponentStrategy)
            .register(OptionMarkerStrategy)
            .register(OptionLeafStrategy::new(include_deprecated))
            .register(OptionGroupStrategy::new(include_deprecated))
            .register(OptionValueStrategy::new(include_deprecated))
            .build()
    }

    /// Strategies with a shape matching the fault, in registration order
    pub fn matching<'a>(
        &'a self,
        fault: &'a ParseFault,
    ) -> impl Iterator<Item = &'a dyn RecoveryStrategy> + 'a {
        self.strategies
            .iter()
            .map(Box::as_ref)
            .filter(move |strategy| strategy.shapes().iter().any(|shape| shape.matches(fault)))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}

/// Collects strategies and validates them into a [`StrategyRegistry`]
#[derive(Default)]
pub struct StrategyRegistryBuilder {
    strategies: Vec<Box<dyn RecoveryStrategy>>,
}

impl StrategyRegistryBuilder {
    /// Append a strategy; dispatch follows registration order
    pub fn register<S: RecoveryStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Validate every registration
    ///
    /// # Returns
    /// * `Result<StrategyRegistry, RegistrationError>` - The registry, or the first malformed registration
    pub fn build(self) -> Result<StrategyRegistry, RegistrationError> {
        let mut names = HashSet::new();

        for strategy in &self.strategies {
            let name = strategy.name();
            if !names.insert(name) {
                return Err(RegistrationError::DuplicateStrategy(name.to_string()));
            }
            if strategy.shapes().is_empty() {
                return Err(RegistrationError::NoShapes {
                    strategy: name.to_string(),
                });
            }
            for shape in strategy.shapes() {
                validate_shape(name, shape)?;
            }
        }

        Ok(StrategyRegistry {
            strategies: self.strategies,
        })
    }
}

fn validate_shape(strategy: &str, shape: &Shape) -> Result<(), RegistrationError> {
    if shape.fingerprint.contains(&TokenKind::End) {
        return Err(RegistrationError::EndInFingerprint {
            strategy: strategy.to_string(),
        });
    }

    // An empty fingerprint matches any tail
    if let (Some(expected), Some(last)) = (shape.fault.terminal_kind(), shape.fingerprint.last())
        && *last != expected
    {
        return Err(RegistrationError::UnreachableShape {
            strategy: strategy.to_string(),
            fault: shape.fault.to_string(),
            expected: expected.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    struct Fixed {
        name: &'static str,
        shapes: Vec<Shape>,
    }

    impl RecoveryStrategy for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn shapes(&self) -> &[Shape] {
            &self.shapes
        }

        fn propose(&self, _: &ParseFault, _: &Lookups, _: usize) -> Vec<CompletionProposal> {
            vec![CompletionProposal::new(self.name, "")]
        }
    }

    fn fixed(name: &'static str, shapes: &[Shape]) -> Fixed {
        Fixed {
            name,
            shapes: shapes.to_vec(),
        }
    }

    fn fault_of(input: &str) -> ParseFault {
        Parser::parse(input).unwrap_err()
    }

    #[test]
    fn test_standard_registry_is_valid() {
        let registry = StrategyRegistry::standard(false).unwrap();
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.names()[0], "component-name");
    }

    #[test]
    fn test_matching_uses_kind_and_fingerprint() {
        let registry = StrategyRegistry::builder()
            .register(fixed(
                "after-dot",
                &[Shape::new(FaultKind::UnfinishedOptionName, &[TokenKind::Dot])],
            ))
            .register(fixed(
                "after-ident",
                &[Shape::new(FaultKind::UnfinishedOptionName, &[TokenKind::Identifier])],
            ))
            .build()
            .unwrap();

        let fault = fault_of("http --format.");
        let names: Vec<_> = registry.matching(&fault).map(|s| s.name()).collect();
        assert_eq!(names, vec!["after-dot"]);

        let fault = fault_of("http --form");
        let names: Vec<_> = registry.matching(&fault).map(|s| s.name()).collect();
        assert_eq!(names, vec!["after-ident"]);
    }

    #[test]
    fn test_all_matching_strategies_fire_in_order() {
        let shape = Shape::new(FaultKind::TrailingPipe, &[TokenKind::Pipe]);
        let registry = StrategyRegistry::builder()
            .register(fixed("first", &[shape]))
            .register(fixed("second", &[shape]))
            .build()
            .unwrap();

        let fault = fault_of("http |");
        let names: Vec<_> = registry.matching(&fault).map(|s| s.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_empty_fingerprint_matches_any_tail() {
        let registry = StrategyRegistry::builder()
            .register(fixed("any", &[Shape::new(FaultKind::MissingComponent, &[])]))
            .build()
            .unwrap();
        assert_eq!(registry.matching(&fault_of("")).count(), 1);
        assert_eq!(registry.matching(&fault_of("http | | log")).count(), 1);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let shape = Shape::new(FaultKind::TrailingPipe, &[TokenKind::Pipe]);
        let result = StrategyRegistry::builder()
            .register(fixed("twice", &[shape]))
            .register(fixed("twice", &[shape]))
            .build();
        assert_eq!(
            result.unwrap_err(),
            RegistrationError::DuplicateStrategy("twice".to_string())
        );
    }

    #[test]
    fn test_rejects_strategy_without_shapes() {
        let result = StrategyRegistry::builder().register(fixed("idle", &[])).build();
        assert!(matches!(result, Err(RegistrationError::NoShapes { .. })));
    }

    #[test]
    fn test_rejects_end_in_fingerprint() {
        let result = StrategyRegistry::builder()
            .register(fixed(
                "ends",
                &[Shape::new(FaultKind::MissingComponent, &[TokenKind::End])],
            ))
            .build();
        assert!(matches!(result, Err(RegistrationError::EndInFingerprint { .. })));
    }

    #[test]
    fn test_rejects_unreachable_shape() {
        let result = StrategyRegistry::builder()
            .register(fixed(
                "wrong-tail",
                &[Shape::new(FaultKind::TrailingPipe, &[TokenKind::Identifier])],
            ))
            .build();
        assert!(matches!(result, Err(RegistrationError::UnreachableShape { .. })));
    }
}
