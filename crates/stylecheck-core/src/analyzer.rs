//! Dispatcher that routes syntax nodes to rules.

use crate::cancellation::CancellationToken;
use crate::classification::ClassificationCache;
use crate::config::{Config, ConfigLookup, RuleConfig};
use crate::context::{Compilation, RuleContext};
use crate::diagnostics::DiagnosticDescriptor;
use crate::rule::{Rule, RuleBox, TestScope};
use crate::semantic::SemanticModel;
use crate::syntax::{
    CompilationUnit, ConstructorDecl, InvocationExpr, LocalFunctionDecl, MemberAccessExpr,
    MethodDecl, NamespaceDecl, SyntaxKind, SyntaxNode, SyntaxTree, TypeDecl,
};
use crate::types::LintResult;
use crate::visit::{self, Visit};

use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that can occur while building an analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Two rules share a diagnostic id.
    #[error("Diagnostic id {id} is registered by both {first} and {second}")]
    DuplicateRule {
        /// Conflicting diagnostic id.
        id: &'static str,
        /// Rule registered first.
        first: &'static str,
        /// Rule registered second.
        second: &'static str,
    },
}

/// One file handed to the analyzer by the host.
#[derive(Clone, Copy)]
pub struct FileInput<'a> {
    /// Parsed file.
    pub tree: &'a SyntaxTree,
    /// Symbol information for the file.
    pub semantic: &'a dyn SemanticModel,
    /// Compilation the file belongs to.
    pub compilation: &'a Compilation,
}

impl<'a> FileInput<'a> {
    /// Creates a new file input.
    #[must_use]
    pub fn new(
        tree: &'a SyntaxTree,
        semantic: &'a dyn SemanticModel,
        compilation: &'a Compilation,
    ) -> Self {
        Self {
            tree,
            semantic,
            compilation,
        }
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
    options: Option<Arc<dyn ConfigLookup>>,
    classification: Option<Arc<ClassificationCache>>,
    cancellation: Option<CancellationToken>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration. It decides which rules are enabled and, unless
    /// [`options`](Self::options) is also set, supplies the option values.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the source of per-file option values.
    #[must_use]
    pub fn options<L: ConfigLookup + 'static>(mut self, options: L) -> Self {
        self.options = Some(Arc::new(options));
        self
    }

    /// Uses a specific classification cache instead of the process-wide one.
    #[must_use]
    pub fn classification(mut self, cache: Arc<ClassificationCache>) -> Self {
        self.classification = Some(cache);
        self
    }

    /// Sets the token polled for cancellation.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Builds the analyzer.
    ///
    /// A rule is dropped when its name is disabled or when every diagnostic
    /// id it reports is disabled. Otherwise only the disabled ids are
    /// suppressed.
    ///
    /// # Errors
    ///
    /// Returns an error if two enabled rules declare the same diagnostic id.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let rules: Vec<RuleBox> = self
            .rules
            .into_iter()
            .filter(|rule| {
                let descriptors = rule.supported_diagnostics();
                let any_id_enabled = if descriptors.is_empty() {
                    config.is_rule_enabled(rule.code())
                } else {
                    descriptors.iter().any(|d| config.is_rule_enabled(d.id))
                };
                let enabled = config.is_rule_enabled(rule.name()) && any_id_enabled;
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();

        let disabled_ids: HashSet<&'static str> = rules
            .iter()
            .flat_map(|rule| rule.supported_diagnostics())
            .map(|d| d.id)
            .filter(|id| !config.is_rule_enabled(id))
            .collect();
        for id in &disabled_ids {
            debug!("Suppressing disabled diagnostic: {}", id);
        }

        let mut owners: HashMap<&'static str, &'static str> = HashMap::new();
        for rule in &rules {
            for descriptor in rule.supported_diagnostics() {
                if let Some(first) = owners.insert(descriptor.id, rule.name()) {
                    return Err(AnalyzerError::DuplicateRule {
                        id: descriptor.id,
                        first,
                        second: rule.name(),
                    });
                }
            }
        }

        let mut dispatch: HashMap<SyntaxKind, Vec<usize>> = HashMap::new();
        for (idx, rule) in rules.iter().enumerate() {
            let kinds: HashSet<SyntaxKind> = rule.triggers().iter().copied().collect();
            for kind in kinds {
                dispatch.entry(kind).or_default().push(idx);
            }
        }

        let options = self
            .options
            .unwrap_or_else(|| Arc::new(config) as Arc<dyn ConfigLookup>);

        Ok(Analyzer {
            rules,
            dispatch,
            disabled_ids,
            options,
            classification: self
                .classification
                .unwrap_or_else(ClassificationCache::shared),
            cancellation: self.cancellation.unwrap_or_default(),
        })
    }
}

/// Runs registered rules over syntax trees.
///
/// Use [`Analyzer::builder()`] to construct an instance. An analyzer is
/// immutable once built and can be shared across threads.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    dispatch: HashMap<SyntaxKind, Vec<usize>>,
    disabled_ids: HashSet<&'static str>,
    options: Arc<dyn ConfigLookup>,
    classification: Arc<ClassificationCache>,
    cancellation: CancellationToken,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Names of the registered rules in registration order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Every descriptor the registered rules can emit, keyed by id.
    #[must_use]
    pub fn supported_diagnostics(&self) -> BTreeMap<&'static str, &'static DiagnosticDescriptor> {
        self.rules
            .iter()
            .flat_map(|r| r.supported_diagnostics())
            .map(|d| (d.id, d))
            .collect()
    }

    /// Token this analyzer polls for cancellation.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Analyzes one file.
    ///
    /// Configuration is resolved once for the file. Diagnostics come back in
    /// traversal order. A cancelled run returns what was found so far.
    #[must_use]
    pub fn analyze_file(&self, input: &FileInput<'_>) -> LintResult {
        let mut result = LintResult::new();
        if self.cancellation.is_cancelled() {
            return result;
        }

        let path = input.tree.path();
        let config = RuleConfig::resolve(self.options.as_ref(), path);
        let active = self.active_rules(input, &config);
        let ctx = RuleContext::new(input.tree, input.semantic, &config, input.compilation);

        let mut collector = NodeCollector::default();
        collector.visit_compilation_unit(input.tree.root());

        for node in collector.nodes {
            if self.cancellation.is_cancelled() {
                warn!("Analysis of {} cancelled", path.display());
                break;
            }
            let Some(indices) = self.dispatch.get(&node.kind()) else {
                continue;
            };
            for &idx in indices.iter().filter(|&&idx| active[idx]) {
                match self.rules[idx].evaluate(&ctx, node) {
                    Ok(diagnostics) => result.diagnostics.extend(
                        diagnostics
                            .into_iter()
                            .filter(|d| !self.disabled_ids.contains(d.id.as_str())),
                    ),
                    Err(err) => error!("{} in {}", err, path.display()),
                }
            }
        }

        result.files_checked = 1;
        result
    }

    /// Analyzes many files in parallel and merges the results.
    #[must_use]
    pub fn analyze_files(&self, inputs: &[FileInput<'_>]) -> LintResult {
        info!(
            "Analyzing {} file(s) with {} rule(s)",
            inputs.len(),
            self.rules.len()
        );

        let results: Vec<LintResult> = inputs
            .par_iter()
            .filter_map(|input| {
                if self.cancellation.is_cancelled() {
                    return None;
                }
                Some(self.analyze_file(input))
            })
            .collect();

        let mut merged = LintResult::new();
        for result in results {
            merged.extend(result);
        }

        if self.cancellation.is_cancelled() {
            warn!(
                "Analysis cancelled after {} of {} file(s)",
                merged.files_checked,
                inputs.len()
            );
        }
        info!(
            "Found {} diagnostic(s) in {} file(s)",
            merged.diagnostics.len(),
            merged.files_checked
        );
        merged
    }

    /// Which rules run on this file after test classification.
    fn active_rules(&self, input: &FileInput<'_>, config: &RuleConfig) -> Vec<bool> {
        self.rules
            .iter()
            .map(|rule| {
                if !config.exclude_tests() {
                    return true;
                }
                let is_test = match rule.test_scope() {
                    TestScope::Compilation => self
                        .classification
                        .is_test_assembly(input.compilation.assembly_name.as_deref()),
                    TestScope::File => self.classification.is_test_file(Some(input.tree.path())),
                    TestScope::None => false,
                };
                if is_test {
                    debug!(
                        "Skipping {} for test code in {}",
                        rule.name(),
                        input.tree.path().display()
                    );
                }
                !is_test
            })
            .collect()
    }
}

/// Collects triggerable nodes in pre-order.
#[derive(Default)]
struct NodeCollector<'ast> {
    nodes: Vec<SyntaxNode<'ast>>,
}

impl<'ast> Visit<'ast> for NodeCollector<'ast> {
    fn visit_compilation_unit(&mut self, node: &'ast CompilationUnit) {
        self.nodes.push(SyntaxNode::CompilationUnit(node));
        visit::visit_compilation_unit(self, node);
    }

    fn visit_namespace(&mut self, node: &'ast NamespaceDecl) {
        self.nodes.push(SyntaxNode::Namespace(node));
        visit::visit_namespace(self, node);
    }

    fn visit_type_decl(&mut self, node: &'ast TypeDecl) {
        self.nodes.push(SyntaxNode::Type(node));
        visit::visit_type_decl(self, node);
    }

    fn visit_method(&mut self, node: &'ast MethodDecl) {
        self.nodes.push(SyntaxNode::Method(node));
        visit::visit_method(self, node);
    }

    fn visit_constructor(&mut self, node: &'ast ConstructorDecl) {
        self.nodes.push(SyntaxNode::Constructor(node));
        visit::visit_constructor(self, node);
    }

    fn visit_local_function(&mut self, node: &'ast LocalFunctionDecl) {
        self.nodes.push(SyntaxNode::LocalFunction(node));
        visit::visit_local_function(self, node);
    }

    fn visit_member_access(&mut self, node: &'ast MemberAccessExpr) {
        self.nodes.push(SyntaxNode::MemberAccess(node));
        visit::visit_member_access(self, node);
    }

    fn visit_invocation(&mut self, node: &'ast InvocationExpr) {
        self.nodes.push(SyntaxNode::Invocation(node));
        visit::visit_invocation(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SymbolTable;
    use crate::syntax::{Block, Member, NodeId, Stmt, Token, TypeDeclKind};
    use crate::types::{Diagnostic, Location, Severity};
    use crate::rule::RuleError;

    const COUNT: DiagnosticDescriptor = DiagnosticDescriptor {
        id: "TST0001",
        rule: "count-methods",
        title: "Method seen",
        message_format: "Saw {0}",
        category: "Test",
        severity: Severity::Error,
        description: "Reports every method.",
    };

    struct CountMethods;

    impl Rule for CountMethods {
        fn name(&self) -> &'static str {
            "count-methods"
        }
        fn code(&self) -> &'static str {
            "TST0001"
        }
        fn supported_diagnostics(&self) -> &'static [DiagnosticDescriptor] {
            &[COUNT]
        }
        fn triggers(&self) -> &'static [SyntaxKind] {
            &[SyntaxKind::MethodDeclaration, SyntaxKind::MethodDeclaration]
        }
        fn evaluate(
            &self,
            ctx: &RuleContext<'_>,
            node: SyntaxNode<'_>,
        ) -> Result<Vec<Diagnostic>, RuleError> {
            let SyntaxNode::Method(method) = node else {
                return Err(RuleError::unexpected(self.name(), node));
            };
            Ok(vec![COUNT.create(
                ctx.location(method.identifier.span),
                vec![method.identifier.text.clone()],
            )])
        }
    }

    struct Miswired;

    impl Rule for Miswired {
        fn name(&self) -> &'static str {
            "miswired"
        }
        fn code(&self) -> &'static str {
            "TST0002"
        }
        fn supported_diagnostics(&self) -> &'static [DiagnosticDescriptor] {
            &[]
        }
        fn triggers(&self) -> &'static [SyntaxKind] {
            &[SyntaxKind::ClassDeclaration]
        }
        fn test_scope(&self) -> TestScope {
            TestScope::None
        }
        fn evaluate(
            &self,
            _ctx: &RuleContext<'_>,
            node: SyntaxNode<'_>,
        ) -> Result<Vec<Diagnostic>, RuleError> {
            Err(RuleError::unexpected(self.name(), node))
        }
    }

    fn tree() -> SyntaxTree {
        let run = MethodDecl::new(NodeId(2), Token::at("Run", 3, 17))
            .with_body(Block::between_lines(4, 6));
        let local = crate::syntax::LocalFunctionDecl::new(NodeId(4), Token::at("Inner", 9, 14));
        let stop = MethodDecl::new(NodeId(3), Token::at("Stop", 7, 17)).with_body(
            Block::between_lines(8, 10).with_statements(vec![Stmt::LocalFunction(local)]),
        );
        let class = TypeDecl::new(NodeId(1), TypeDeclKind::Class, Token::at("Worker", 1, 14))
            .with_members(vec![Member::Method(run), Member::Method(stop)]);
        SyntaxTree::new(
            "src/WorkTrack.Jobs/Worker.cs",
            CompilationUnit::new(vec![Member::Type(class)]),
        )
    }

    fn analyzer() -> Analyzer {
        Analyzer::builder()
            .rule(CountMethods)
            .classification(Arc::new(ClassificationCache::new()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_dispatches_each_node_once_per_rule() {
        let tree = tree();
        let table = SymbolTable::new();
        let compilation = Compilation::new("WorkTrack.Jobs");
        let result = analyzer().analyze_file(&FileInput::new(&tree, &table, &compilation));

        let names: Vec<_> = result.diagnostics.iter().map(|d| d.arguments[0].as_str()).collect();
        assert_eq!(names, ["Run", "Stop"]);
        assert_eq!(result.files_checked, 1);
        assert_eq!(
            result.diagnostics[0].location,
            Location::from_span(tree.path(), Token::at("Run", 3, 17).span)
        );
    }

    #[test]
    fn test_collector_visits_in_pre_order() {
        let tree = tree();
        let mut collector = NodeCollector::default();
        collector.visit_compilation_unit(tree.root());
        let kinds: Vec<_> = collector.nodes.iter().map(SyntaxNode::kind).collect();
        assert_eq!(
            kinds,
            [
                SyntaxKind::CompilationUnit,
                SyntaxKind::ClassDeclaration,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::LocalFunctionStatement,
            ]
        );
    }

    #[test]
    fn test_compilations_are_skipped() {
        let tree = tree();
        let table = SymbolTable::new();
        let compilation = Compilation::new("WorkTrack.Jobs.Tests");
        let result = analyzer().analyze_file(&FileInput::new(&tree, &table, &compilation));
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_exclude_tests_false_runs_on_test_code() {
        let tree = tree();
        let table = SymbolTable::new();
        let compilation = Compilation::new("WorkTrack.Jobs.Tests");
        let options: HashMap<String, String> =
            [("wt_common_analyzer_exclude_tests".to_string(), "false".to_string())]
                .into_iter()
                .collect();
        let analyzer = Analyzer::builder()
            .rule(CountMethods)
            .options(options)
            .classification(Arc::new(ClassificationCache::new()))
            .build()
            .unwrap();
        let result = analyzer.analyze_file(&FileInput::new(&tree, &table, &compilation));
        assert_eq!(result.diagnostics.len(), 2);
    }

    #[test]
    fn test_disabled_rules_are_not_registered() {
        let config = Config::parse("[rules.TST0001]\nenabled = false\n").unwrap();
        let analyzer = Analyzer::builder()
            .rule(CountMethods)
            .config(config)
            .build()
            .unwrap();
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = Analyzer::builder()
            .rule(CountMethods)
            .rule(CountMethods)
            .build()
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "Diagnostic id TST0001 is registered by both count-methods and count-methods"
        );
    }

    #[test]
    fn test_cancelled_analysis_reports_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let analyzer = Analyzer::builder()
            .rule(CountMethods)
            .cancellation(token)
            .build()
            .unwrap();
        let tree = tree();
        let table = SymbolTable::new();
        let compilation = Compilation::default();
        let input = FileInput::new(&tree, &table, &compilation);
        assert!(analyzer.cancellation().is_cancelled());
        let result = analyzer.analyze_files(&[input, input]);
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.files_checked, 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let trees: Vec<SyntaxTree> = (0..16).map(|_| tree()).collect();
        let table = SymbolTable::new();
        let compilation = Compilation::new("WorkTrack.Jobs");
        let inputs: Vec<_> = trees
            .iter()
            .map(|t| FileInput::new(t, &table, &compilation))
            .collect();
        let analyzer = analyzer();
        let result = analyzer.analyze_files(&inputs);
        assert_eq!(result.files_checked, 16);
        assert_eq!(result.diagnostics.len(), 32);
    }

    #[test]
    fn test_rule_errors_do_not_stop_other_rules() {
        let analyzer = Analyzer::builder()
            .rule(Miswired)
            .rule(CountMethods)
            .classification(Arc::new(ClassificationCache::new()))
            .build()
            .unwrap();
        let tree = tree();
        let table = SymbolTable::new();
        let compilation = Compilation::default();
        assert_eq!(analyzer.rule_names(), ["miswired", "count-methods"]);
        let result = analyzer.analyze_file(&FileInput::new(&tree, &table, &compilation));
        let names: Vec<_> = result.diagnostics.iter().map(|d| d.arguments[0].as_str()).collect();
        assert_eq!(names, ["Run", "Stop"]);
        assert_eq!(result.files_checked, 1);
    }

    #[test]
    fn test_supported_diagnostics_by_id() {
        let ids: Vec<_> = analyzer().supported_diagnostics().into_keys().collect();
        assert_eq!(ids, ["TST0001"]);
    }
}
