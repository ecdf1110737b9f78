// Configuration for the N4 front end

/// Default limit on how deeply the parser and analyzer may recurse.
/// Deeper source nesting is reported as a diagnostic instead of overflowing
/// the native stack.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 96;

/// Options shared by the parser and the semantic analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontendConfig {
    pub max_nesting_depth: usize,
}

impl FrontendConfig {
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}
