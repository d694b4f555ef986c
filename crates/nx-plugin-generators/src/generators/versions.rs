//! Versions of the third-party packages generators add
//!
//! Nx packages are pinned to the configured Nx version instead.

pub const TSLIB_VERSION: &str = "^2.3.0";
pub const TYPESCRIPT_VERSION: &str = "~4.9.5";
pub const TYPES_NODE_VERSION: &str = "18.7.1";
pub const ESLINT_VERSION: &str = "~8.15.0";
pub const TYPESCRIPT_ESLINT_VERSION: &str = "^5.36.1";
pub const JSONC_ESLINT_PARSER_VERSION: &str = "^2.1.0";
pub const JEST_VERSION: &str = "^29.4.1";
pub const TS_JEST_VERSION: &str = "^29.0.5";
pub const TYPES_JEST_VERSION: &str = "^29.4.0";
pub const SWC_CORE_VERSION: &str = "~1.3.51";
pub const SWC_HELPERS_VERSION: &str = "~0.5.0";
