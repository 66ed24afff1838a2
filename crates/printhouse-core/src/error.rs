//! # Error Types
//!
//! Domain-specific error types for printhouse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  printhouse-core errors (this file)                                    │
//! │  ├── CoreError        - Engine / business rule failures                │
//! │  └── ValidationError  - Field-level input validation failures          │
//! │                                                                         │
//! │  printhouse-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  console errors (in app)                                               │
//! │  └── AppError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (requested vs. available, etc.)
//! 3. Errors are enum variants, never String
//! 4. The engine never logs; callers decide how to surface an error

use thiserror::Error;

use crate::money::Money;
use crate::types::PaperType;

// =============================================================================
// Core Error
// =============================================================================

/// Engine errors.
///
/// Every engine operation fails fast with one of these; nothing is retried
/// internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A paper load request cannot be applied.
    ///
    /// ## When This Occurs
    /// - Loading zero sheets
    /// - Loading into a press that is already full
    /// - Configuring a current load outside `[0, max_paper_load]`
    #[error("Invalid paper load: {reason}")]
    InvalidPaperLoad { reason: String },

    /// A print job needs more sheets than the press currently holds.
    ///
    /// ## User Workflow
    /// ```text
    /// print 11 copies × 9 pages
    ///      │
    ///      ▼
    /// sheets needed: ceil(9 / 2) × 11 = 55, loaded: 50
    ///      │
    ///      ▼
    /// InsufficientPaperLoad { requested: 55, available: 50 }
    ///      │
    ///      ▼
    /// Nothing printed, paper untouched
    /// ```
    #[error(
        "Insufficient paper load: requested {requested} sheets, but the press has only {available} available"
    )]
    InsufficientPaperLoad { requested: u64, available: u32 },

    /// Requested colour mode doesn't match the press.
    #[error("Incompatible colour type: press prints colour: {press_colour}, requested colour: {requested_colour}")]
    IncompatibleColourType {
        press_colour: bool,
        requested_colour: bool,
    },

    /// Copies must be at least one.
    #[error("Copies count must be at least 1, got {copies}")]
    InvalidCopiesCount { copies: u32 },

    /// Page count passed to the pricing engine is not positive.
    #[error("Number of pages must be greater than zero, got {page_count}")]
    InvalidPageCount { page_count: u32 },

    /// The configured base cost of a paper type is not positive.
    #[error("Paper cost for {paper_type} must be greater than zero, got {cost}")]
    InvalidPaperCost { paper_type: PaperType, cost: Money },

    /// Price per copy is zero, negative or above the maximum.
    #[error("Invalid price: {reason}")]
    InvalidPriceValue { reason: String },

    /// Press construction or reconfiguration parameters are out of range.
    #[error("Invalid printing press: {reason}")]
    InvalidPrintingPress { reason: String },

    /// A percentage setting is negative.
    #[error("{field} cannot be negative")]
    InvalidPercentage { field: String },

    /// Base salary is negative.
    #[error("Invalid salary: {reason}")]
    InvalidSalary { reason: String },

    /// Revenue target is not positive.
    #[error("Revenue target must be greater than zero, got {target}")]
    InvalidRevenueTarget { target: Money },

    /// An employee with the same id is already on the payroll.
    #[error("Employee {id} is already added in print house")]
    DuplicateEmployee { id: String },

    /// A positional lookup missed.
    #[error("{entity} index {index} is out of range (have {len})")]
    IndexOutOfRange {
        entity: &'static str,
        index: usize,
        len: usize,
    },

    /// An amount no longer fits the money representation.
    #[error("Amount out of range while computing {context}")]
    AmountOverflow { context: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidPaperLoad error.
    pub fn paper_load(reason: impl Into<String>) -> Self {
        CoreError::InvalidPaperLoad {
            reason: reason.into(),
        }
    }

    /// Creates an InvalidPrintingPress error.
    pub fn press(reason: impl Into<String>) -> Self {
        CoreError::InvalidPrintingPress {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a raw field doesn't meet requirements, before any
/// engine operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed EGN, unparsable decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
