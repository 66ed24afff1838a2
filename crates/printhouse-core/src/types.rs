//! # Domain Types
//!
//! Catalog types used throughout PrintHouse.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   PaperType     │   │    SizeTier     │   │    Edition      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Standard 100   │   │  A5 (0)         │   │  title          │       │
//! │  │  Glossy   120   │   │  A4 (1)         │   │  page_count     │       │
//! │  │  Newspaper 80   │   │  A3 (2) ...     │   │  size           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │   Percentage    │   │   Employee      │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  Decimal ≥ 0    │   │  id, Role       │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_page_count, validate_title};

// =============================================================================
// Paper Type
// =============================================================================

/// Paper stock a job is printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperType {
    Standard,
    Glossy,
    Newspaper,
}

impl PaperType {
    /// Every paper type, in declaration order.
    pub const ALL: [PaperType; 3] = [PaperType::Standard, PaperType::Glossy, PaperType::Newspaper];

    /// Catalog base cost per page at the smallest size tier.
    pub const fn base_cost(&self) -> Money {
        match self {
            PaperType::Standard => Money::from_major(100),
            PaperType::Glossy => Money::from_major(120),
            PaperType::Newspaper => Money::from_major(80),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            PaperType::Standard => "standard",
            PaperType::Glossy => "glossy",
            PaperType::Newspaper => "newspaper",
        }
    }
}

impl fmt::Display for PaperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaperType::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "paper type".to_string(),
                allowed: PaperType::ALL.iter().map(|p| p.to_string()).collect(),
            })
    }
}

// =============================================================================
// Size Tier
// =============================================================================

/// Page size ladder, smallest first.
///
/// Only the ordinal position matters for pricing: each step up costs a fixed
/// percentage more than the step below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeTier {
    A5,
    A4,
    A3,
    A2,
    A1,
}

impl SizeTier {
    /// Every tier, smallest first.
    pub const ALL: [SizeTier; 5] = [
        SizeTier::A5,
        SizeTier::A4,
        SizeTier::A3,
        SizeTier::A2,
        SizeTier::A1,
    ];

    /// Zero-based position on the ladder.
    pub const fn ordinal(&self) -> u32 {
        match self {
            SizeTier::A5 => 0,
            SizeTier::A4 => 1,
            SizeTier::A3 => 2,
            SizeTier::A2 => 3,
            SizeTier::A1 => 4,
        }
    }

    /// The next larger tier, if any.
    pub fn larger(&self) -> Option<SizeTier> {
        SizeTier::ALL.get(self.ordinal() as usize + 1).copied()
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            SizeTier::A5 => "A5",
            SizeTier::A4 => "A4",
            SizeTier::A3 => "A3",
            SizeTier::A2 => "A2",
            SizeTier::A1 => "A1",
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizeTier::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "size".to_string(),
                allowed: SizeTier::ALL.iter().map(|t| t.to_string()).collect(),
            })
    }
}

// =============================================================================
// Role
// =============================================================================

/// Employee role. Salary increments are granted per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Operator,
    Manager,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Operator, Role::Manager];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Operator => "operator",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: Role::ALL.iter().map(|r| r.to_string()).collect(),
            })
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A non-negative percentage, e.g. `10` for 10 %.
///
/// ## Why Decimal?
/// Percentages feed compound formulas (`(1 + p/100)^n`). Keeping them exact
/// means the only rounding in a computation is the final one to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl Percentage {
    /// Creates a percentage, rejecting negative values.
    pub fn new(value: Decimal) -> CoreResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(CoreError::InvalidPercentage {
                field: "percentage".to_string(),
            });
        }
        Ok(Percentage(value.normalize()))
    }

    /// Creates a whole-number percentage (always valid).
    pub fn from_whole(pct: u32) -> Self {
        Percentage(Decimal::from(pct))
    }

    #[inline]
    pub const fn zero() -> Self {
        Percentage(Decimal::ZERO)
    }

    /// The percentage as written, e.g. `12.5`.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// `p / 100`, e.g. `0.125`.
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::from(100)
    }

    /// `1 + p / 100`, e.g. `1.125`.
    #[inline]
    pub fn growth_factor(&self) -> Decimal {
        Decimal::ONE + self.fraction()
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = CoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Percentage::new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(pct: Percentage) -> Self {
        pct.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Edition
// =============================================================================

/// A publication that can be printed: title, page count and size.
///
/// Immutable once constructed. Construction validates the title (2–150
/// characters, not blank) and the page count (3–1000).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "EditionFields")]
pub struct Edition {
    title: String,
    page_count: u32,
    size: SizeTier,
}

impl Edition {
    /// Creates a validated edition.
    ///
    /// ## Example
    /// ```rust
    /// use printhouse_core::{Edition, SizeTier};
    ///
    /// let edition = Edition::new("Rust Weekly", 9, SizeTier::A4).unwrap();
    /// assert_eq!(edition.sheets_per_copy(), 5);
    ///
    /// assert!(Edition::new("X", 9, SizeTier::A4).is_err());
    /// assert!(Edition::new("Rust Weekly", 2, SizeTier::A4).is_err());
    /// ```
    pub fn new(title: impl Into<String>, page_count: u32, size: SizeTier) -> CoreResult<Self> {
        let title = title.into();
        validate_title(&title)?;
        validate_page_count(page_count)?;

        Ok(Edition {
            title,
            page_count,
            size,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn size(&self) -> SizeTier {
        self.size
    }

    /// Physical sheets consumed by one copy; two pages per sheet (duplex).
    pub fn sheets_per_copy(&self) -> u32 {
        self.page_count.div_ceil(2)
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} pages, {})", self.title, self.page_count, self.size)
    }
}

/// Unvalidated wire shape of an [`Edition`].
#[derive(Deserialize)]
struct EditionFields {
    title: String,
    page_count: u32,
    size: SizeTier,
}

impl TryFrom<EditionFields> for Edition {
    type Error = CoreError;

    fn try_from(fields: EditionFields) -> Result<Self, Self::Error> {
        Edition::new(fields.title, fields.page_count, fields.size)
    }
}

// =============================================================================
// Employee
// =============================================================================

/// A member of staff.
///
/// The id is validated by the caller (EGN checksum, see
/// [`crate::validation::validate_egn`]); the engine only requires it to be
/// unique within a print house.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    id: String,
    role: Role,
}

impl Employee {
    pub fn new(id: impl Into<String>, role: Role) -> CoreResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "employee id".to_string(),
            }
            .into());
        }
        Ok(Employee { id, role })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
