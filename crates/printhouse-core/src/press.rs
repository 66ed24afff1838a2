//! # Printing Press
//!
//! Bounded paper inventory plus a record of what the press has printed.
//!
//! ## Paper Load State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Press Operations                                     │
//! │                                                                         │
//! │  Operation            Guard                      State Change           │
//! │  ─────────            ─────                      ────────────           │
//! │                                                                         │
//! │  load_paper(n) ─────► n > 0, not full ─────────► current = min(c+n,max) │
//! │                                                                         │
//! │  print_item(..) ────► copies ≥ 1                                        │
//! │                       colour matches                                    │
//! │                       0 < price ≤ MAX_PRICE                             │
//! │                       sheets ≤ current ────────► current -= sheets      │
//! │                                                  items[item] += copies  │
//! │                                                                         │
//! │  apply_settings(..) ► same ranges as new() ────► fields replaced        │
//! │                                                                         │
//! │  NOTE: A failed operation leaves the press exactly as it was.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Edition, PaperType};
use crate::{MAX_PAGES_PER_MINUTE, MAX_PAPER_LOAD, MAX_PRICE};

// =============================================================================
// Printed Item
// =============================================================================

/// One distinct print job: what was printed, on which paper, at what price.
///
/// ## Design Notes
/// Two jobs with equal edition, paper, price and colour are the same item;
/// the press keeps a copy count per item rather than a list of jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PrintedItemFields")]
pub struct PrintedItem {
    edition: Edition,
    paper_type: PaperType,
    price_per_copy: Money,
    colour: bool,
}

impl PrintedItem {
    /// Creates an item, checking that the price is in `(0, MAX_PRICE]`.
    pub fn new(
        edition: Edition,
        paper_type: PaperType,
        price_per_copy: Money,
        colour: bool,
    ) -> CoreResult<Self> {
        validate_price(price_per_copy)?;
        Ok(PrintedItem {
            edition,
            paper_type,
            price_per_copy,
            colour,
        })
    }

    pub fn edition(&self) -> &Edition {
        &self.edition
    }

    pub fn paper_type(&self) -> PaperType {
        self.paper_type
    }

    pub fn price_per_copy(&self) -> Money {
        self.price_per_copy
    }

    pub fn is_colour(&self) -> bool {
        self.colour
    }
}

fn validate_price(price: Money) -> CoreResult<()> {
    if !price.is_positive() {
        return Err(CoreError::InvalidPriceValue {
            reason: format!("price per copy must be greater than zero, got {}", price),
        });
    }
    if price > MAX_PRICE {
        return Err(CoreError::InvalidPriceValue {
            reason: format!("price per copy must not exceed {}, got {}", MAX_PRICE, price),
        });
    }
    Ok(())
}

#[derive(Deserialize)]
struct PrintedItemFields {
    edition: Edition,
    paper_type: PaperType,
    price_per_copy: Money,
    colour: bool,
}

impl TryFrom<PrintedItemFields> for PrintedItem {
    type Error = CoreError;

    fn try_from(f: PrintedItemFields) -> Result<Self, Self::Error> {
        PrintedItem::new(f.edition, f.paper_type, f.price_per_copy, f.colour)
    }
}

// =============================================================================
// Press Settings
// =============================================================================

/// Partial reconfiguration of a press. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressSettings {
    pub max_paper_load: Option<u32>,
    pub current_paper_load: Option<u32>,
    pub colour: Option<bool>,
    pub max_pages_per_minute: Option<u32>,
}

// =============================================================================
// Printing Press
// =============================================================================

/// A printing press.
///
/// ## Invariants
/// - `0 ≤ current_paper_load ≤ max_paper_load ≤ MAX_PAPER_LOAD`
/// - every recorded item has at least one copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PressRecord", into = "PressRecord")]
pub struct PrintingPress {
    max_paper_load: u32,
    current_paper_load: u32,
    colour: bool,
    max_pages_per_minute: u32,
    printed_items: HashMap<PrintedItem, u32>,
}

impl PrintingPress {
    /// Creates an empty-history press.
    ///
    /// ## Example
    /// ```rust
    /// use printhouse_core::PrintingPress;
    ///
    /// let press = PrintingPress::new(1000, 200, true, 60).unwrap();
    /// assert_eq!(press.current_paper_load(), 200);
    ///
    /// // more paper than the press holds
    /// assert!(PrintingPress::new(1000, 1001, true, 60).is_err());
    /// ```
    pub fn new(
        max_paper_load: u32,
        current_paper_load: u32,
        colour: bool,
        max_pages_per_minute: u32,
    ) -> CoreResult<Self> {
        check_configuration(max_paper_load, current_paper_load, max_pages_per_minute)?;

        Ok(PrintingPress {
            max_paper_load,
            current_paper_load,
            colour,
            max_pages_per_minute,
            printed_items: HashMap::new(),
        })
    }

    pub fn max_paper_load(&self) -> u32 {
        self.max_paper_load
    }

    pub fn current_paper_load(&self) -> u32 {
        self.current_paper_load
    }

    pub fn is_colour(&self) -> bool {
        self.colour
    }

    pub fn max_pages_per_minute(&self) -> u32 {
        self.max_pages_per_minute
    }

    pub fn is_full(&self) -> bool {
        self.current_paper_load == self.max_paper_load
    }

    /// Printed items and their copy counts.
    pub fn printed_items(&self) -> &HashMap<PrintedItem, u32> {
        &self.printed_items
    }

    /// Printed items in a stable order, for display and storage.
    pub fn printed_items_sorted(&self) -> Vec<(&PrintedItem, u32)> {
        let mut items: Vec<_> = self
            .printed_items
            .iter()
            .map(|(item, copies)| (item, *copies))
            .collect();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
    }

    /// Copies recorded for an item (0 when never printed).
    pub fn copies_of(&self, item: &PrintedItem) -> u32 {
        self.printed_items.get(item).copied().unwrap_or(0)
    }

    /// Loads sheets into the press, stopping at capacity.
    ///
    /// Returns the number of sheets actually taken.
    ///
    /// ## Errors
    /// `InvalidPaperLoad` when `amount` is zero or the press is already full.
    pub fn load_paper(&mut self, amount: u32) -> CoreResult<u32> {
        if amount == 0 {
            return Err(CoreError::paper_load("amount must be greater than zero"));
        }
        if self.is_full() {
            return Err(CoreError::paper_load(format!(
                "press is already full ({} sheets)",
                self.max_paper_load
            )));
        }

        let free = self.max_paper_load - self.current_paper_load;
        let taken = amount.min(free);
        self.current_paper_load += taken;
        Ok(taken)
    }

    /// Prints `copies` of an edition, consuming `ceil(pages / 2)` sheets per copy.
    ///
    /// Checks run in order: copies, colour, price, paper. The first failing
    /// check is reported and nothing changes.
    pub fn print_item(
        &mut self,
        colour: bool,
        edition: &Edition,
        paper_type: PaperType,
        price_per_copy: Money,
        copies: u32,
    ) -> CoreResult<()> {
        if copies == 0 {
            return Err(CoreError::InvalidCopiesCount { copies });
        }

        if colour != self.colour {
            return Err(CoreError::IncompatibleColourType {
                press_colour: self.colour,
                requested_colour: colour,
            });
        }

        let item = PrintedItem::new(edition.clone(), paper_type, price_per_copy, colour)?;

        let sheets_needed = u64::from(edition.sheets_per_copy()) * u64::from(copies);
        if sheets_needed > u64::from(self.current_paper_load) {
            return Err(CoreError::InsufficientPaperLoad {
                requested: sheets_needed,
                available: self.current_paper_load,
            });
        }

        let recorded = self
            .copies_of(&item)
            .checked_add(copies)
            .ok_or(CoreError::AmountOverflow {
                context: "printed copies",
            })?;

        // sheets_needed ≤ current_paper_load, so it fits in u32
        self.current_paper_load -= sheets_needed as u32;
        self.printed_items.insert(item, recorded);
        Ok(())
    }

    /// Total pages printed: Σ page_count × copies.
    pub fn total_printed_pages(&self) -> u64 {
        self.printed_items
            .iter()
            .map(|(item, copies)| u64::from(item.edition.page_count()) * u64::from(*copies))
            .sum()
    }

    /// Reconfigures the press, all-or-nothing.
    ///
    /// Lowering the maximum below the sheets currently loaded is rejected;
    /// unload first by setting `current_paper_load` in the same call.
    pub fn apply_settings(&mut self, settings: PressSettings) -> CoreResult<()> {
        let max = settings.max_paper_load.unwrap_or(self.max_paper_load);
        let current = settings.current_paper_load.unwrap_or(self.current_paper_load);
        let ppm = settings
            .max_pages_per_minute
            .unwrap_or(self.max_pages_per_minute);

        check_configuration(max, current, ppm)?;

        self.max_paper_load = max;
        self.current_paper_load = current;
        self.max_pages_per_minute = ppm;
        if let Some(colour) = settings.colour {
            self.colour = colour;
        }
        Ok(())
    }
}

fn check_configuration(max: u32, current: u32, ppm: u32) -> CoreResult<()> {
    if max == 0 || max > MAX_PAPER_LOAD {
        return Err(CoreError::press(format!(
            "max paper load must be between 1 and {}, got {}",
            MAX_PAPER_LOAD, max
        )));
    }
    if current > max {
        return Err(CoreError::paper_load(format!(
            "current load {} exceeds max paper load {}",
            current, max
        )));
    }
    if ppm == 0 || ppm > MAX_PAGES_PER_MINUTE {
        return Err(CoreError::press(format!(
            "max pages per minute must be between 1 and {}, got {}",
            MAX_PAGES_PER_MINUTE, ppm
        )));
    }
    Ok(())
}

// =============================================================================
// Stored Shape
// =============================================================================

/// Serialized press. Printed items become a list because JSON map keys must
/// be strings.
#[derive(Serialize, Deserialize)]
struct PressRecord {
    max_paper_load: u32,
    current_paper_load: u32,
    colour: bool,
    max_pages_per_minute: u32,
    #[serde(default)]
    printed: Vec<PrintRun>,
}

#[derive(Serialize, Deserialize)]
struct PrintRun {
    item: PrintedItem,
    copies: u32,
}

impl From<PrintingPress> for PressRecord {
    fn from(press: PrintingPress) -> Self {
        let mut printed: Vec<PrintRun> = press
            .printed_items
            .into_iter()
            .map(|(item, copies)| PrintRun { item, copies })
            .collect();
        printed.sort_by(|a, b| a.item.cmp(&b.item));

        PressRecord {
            max_paper_load: press.max_paper_load,
            current_paper_load: press.current_paper_load,
            colour: press.colour,
            max_pages_per_minute: press.max_pages_per_minute,
            printed,
        }
    }
}

impl TryFrom<PressRecord> for PrintingPress {
    type Error = CoreError;

    fn try_from(record: PressRecord) -> Result<Self, Self::Error> {
        let mut press = PrintingPress::new(
            record.max_paper_load,
            record.current_paper_load,
            record.colour,
            record.max_pages_per_minute,
        )?;

        for run in record.printed {
            if run.copies == 0 {
                return Err(CoreError::InvalidCopiesCount { copies: 0 });
            }
            let entry = press.printed_items.entry(run.item).or_insert(0);
            *entry = entry.checked_add(run.copies).ok_or(CoreError::AmountOverflow {
                context: "printed copies",
            })?;
        }

        Ok(press)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SizeTier;

    fn edition(pages: u32) -> Edition {
        Edition::new("Test Edition", pages, SizeTier::A4).unwrap()
    }

    fn price() -> Money {
        Money::from_major(20)
    }

    #[test]
    fn test_new_validates_ranges() {
        assert!(PrintingPress::new(MAX_PAPER_LOAD, 0, false, MAX_PAGES_PER_MINUTE).is_ok());

        assert!(matches!(
            PrintingPress::new(0, 0, false, 10),
            Err(CoreError::InvalidPrintingPress { .. })
        ));
        assert!(matches!(
            PrintingPress::new(MAX_PAPER_LOAD + 1, 0, false, 10),
            Err(CoreError::InvalidPrintingPress { .. })
        ));
        assert!(matches!(
            PrintingPress::new(100, 101, false, 10),
            Err(CoreError::InvalidPaperLoad { .. })
        ));
        assert!(matches!(
            PrintingPress::new(100, 0, false, 0),
            Err(CoreError::InvalidPrintingPress { .. })
        ));
        assert!(matches!(
            PrintingPress::new(100, 0, false, MAX_PAGES_PER_MINUTE + 1),
            Err(CoreError::InvalidPrintingPress { .. })
        ));
    }

    #[test]
    fn test_load_paper_clamps_to_capacity() {
        let mut press = PrintingPress::new(100, 90, false, 10).unwrap();
        assert_eq!(press.load_paper(50).unwrap(), 10);
        assert_eq!(press.current_paper_load(), 100);
        assert!(press.is_full());
    }

    #[test]
    fn test_load_paper_rejects_zero_and_full() {
        let mut press = PrintingPress::new(100, 100, false, 10).unwrap();
        assert!(matches!(
            press.load_paper(1),
            Err(CoreError::InvalidPaperLoad { .. })
        ));

        let mut press = PrintingPress::new(100, 10, false, 10).unwrap();
        assert!(matches!(
            press.load_paper(0),
            Err(CoreError::InvalidPaperLoad { .. })
        ));
        assert_eq!(press.current_paper_load(), 10);
    }

    #[test]
    fn test_print_consumes_sheets_and_records_copies() {
        let mut press = PrintingPress::new(1000, 100, true, 60).unwrap();
        let ed = edition(9);

        press
            .print_item(true, &ed, PaperType::Glossy, price(), 10)
            .unwrap();
        assert_eq!(press.current_paper_load(), 50);

        press
            .print_item(true, &ed, PaperType::Glossy, price(), 2)
            .unwrap();
        assert_eq!(press.current_paper_load(), 40);

        let item = PrintedItem::new(ed, PaperType::Glossy, price(), true).unwrap();
        assert_eq!(press.printed_items().len(), 1);
        assert_eq!(press.copies_of(&item), 12);
        assert_eq!(press.total_printed_pages(), 108);
    }

    #[test]
    fn test_different_price_is_a_different_item() {
        let mut press = PrintingPress::new(1000, 100, false, 60).unwrap();
        let ed = edition(4);

        press
            .print_item(false, &ed, PaperType::Standard, price(), 1)
            .unwrap();
        press
            .print_item(false, &ed, PaperType::Standard, Money::from_major(21), 1)
            .unwrap();
        assert_eq!(press.printed_items().len(), 2);
    }

    #[test]
    fn test_insufficient_paper_leaves_state_unchanged() {
        let mut press = PrintingPress::new(1000, 50, false, 60).unwrap();
        let before = press.clone();

        let err = press
            .print_item(false, &edition(9), PaperType::Standard, price(), 11)
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::InsufficientPaperLoad {
                requested: 55,
                available: 50
            }
        );
        assert_eq!(press, before);
    }

    #[test]
    fn test_print_check_order() {
        let mut press = PrintingPress::new(1000, 0, false, 60).unwrap();
        let ed = edition(9);

        // copies checked before colour
        assert!(matches!(
            press.print_item(true, &ed, PaperType::Standard, Money::zero(), 0),
            Err(CoreError::InvalidCopiesCount { copies: 0 })
        ));
        // colour checked before price
        assert!(matches!(
            press.print_item(true, &ed, PaperType::Standard, Money::zero(), 1),
            Err(CoreError::IncompatibleColourType {
                press_colour: false,
                requested_colour: true
            })
        ));
        // price checked before paper
        assert!(matches!(
            press.print_item(false, &ed, PaperType::Standard, Money::zero(), 1),
            Err(CoreError::InvalidPriceValue { .. })
        ));
        assert!(matches!(
            press.print_item(false, &ed, PaperType::Standard, price(), 1),
            Err(CoreError::InsufficientPaperLoad { .. })
        ));
    }

    #[test]
    fn test_colour_press_rejects_black_and_white_job() {
        let mut press = PrintingPress::new(1000, 100, true, 60).unwrap();
        assert!(matches!(
            press.print_item(false, &edition(4), PaperType::Standard, price(), 1),
            Err(CoreError::IncompatibleColourType { .. })
        ));
    }

    #[test]
    fn test_price_above_maximum_rejected() {
        let mut press = PrintingPress::new(1000, 100, false, 60).unwrap();
        let too_much = MAX_PRICE.checked_add(Money::from_cents(1)).unwrap();
        assert!(matches!(
            press.print_item(false, &edition(4), PaperType::Standard, too_much, 1),
            Err(CoreError::InvalidPriceValue { .. })
        ));
        assert!(press
            .print_item(false, &edition(4), PaperType::Standard, MAX_PRICE, 1)
            .is_ok());
    }

    #[test]
    fn test_apply_settings() {
        let mut press = PrintingPress::new(1000, 500, false, 60).unwrap();

        press
            .apply_settings(PressSettings {
                colour: Some(true),
                max_pages_per_minute: Some(120),
                ..Default::default()
            })
            .unwrap();
        assert!(press.is_colour());
        assert_eq!(press.max_pages_per_minute(), 120);
        assert_eq!(press.current_paper_load(), 500);

        // lowering max below the loaded sheets
        let before = press.clone();
        assert!(press
            .apply_settings(PressSettings {
                max_paper_load: Some(400),
                colour: Some(false),
                ..Default::default()
            })
            .is_err());
        assert_eq!(press, before);

        press
            .apply_settings(PressSettings {
                max_paper_load: Some(400),
                current_paper_load: Some(300),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(press.max_paper_load(), 400);
        assert_eq!(press.current_paper_load(), 300);
    }

    #[test]
    fn test_serde_keeps_printed_items() {
        let mut press = PrintingPress::new(1000, 100, false, 60).unwrap();
        press
            .print_item(false, &edition(4), PaperType::Newspaper, price(), 3)
            .unwrap();

        let json = serde_json::to_string(&press).unwrap();
        let back: PrintingPress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, press);
    }

    #[test]
    fn test_deserialize_rejects_overloaded_press() {
        let json = r#"{"max_paper_load":10,"current_paper_load":11,"colour":false,"max_pages_per_minute":5}"#;
        assert!(serde_json::from_str::<PrintingPress>(json).is_err());
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Load(u32),
            Print { pages: u32, copies: u32 },
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u32..2_000).prop_map(Op::Load),
                (3u32..200, 0u32..50).prop_map(|(pages, copies)| Op::Print { pages, copies }),
            ]
        }

        proptest! {
            #[test]
            fn paper_load_stays_within_bounds(
                max in 1u32..5_000,
                ops in proptest::collection::vec(op(), 0..40),
            ) {
                let mut press = PrintingPress::new(max, 0, false, 100).unwrap();

                for op in ops {
                    let before = press.clone();
                    let result = match op {
                        Op::Load(n) => press.load_paper(n).map(|_| ()),
                        Op::Print { pages, copies } => {
                            let ed = Edition::new("Prop Edition", pages, SizeTier::A5).unwrap();
                            press.print_item(false, &ed, PaperType::Standard, Money::from_major(1), copies)
                        }
                    };

                    prop_assert!(press.current_paper_load() <= press.max_paper_load());
                    if result.is_err() {
                        prop_assert_eq!(&press, &before);
                    }
                    prop_assert!(press.printed_items().values().all(|c| *c >= 1));
                }
            }
        }
    }
}
